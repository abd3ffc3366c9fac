//! Hostname extraction from request headers.

use std::fmt;

/// A request hostname with the port removed, lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hostname(String);

impl Hostname {
    /// Normalize a raw `Host`-style value (`Example.com:3000` →
    /// `example.com`). Bracketed IPv6 literals keep their brackets.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let host = if raw.starts_with('[') {
            match raw.find(']') {
                Some(end) => &raw[..=end],
                None => raw,
            }
        } else {
            raw.split(':').next().unwrap_or_default()
        };
        Self(host.trim().to_ascii_lowercase())
    }

    /// Pick the hostname from `Host`, falling back to the first entry of
    /// `X-Forwarded-Host` when `Host` is missing or blank.
    pub fn from_headers(host: Option<&str>, forwarded_host: Option<&str>) -> Self {
        let chosen = host
            .filter(|h| !h.trim().is_empty())
            .or_else(|| forwarded_host.and_then(|h| h.split(',').next()))
            .unwrap_or_default();
        Self::parse(chosen)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when the hostname contains any of `markers`.
    pub fn is_local<S: AsRef<str>>(&self, markers: &[S]) -> bool {
        markers.iter().any(|m| self.0.contains(m.as_ref()))
    }

    /// The label before the first dot, for dotted hostnames only.
    pub fn first_label(&self) -> Option<&str> {
        self.0
            .split_once('.')
            .map(|(label, _)| label)
            .filter(|label| !label.is_empty())
    }
}

impl fmt::Display for Hostname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_port_and_lowercases() {
        assert_eq!(Hostname::parse("LocalHost:3000").as_str(), "localhost");
        assert_eq!(
            Hostname::parse("ImoveisAgora.com.br").as_str(),
            "imoveisagora.com.br"
        );
        assert_eq!(Hostname::parse("[::1]:8080").as_str(), "[::1]");
    }

    #[test]
    fn host_header_wins_over_forwarded_host() {
        let h = Hostname::from_headers(Some("a.example.com"), Some("b.example.com"));
        assert_eq!(h.as_str(), "a.example.com");
    }

    #[test]
    fn forwarded_host_used_when_host_missing_or_blank() {
        let h = Hostname::from_headers(None, Some("b.example.com:443, proxy.internal"));
        assert_eq!(h.as_str(), "b.example.com");

        let h = Hostname::from_headers(Some("  "), Some("c.example.com"));
        assert_eq!(h.as_str(), "c.example.com");
    }

    #[test]
    fn no_headers_yields_empty_hostname() {
        assert!(Hostname::from_headers(None, None).is_empty());
    }

    #[test]
    fn first_label_requires_a_dot() {
        assert_eq!(
            Hostname::parse("joaocorretor.saasdomain.com").first_label(),
            Some("joaocorretor")
        );
        assert_eq!(Hostname::parse("intranet").first_label(), None);
        assert_eq!(Hostname::parse(".example.com").first_label(), None);
    }

    #[test]
    fn local_detection_is_substring_based() {
        let markers = ["localhost", "127.0.0.1"];
        assert!(Hostname::parse("localhost:3000").is_local(&markers));
        assert!(Hostname::parse("tenant.localhost").is_local(&markers));
        assert!(Hostname::parse("127.0.0.1:8080").is_local(&markers));
        assert!(!Hostname::parse("imoveisagora.com.br").is_local(&markers));
    }
}
