//! Server configuration loaded from the environment.

use std::fmt::Display;
use std::fs::read_to_string;
use std::str::FromStr;
use std::time::Duration;

use imobi_auth::AuthConfig;
use imobi_core::models::broker::BrokerId;
use imobi_db::DbConfig;
use imobi_tenant::ResolverConfig;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("failed to read {path}: {source}")]
    KeyFile {
        path: String,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub db: DbConfig,
    pub auth: AuthConfig,
    pub resolver: ResolverConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_source<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| var(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let db_defaults = DbConfig::default();
        let db = DbConfig {
            url: get("SURREAL_URL").unwrap_or(db_defaults.url),
            namespace: get("SURREAL_NS").unwrap_or(db_defaults.namespace),
            database: get("SURREAL_DB").unwrap_or(db_defaults.database),
            username: get("SURREAL_USER"),
            password: get("SURREAL_PASS"),
        };

        let jwt_public_key_pem = match (get("JWT_PUBLIC_KEY"), get("JWT_PUBLIC_KEY_FILE")) {
            (Some(pem), _) => pem,
            (None, Some(path)) => read_key_file(&path)?,
            (None, None) => return Err(ConfigError::Missing("JWT_PUBLIC_KEY_FILE")),
        };
        let jwt_private_key_pem = match get("JWT_PRIVATE_KEY_FILE") {
            Some(path) => read_key_file(&path)?,
            None => String::new(),
        };
        let auth_defaults = AuthConfig::default();
        let auth = AuthConfig {
            jwt_private_key_pem,
            jwt_public_key_pem,
            jwt_issuer: get("JWT_ISSUER").unwrap_or(auth_defaults.jwt_issuer),
            ..auth_defaults
        };

        let mut resolver = ResolverConfig {
            default_tenant_id: get("DEFAULT_TENANT_ID").map(BrokerId::new),
            ..Default::default()
        };
        if let Some(list) = get("RESERVED_SUBDOMAINS") {
            resolver.reserved_subdomains = list
                .split(',')
                .map(|s| s.trim().to_ascii_lowercase())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(ms) = get("TENANT_LOOKUP_TIMEOUT_MS") {
            resolver.lookup_timeout = Some(Duration::from_millis(parse(
                "TENANT_LOOKUP_TIMEOUT_MS",
                &ms,
            )?));
        }

        let port = match get("PORT") {
            Some(port) => parse("PORT", &port)?,
            None => {
                info!("PORT not set, using default: 8080");
                8080
            }
        };

        Ok(Self {
            port,
            db,
            auth,
            resolver,
        })
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })
}

fn read_key_file(path: &str) -> Result<String, ConfigError> {
    read_to_string(path)
        .map(|s| s.trim().to_string())
        .map_err(|source| ConfigError::KeyFile {
            path: path.to_string(),
            source,
        })
}
