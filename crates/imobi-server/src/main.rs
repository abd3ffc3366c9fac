//! IMOBI Server entry point.

use std::process::ExitCode;

use imobi_server::config::ServerConfig;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

#[tokio::main]
async fn main() -> ExitCode {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "imobi=info".parse::<Directive>() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt().with_env_filter(filter).json().init();

    info!("Starting IMOBI server...");

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = imobi_server::run(config).await {
        error!(error = %e, "Server failed");
        return ExitCode::FAILURE;
    }

    info!("IMOBI server stopped.");
    ExitCode::SUCCESS
}
