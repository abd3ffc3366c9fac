//! IMOBI Server: axum HTTP API.
//!
//! Every `/api/public/*` and `/api/admin/*` request passes through tenant
//! resolution before a handler runs. Admin routes additionally require a
//! bearer token whose profile belongs to the resolved tenant.

use std::time::Duration;

use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    middleware::{from_fn, from_fn_with_state},
    routing::{get, put},
};
use imobi_db::{DbError, DbManager, run_migrations};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    cors::{self, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use config::ServerConfig;
use middleware::{
    optional_tenant, require_auth, require_super_admin, require_tenant, require_tenant_access,
};
use routes::{admin, health, public, super_admin, tenant};
use state::AppState;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("database connection failed: {0}")]
    Connect(#[from] surrealdb::Error),

    #[error(transparent)]
    Database(#[from] DbError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Assemble the full route tree.
pub fn build_router(state: AppState) -> Router {
    let tenant_routes = Router::new()
        .route("/identify", get(tenant::identify))
        .route(
            "/update",
            put(tenant::update_settings)
                .route_layer(from_fn_with_state(state.clone(), require_auth)),
        );

    let public_routes = Router::new()
        .route("/tenant", get(public::tenant_info))
        .route_layer(from_fn_with_state(state.clone(), require_tenant));

    // Layers run bottom-up: auth, then tenant resolution, then the access guard.
    let admin_routes = Router::new()
        .route("/tenant", get(admin::current_tenant))
        .route("/tenant/site", put(admin::update_site))
        .route_layer(from_fn(require_tenant_access))
        .route_layer(from_fn_with_state(state.clone(), require_tenant))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    let super_admin_routes = Router::new()
        .route("/brokers", get(super_admin::list_brokers))
        .route("/brokers/{id}/status", put(super_admin::set_broker_status))
        .route_layer(from_fn(require_super_admin))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    let cors = CorsLayer::new()
        .allow_origin(cors::Any)
        .allow_methods([Method::GET, Method::PUT, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route(
            "/health",
            get(health::health).route_layer(from_fn_with_state(state.clone(), optional_tenant)),
        )
        .nest("/api/tenant", tenant_routes)
        .nest("/api/public", public_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api/super-admin", super_admin_routes)
        .fallback(routes::route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Connect to the database, apply migrations and serve until a shutdown
/// signal arrives.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let db = DbManager::connect(&config.db).await?;
    run_migrations(db.client()).await?;

    match &config.resolver.default_tenant_id {
        Some(id) => info!(tenant_id = %id, "Local development default tenant configured"),
        None => info!("No default tenant configured; local hosts will not resolve"),
    }

    let state = AppState::new(db.client().clone(), config.resolver, config.auth);
    let app = build_router(state);

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address).await?;
    info!(%address, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "Failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
