//! Salesdash API Server
//!
//! REST backend for the business/sales dashboard.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings
//! salesdash-server
//!
//! # Start with custom config
//! salesdash-server --config /path/to/config.toml
//!
//! # Start with environment overrides
//! SALESDASH__SERVER__PORT=8080 salesdash-server
//! ```

mod config;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use salesdash_api::{create_router, ApiConfig, AppState};
use salesdash_auth::{AuthConfig, AuthService};
use salesdash_db::{Database, DatabaseConfig as DbConfig, PoolSettings};

use crate::config::ServerConfig;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Salesdash API server
#[derive(Parser, Debug)]
#[command(name = "salesdash-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long, env = "SALESDASH_CONFIG")]
    config: Option<String>,

    /// Host to bind to
    #[arg(long, env = "SALESDASH_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "SALESDASH_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "SALESDASH_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Log format (json, pretty)
    #[arg(long, env = "SALESDASH_LOG_FORMAT", default_value = "pretty")]
    log_format: String,
}

// =============================================================================
// Main Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut server_config = ServerConfig::load(args.config.as_deref())?;

    // Override with CLI arguments
    if let Some(host) = args.host {
        server_config.server.host = host;
    }
    if let Some(port) = args.port {
        server_config.server.port = port;
    }
    server_config.logging.level = args.log_level;
    server_config.logging.format = args.log_format;

    init_logging(&server_config.logging)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Salesdash API server"
    );

    // Initialize database
    let db = init_database(&server_config).await?;

    // Initialize auth service
    let auth = init_auth(&server_config, &db)?;

    // Create application state
    let state = Arc::new(AppState::new(
        db,
        auth,
        server_config.api.secure_cookies,
    ));

    let api_config = ApiConfig {
        cors_origin: server_config.api.cors_origin.clone(),
        enable_tracing: server_config.api.enable_tracing,
    };

    let app = create_router(state, api_config);

    let addr = server_config.server.socket_addr();

    tracing::info!(
        host = %server_config.server.host,
        port = %server_config.server.port,
        "Server listening"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(server_config.server.shutdown_timeout()))
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

// =============================================================================
// Initialization Functions
// =============================================================================

/// Initialize tracing/logging
fn init_logging(config: &config::LoggingConfig) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            subscriber.with(fmt::layer().json().with_target(true)).init();
        }
        _ => {
            subscriber
                .with(fmt::layer().pretty().with_target(true))
                .init();
        }
    }

    Ok(())
}

/// Initialize database connection
async fn init_database(config: &ServerConfig) -> anyhow::Result<Arc<Database>> {
    tracing::info!("Connecting to database...");

    let db_config = DbConfig {
        postgres_url: config.database.postgres_url.clone(),
        redis_url: config.database.redis_url.clone(),
        pool: PoolSettings {
            max_connections: config.database.max_connections,
            min_connections: config.database.min_connections,
            acquire_timeout: Duration::from_secs(config.database.connect_timeout_secs),
        },
    };

    let db = Database::connect(&db_config).await?;

    if config.database.run_migrations {
        db.migrate().await?;
    }

    let health = db.health_check().await?;
    if !health.healthy {
        anyhow::bail!("Database health check failed");
    }

    tracing::info!(
        postgres = health.postgres,
        redis = health.redis,
        "Database health check passed"
    );

    Ok(Arc::new(db))
}

/// Initialize the authentication service
fn init_auth(config: &ServerConfig, db: &Arc<Database>) -> anyhow::Result<Arc<AuthService>> {
    tracing::info!("Initializing authentication service...");

    let mut auth_config = AuthConfig::from_env();
    auth_config.jwt.access_secret = config.auth.jwt_secret.clone();
    auth_config.jwt.refresh_secret = config.auth.refresh_token_secret.clone();
    auth_config.jwt.issuer = config.auth.jwt_issuer.clone();
    auth_config.jwt.access_token_lifetime =
        Duration::from_secs(config.auth.access_token_lifetime_secs);
    auth_config.jwt.refresh_token_lifetime =
        Duration::from_secs(config.auth.refresh_token_lifetime_secs);

    if let Err(errors) = auth_config.validate() {
        anyhow::bail!("Invalid auth configuration: {}", errors.join("; "));
    }

    let auth = AuthService::new(
        Arc::new(db.user_repo()),
        Arc::new(db.sessions()),
        auth_config,
    );

    tracing::info!("Authentication service initialized");

    Ok(Arc::new(auth))
}

// =============================================================================
// Graceful Shutdown
// =============================================================================

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    tracing::info!(
        timeout_secs = timeout.as_secs(),
        "Waiting for in-flight requests to complete..."
    );

    tokio::time::sleep(timeout).await;
}
