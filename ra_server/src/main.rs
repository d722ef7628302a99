//! Remote authentication server.
//!
//! Accounts persist in SQLite; logins mint signed expiring session
//! tokens that gate the protected route.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Error;
use chrono::Duration;
use pico_args::Arguments;
use remote_auth::{
    auth::{AuthManager, TokenService},
    db::{Database, SqliteCredentialStore},
};

use ra_server::{api, config::ServerConfig, logging, metrics};

const HELP: &str = "\
Run a remote authentication server

USAGE:
  ra_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:50051]
  --db-url     URL         Database connection string  [default: env DATABASE_URL or sqlite:users.db]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:50051)
  DATABASE_URL             SQLite connection string
  JWT_SECRET               Token signing secret (required)
  TOKEN_TTL_SECS           Session token lifetime in seconds [default: 600]
  METRICS_BIND             Optional Prometheus exporter bind address
  (See .env.example for all configuration options)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let bind_override: Option<SocketAddr> = pargs.opt_value_from_str("--bind")?;
    let database_url_override: Option<String> = pargs.opt_value_from_str("--db-url")?;

    logging::init();

    // Refuses to start without a signing secret.
    let config = ServerConfig::from_env(bind_override, database_url_override)
        .map_err(|e| anyhow::anyhow!("Configuration error: {e}"))?;

    tracing::info!("Starting authentication server at {}", config.bind);

    tracing::info!("Opening database: {}", config.database.database_url);
    let db = Database::new(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to open database: {}", e))?;

    tracing::info!("Database ready");

    let store = Arc::new(SqliteCredentialStore::new(db.pool().clone()));
    let tokens = TokenService::new(&config.security.jwt_secret)
        .map_err(|e| anyhow::anyhow!("Failed to create token service: {}", e))?;
    let auth_manager = Arc::new(AuthManager::new(
        store,
        tokens,
        Duration::seconds(config.token_ttl_secs),
    ));

    if let Some(addr) = config.metrics_bind {
        metrics::init_metrics(addr).map_err(|e| anyhow::anyhow!(e))?;
        tracing::info!("Prometheus metrics exporter listening on {}", addr);
    }

    let api_state = api::AppState {
        auth_manager,
        pool: db.pool().clone(),
    };

    let app = api::create_router(api_state);

    tracing::info!("Starting HTTP server on {}", config.bind);
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    tracing::info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    tracing::info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
}
