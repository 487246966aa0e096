//! Credibility Server
//!
//! HTTP front end for casting credibility votes on users and reading the
//! tally. Votes are decided by `credibility-domain` and persisted by
//! `credibility-store`.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod payload;

use axum::Router as AxumRouter;
use config::ServerConfig;
use credibility_store::{SqliteStore, StoreError};
use handlers::{create_router, AppState};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Store could not be opened
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Logging setup error
    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over the configured `log_level`.
pub fn init_tracing(config: &ServerConfig) -> Result<(), ServerError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| ServerError::Logging(e.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| ServerError::Logging(e.to_string()))
}

/// Router with request tracing and the configured store wait limit applied
pub fn build_app(state: AppState, config: &ServerConfig) -> AxumRouter {
    create_router(state.with_request_timeout(config.request_timeout()))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server
///
/// Opens the store, binds, and serves until Ctrl-C or SIGTERM. In-flight
/// requests get `shutdown_grace_secs` to finish before the server gives up.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("Starting credibility server");
    info!("Bind address: {}", config.bind_addr());
    info!("Database: {}", config.database_path);
    info!("Request timeout: {} seconds", config.request_timeout_secs);

    let store = SqliteStore::new(&config.database_path)?;
    let app = build_app(AppState::new(store), &config);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    let (stopping_tx, stopping_rx) = tokio::sync::oneshot::channel::<()>();
    let serve = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = stopping_tx.send(());
    });
    let mut server = tokio::spawn(async move { serve.await });

    let grace = config.shutdown_grace();
    let drain_deadline = async move {
        // Sender dropped means the server already stopped on its own.
        if stopping_rx.await.is_ok() {
            tokio::time::sleep(grace).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        joined = &mut server => {
            joined
                .map_err(|e| ServerError::Server(e.to_string()))?
                .map_err(|e| ServerError::Server(e.to_string()))?;
        }
        _ = drain_deadline => {
            warn!("Shutdown grace period of {:?} elapsed, dropping open connections", grace);
            server.abort();
        }
    }

    info!("Shutting down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
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

    info!("Shutdown signal received, draining connections");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config() {
        let config = ServerConfig::default_test_config();
        assert_eq!(config.request_timeout_secs, 15);
        assert_eq!(config.shutdown_grace_secs, 15);
    }

    #[tokio::test]
    async fn test_start_server_rejects_bad_database_path() {
        let mut config = ServerConfig::default_test_config();
        config.database_path = "/nonexistent/dir/votes.db".to_string();

        let result = start_server(config).await;
        assert!(matches!(result, Err(ServerError::Store(_))));
    }
}
