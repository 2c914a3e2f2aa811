//! # Ventas API Server
//!
//! Serves the sales REST API.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load ApiConfig ──► ConnectionProvider ──► ensure_schema ──► serve      │
//! │                                                   │                     │
//! │                                     Ctrl+C / SIGTERM ──► graceful stop  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ventas_api::{router, ApiConfig, AppState};
use ventas_db::{schema, ConnectionProvider};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ventas_api=debug,ventas_db=debug,sqlx=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!("Starting Ventas API server...");

    let config = ApiConfig::load()?;
    let provider = ConnectionProvider::new(config.db.clone())?;
    info!(
        addr = %config.bind_address(),
        db_path = %provider.config().database_path.display(),
        busy_timeout_ms = provider.config().busy_timeout.as_millis() as u64,
        "Configuration loaded"
    );

    schema::ensure_schema(&provider).await?;

    let app = router(AppState {
        sales: provider.sales(),
    });

    let listener = TcpListener::bind(config.bind_address()).await?;
    info!(addr = %config.bind_address(), "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
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
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
