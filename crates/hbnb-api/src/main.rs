//! hbnb API server entry point.
//!
//! Reads storage configuration from the `HBNB_*` environment, connects the
//! storage layer (creating the schema if needed), and serves the `/api/v1`
//! route group until Ctrl+C or SIGTERM.

mod http;
mod state;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hbnb_types::config::StorageConfig;

use crate::state::AppState;

/// REST API server for the hbnb catalog.
#[derive(Debug, Parser)]
#[command(name = "hbnb-api", version, about)]
struct Cli {
    /// Address to bind.
    #[arg(long, env = "HBNB_API_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on.
    #[arg(long, env = "HBNB_API_PORT", default_value_t = 5000)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = StorageConfig::from_env();
    let state = AppState::init(&config).await?;

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "hbnb API listening");

    let router = http::router::build_router(state.clone());

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Release the storage session on the way out.
    state.storage.lock().await.close();
    tracing::info!("server stopped");

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
