//! Daocean query service binary.

use std::path::Path;
use std::sync::Arc;

use daocean_query::{create_router, AppState, Config};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Daocean query service");

    // Missing sources fall back to defaults; parse errors are fatal.
    let config = Config::load().unwrap_or_else(|e| {
        error!(error = %e, "FATAL: Config error, fix DAOCEAN_* env vars or daocean.toml");
        std::process::exit(1);
    });

    info!(
        bind = %config.bind_address,
        contract = config.contract_address.as_deref().unwrap_or("any"),
        "Configuration loaded"
    );

    let bind_address = config.bind_address.clone();
    let replay_path = config.replay_path.clone();
    let state = Arc::new(AppState::new(config));

    if let Some(path) = replay_path {
        let blocks = state.replay(Path::new(&path))?;
        info!(blocks, "Replayed blocks before serving");
    }

    let app = create_router(state.clone());

    info!(address = %bind_address, "Listening");

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let last_block = state.indexer().ok().and_then(|i| i.last_block());
    info!(?last_block, "Query service shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
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
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, shutting down..."),
        _ = terminate => info!("Received SIGTERM, shutting down..."),
    }
}
