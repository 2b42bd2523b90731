//! Portfolio API Service
//!
//! REST API for the portfolio content and contact-form submissions

use anyhow::{Context, Result};
use portfolio_api::{create_router, AppState, Config, PortfolioContent};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portfolio_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Portfolio API Service");

    let config = Config::from_env().context("Failed to load configuration")?;
    info!("Configuration loaded:");
    info!("  Address: {}", config.api_address());
    info!("  Storage backend: {:?}", config.storage_backend);

    let content = match &config.content_path {
        Some(path) => PortfolioContent::from_file(path)?,
        None => PortfolioContent::builtin()?,
    };
    info!(
        "Portfolio content ready: {} services, {} testimonials",
        content.services.len(),
        content.testimonials.len()
    );

    let store = config.connect_store().await?;

    let state = AppState::new(content, store);
    let app = create_router(state);

    let addr = config.api_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Portfolio API running on http://{}", addr);

    // The router owns the only handle to the store; it is dropped when serve returns
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Portfolio API stopped, storage connection closed");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    info!("Received shutdown signal");
}
