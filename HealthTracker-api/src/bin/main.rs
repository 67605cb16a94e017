use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use health_tracker_api::api::create_application;
use health_tracker_api::config::AppConfig;
use health_tracker_api::state::AppState;
use health_tracker_data::backend::BackendType;
use health_tracker_data::repository::create_repository;
use health_tracker_domain::services::{HealthDataService, HealthDataServiceTrait};

/// The main entry point for the HealthTracker API server
///
/// This function:
/// 1. Initializes environment variables from .env file
/// 2. Sets up tracing for logging
/// 3. Builds the record store repository from the configuration
/// 4. Loads the existing measurements
/// 5. Creates and starts the Axum web application
/// 6. Handles graceful shutdown
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    if dotenv().is_err() {
        eprintln!("Warning: .env file not found or couldn't be read. Using environment variables.");
    }

    // Initialize tracing for structured logging
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_span_events(FmtSpan::CLOSE)
                .with_target(false)
                .with_ansi(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stdout),
        )
        .with(env_filter)
        .init();

    info!("Starting HealthTracker API server");

    let config = AppConfig::from_env().context("invalid configuration")?;

    match config.backend.backend_type {
        BackendType::Rest => info!(
            "Using record store at {} (table {})",
            config.backend.base_url.as_deref().unwrap_or_default(),
            config.backend.table
        ),
        BackendType::InMemory => warn!("Using in-memory record store; measurements are lost on restart"),
    }

    let repository = create_repository(&config.backend).context("failed to create record store client")?;
    let health_data = Arc::new(HealthDataService::new(repository));

    // A failed initial load is not fatal; the list stays empty until a reload succeeds
    match health_data.load().await {
        Ok(count) => info!("Initial load complete: {} measurements", count),
        Err(e) => error!("Initial load failed: {}", e),
    }

    let state = AppState::new(health_data).with_environment(config.environment.clone());
    let app = create_application(state);

    let addr = config.listen_addr();
    info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    // Serve the application with graceful shutdown support
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Sets up a signal handler for graceful shutdown
///
/// Resolves on CTRL+C or, on Unix systems, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
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

    info!("Shutting down server...");
}
