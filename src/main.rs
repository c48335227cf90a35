//! Feedwatch - A state-managed HTTP server for timing infant feeding sessions
//!
//! This is the main entry point for the feedwatch application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use feedwatch::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::{commit_listener_task, session_ticker_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("feedwatch={},tower_http=info", config.log_level()))
        .init();

    info!("Starting feedwatch server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, max_minutes={}",
          config.host, config.port, config.max_minutes);

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), config.max_minutes));

    // Start the ticker background task that drives the stopwatch
    let ticker_state = Arc::clone(&state);
    tokio::spawn(async move {
        session_ticker_task(ticker_state).await;
    });

    // Start the listener that applies committed durations to the draft
    let listener_state = Arc::clone(&state);
    tokio::spawn(async move {
        commit_listener_task(listener_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start            - Start or resume the stopwatch");
    info!("  POST /pause            - Pause the stopwatch");
    info!("  POST /stop             - Commit the duration and zero the stopwatch");
    info!("  POST /reset            - Discard the count without committing");
    info!("  GET  /session          - Current session draft");
    info!("  PUT  /session/duration - Manually typed duration");
    info!("  POST /session/new      - Fresh draft, zeroed stopwatch");
    info!("  GET  /status           - Stopwatch and draft status");
    info!("  GET  /health           - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
