//! Circular Timer - a radial-dial countdown timer
//!
//! This is the main entry point for the headless circular-timer host.

use std::sync::Arc;
use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use circular_timer::{
    api::create_router,
    config::Config,
    feedback::{LogAnimation, LogFeedback},
    state::AppState,
    tasks::{countdown_ticker_task, feedback_dispatch_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("circular_timer={},tower_http=info", config.log_level()))
        .init();

    let timer_config = config.timer_config().context("Invalid timer configuration")?;

    info!("Starting circular-timer v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, sensitivity={}, minute threshold={}, tick={:?}, max={}min",
        config.host,
        config.port,
        timer_config.dial_sensitivity,
        timer_config.minute_threshold,
        timer_config.tick_interval,
        timer_config.max_minutes
    );

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), timer_config));

    // Subscribe before serving so no start notification is missed
    let ticker_events = state.subscribe();
    let feedback_events = state.subscribe();

    tokio::spawn(countdown_ticker_task(Arc::clone(&state), ticker_events));
    tokio::spawn(feedback_dispatch_task(
        feedback_events,
        LogAnimation::default(),
        LogFeedback::default(),
    ));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /tap              - Start or stop the countdown");
    info!("  POST /gesture/start    - Begin a dial drag");
    info!("  POST /gesture/sample   - Pointer position {{x, y, timestamp_ms?}}");
    info!("  POST /gesture/end      - End a dial drag");
    info!("  PUT  /duration         - Set minutes directly {{minutes}}");
    info!("  POST /animation/stage  - Animation stage notification {{stage}}");
    info!("  GET  /status           - Current timer state");
    info!("  GET  /health           - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);
    let shutdown = async {
        if let Err(e) = shutdown_signal().await {
            // Keep serving; the process can still be killed
            tracing::error!("Failed to install signal handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
