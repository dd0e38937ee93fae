//! HTTP API module
//!
//! Bridges the pointer gesture and tap sources onto the timer over HTTP.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/tap", post(tap_handler))
        .route("/gesture/start", post(gesture_start_handler))
        .route("/gesture/sample", post(gesture_sample_handler))
        .route("/gesture/end", post(gesture_end_handler))
        .route("/duration", put(duration_handler))
        .route("/animation/stage", post(stage_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
