//! HTTP endpoint handlers

use std::{sync::Arc, time::Duration};
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{debug, error};

use crate::{
    dial::Point,
    state::{AppState, StateError, TimerSnapshot},
};
use super::responses::{
    ApiResponse, DurationRequest, HealthResponse, SampleRequest, StageRequest, StatusResponse,
};

type HandlerResult = Result<Json<ApiResponse>, StatusCode>;

fn respond(what: &str, message: &str, result: Result<TimerSnapshot, StateError>) -> HandlerResult {
    match result {
        Ok(timer) => Ok(Json(ApiResponse::new(message, timer))),
        Err(e) => {
            error!("Failed to handle {}: {}", what, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /tap - Start when idle, stop when running
pub async fn tap_handler(State(state): State<Arc<AppState>>) -> HandlerResult {
    let result = state.tap();
    let message = match &result {
        Ok(timer) if timer.playing => "Countdown started",
        Ok(timer) if timer.remaining_seconds > 0.0 => "Countdown stopped",
        _ => "Nothing to count down",
    };
    respond("tap", message, result)
}

/// Handle POST /gesture/start - Begin a dial drag
pub async fn gesture_start_handler(State(state): State<Arc<AppState>>) -> HandlerResult {
    respond("gesture start", "Gesture started", state.gesture_start())
}

/// Handle POST /gesture/sample - One pointer position during a drag
pub async fn gesture_sample_handler(
    State(state): State<Arc<AppState>>,
    Json(sample): Json<SampleRequest>,
) -> HandlerResult {
    debug!("Gesture sample at ({}, {})", sample.x, sample.y);
    let timestamp = sample.timestamp_ms.map(Duration::from_millis);
    respond(
        "gesture sample",
        "Sample applied",
        state.gesture_sample(Point::new(sample.x, sample.y), timestamp),
    )
}

/// Handle POST /gesture/end - Finish a dial drag
pub async fn gesture_end_handler(State(state): State<Arc<AppState>>) -> HandlerResult {
    respond("gesture end", "Gesture ended", state.gesture_end())
}

/// Handle PUT /duration - Set the duration directly while not running
pub async fn duration_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DurationRequest>,
) -> HandlerResult {
    respond("set duration", "Duration updated", state.set_duration(request.minutes))
}

/// Handle POST /animation/stage - Stage notification from the dial animation
pub async fn stage_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StageRequest>,
) -> StatusCode {
    state.record_stage(request.stage);
    StatusCode::NO_CONTENT
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.get_snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        config: state.config.clone(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
