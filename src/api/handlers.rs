//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::state::{AppState, DurationError};
use super::responses::{
    ApiResponse, HealthResponse, ManualDurationRequest, SessionResponse, StatusResponse,
};

/// Handle POST /start - Start or resume the stopwatch
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.start_timer() {
        Ok((timer, changed)) => {
            let message = if !changed {
                "Stopwatch already running".to_string()
            } else if timer.elapsed_seconds > 0 {
                format!("Stopwatch resumed at {}", timer.display())
            } else {
                "Stopwatch started".to_string()
            };
            info!("Start endpoint called - {}", message);
            Ok(Json(ApiResponse::for_timer(message, &timer)))
        }
        Err(e) => {
            error!("Failed to start stopwatch: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /pause - Pause the stopwatch, retaining the count
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.pause_timer() {
        Ok((timer, changed)) => {
            let message = if changed {
                format!("Stopwatch paused at {}", timer.display())
            } else {
                "Stopwatch was not running".to_string()
            };
            info!("Pause endpoint called - {}", message);
            Ok(Json(ApiResponse::for_timer(message, &timer)))
        }
        Err(e) => {
            error!("Failed to pause stopwatch: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /stop - Commit the accumulated time and zero the stopwatch.
///
/// The response echoes the captured duration; clients render the summary
/// from it rather than re-reading the zeroed stopwatch.
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.stop_timer() {
        Ok((timer, Some(committed))) => {
            let message = format!(
                "Committed {} minute(s) to the session draft",
                committed.duration_minutes
            );
            info!("Stop endpoint called - {}", message);
            Ok(Json(ApiResponse::for_timer(message, &timer).with_commit(committed)))
        }
        Ok((timer, None)) => {
            info!("Stop endpoint called - nothing to commit");
            Ok(Json(ApiResponse::for_timer(
                "Nothing to commit, stopwatch is at zero".to_string(),
                &timer,
            )))
        }
        Err(e) => {
            error!("Failed to stop stopwatch: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /reset - Discard the accumulated time without committing
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.reset_timer() {
        Ok((timer, changed)) => {
            let message = if changed {
                "Stopwatch reset, accumulated time discarded".to_string()
            } else {
                "Stopwatch already at zero".to_string()
            };
            info!("Reset endpoint called - {}", message);
            Ok(Json(ApiResponse::for_timer(message, &timer)))
        }
        Err(e) => {
            error!("Failed to reset stopwatch: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /session - Return the current session draft
pub async fn session_handler(State(state): State<Arc<AppState>>) -> Result<Json<SessionResponse>, StatusCode> {
    match state.get_session() {
        Ok(session) => Ok(Json(SessionResponse::ok(
            "Current session draft".to_string(),
            session,
        ))),
        Err(e) => {
            error!("Failed to get session draft: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle PUT /session/duration - Manually typed duration.
///
/// Rejected with 409 while the stopwatch is driving the field and with 422
/// when the value is outside the accepted range.
pub async fn manual_duration_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ManualDurationRequest>,
) -> (StatusCode, Json<SessionResponse>) {
    match state.set_manual_duration(payload.minutes) {
        Ok(session) => {
            info!("Manual duration of {} minute(s) recorded", payload.minutes);
            (
                StatusCode::OK,
                Json(SessionResponse::ok(
                    format!("Duration set to {} minute(s)", payload.minutes),
                    session,
                )),
            )
        }
        Err(err) => {
            let status = match &err {
                DurationError::TimerRunning => StatusCode::CONFLICT,
                DurationError::OutOfRange { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                DurationError::Internal(e) => {
                    error!("Failed to set manual duration: {}", e);
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            let session = state.get_session().unwrap_or_default();
            (
                status,
                Json(SessionResponse::rejected(err.to_string(), session)),
            )
        }
    }
}

/// Handle POST /session/new - Fresh draft, stopwatch zeroed without a commit
pub async fn new_session_handler(State(state): State<Arc<AppState>>) -> Result<Json<SessionResponse>, StatusCode> {
    match state.new_session() {
        Ok((_, session)) => {
            info!("New session endpoint called - draft cleared");
            Ok(Json(SessionResponse::ok(
                "Fresh session draft opened".to_string(),
                session,
            )))
        }
        Err(e) => {
            error!("Failed to open a fresh session: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return current stopwatch and draft status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.get_timer_state() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let session = match state.get_session() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get session draft: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_command, last_command_time) = state.get_last_command();

    Ok(Json(StatusResponse {
        timer: (&timer).into(),
        session,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_command,
        last_command_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
