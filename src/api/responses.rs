//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{CommittedDuration, SessionDraft, TimerPhase, TimerState};

/// Stopwatch view rendered into responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerView {
    pub phase: TimerPhase,
    pub running: bool,
    pub elapsed_seconds: u64,
    /// `MM:SS`, minutes widening past two digits for long sessions
    pub display: String,
    /// Whole minutes, rounded up
    pub duration_minutes: u64,
}

impl From<&TimerState> for TimerView {
    fn from(timer: &TimerState) -> Self {
        Self {
            phase: timer.phase(),
            running: timer.is_running(),
            elapsed_seconds: timer.elapsed_seconds,
            display: timer.display(),
            duration_minutes: timer.duration_minutes(),
        }
    }
}

/// Request payload for PUT /session/duration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualDurationRequest {
    pub minutes: u64,
}

/// API response structure for stopwatch command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerView,
    /// Present only on a stop that committed a duration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub committed: Option<CommittedDuration>,
}

impl ApiResponse {
    /// Create a response whose status reflects the stopwatch phase
    pub fn for_timer(message: String, timer: &TimerState) -> Self {
        let status = match timer.phase() {
            TimerPhase::Stopped => "stopped",
            TimerPhase::Running => "running",
            TimerPhase::Paused => "paused",
        };
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            timer: TimerView::from(timer),
            committed: None,
        }
    }

    /// Attach the duration captured by a stop
    pub fn with_commit(mut self, committed: CommittedDuration) -> Self {
        self.committed = Some(committed);
        self
    }
}

/// API response structure for session draft endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub session: SessionDraft,
}

impl SessionResponse {
    /// Create a new session response
    pub fn new(status: String, message: String, session: SessionDraft) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            session,
        }
    }

    /// Create an ok response
    pub fn ok(message: String, session: SessionDraft) -> Self {
        Self::new("ok".to_string(), message, session)
    }

    /// Create a rejected response
    pub fn rejected(message: String, session: SessionDraft) -> Self {
        Self::new("rejected".to_string(), message, session)
    }
}

/// Enhanced status response with stopwatch and draft information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerView,
    pub session: SessionDraft,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_command: Option<String>,
    pub last_command_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
