//! State management module
//!
//! This module contains all state-related structures and their management logic.

pub mod session_state;
pub mod app_state;
pub mod timer_state;

// Re-export main types
pub use session_state::{DurationSource, SessionDraft};
pub use app_state::{AppState, DurationError};
pub use timer_state::{CommittedDuration, TimerPhase, TimerState};
