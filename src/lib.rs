//! Feedwatch - A state-managed HTTP server for timing infant feeding sessions
//!
//! This library provides a stopwatch for one feeding session, driven over
//! HTTP by a feeding-entry client. Stopping the stopwatch commits the
//! whole-minute duration into a session draft the client reads back.

pub mod config;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
