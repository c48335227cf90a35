//! Committed-duration listener background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info};

use crate::state::AppState;

/// Background task that applies committed durations to the session draft.
///
/// The stopwatch publishes a committed value on stop instead of writing into
/// the draft directly; this listener owns the draft-side write.
pub async fn commit_listener_task(state: Arc<AppState>) {
    info!("Starting commit listener task");

    let mut commits = state.subscribe_commits();

    loop {
        match commits.recv().await {
            Ok(commit) => {
                match state.apply_commit(&commit) {
                    Ok(draft) => {
                        info!(
                            "Session draft updated: {} minute(s) from the stopwatch",
                            commit.duration_minutes
                        );
                        debug!("Draft now: {:?}", draft);
                    }
                    Err(e) => {
                        error!("Failed to apply committed duration to draft: {}", e);
                    }
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                // Only the newest commit matters; stale ones are superseded.
                debug!("Commit listener lagged, skipped {} event(s)", skipped);
            }
            Err(RecvError::Closed) => {
                debug!("Commit channel closed, listener exiting");
                return;
            }
        }
    }
}
