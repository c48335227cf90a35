//! Session ticker background task

use std::{sync::Arc, time::Duration};
use tracing::{debug, error, info};

use crate::state::AppState;

/// Background task that drives the stopwatch one second at a time.
///
/// Sleeps on the snapshot feed until a command starts the stopwatch, then
/// ticks once per second until a snapshot shows it no longer running. The
/// snapshot published by pause/stop/reset is the cancellation signal, so no
/// tick can land after a cancelling command has returned.
pub async fn session_ticker_task(state: Arc<AppState>) {
    info!("Starting session ticker task");

    let mut updates = state.timer_updates();

    loop {
        // Wait for a snapshot that shows the stopwatch running
        if !updates.borrow_and_update().is_running() {
            if updates.changed().await.is_err() {
                debug!("Timer snapshot channel closed, ticker exiting");
                return;
            }
            continue;
        }

        debug!("Stopwatch running, driving one-second ticks");

        let mut interval = tokio::time::interval(Duration::from_secs(1));
        // The interval's first tick completes immediately; consume it so the
        // first increment lands a full second after the start command.
        interval.tick().await;

        loop {
            tokio::select! {
                // One second of wall clock elapsed
                _ = interval.tick() => {
                    match state.tick() {
                        Ok(snapshot) => {
                            if !snapshot.is_running() {
                                break;
                            }
                            debug!("Tick: {} elapsed", snapshot.display());
                        }
                        Err(e) => {
                            error!("Failed to tick stopwatch: {}", e);
                            break;
                        }
                    }
                }

                // Command snapshot - check whether the count was cancelled
                changed = updates.changed() => {
                    match changed {
                        Ok(()) => {
                            if !updates.borrow_and_update().is_running() {
                                debug!("Stopwatch no longer running, cancelling ticks");
                                break;
                            }
                        }
                        Err(_) => {
                            debug!("Timer snapshot channel closed, ticker exiting");
                            return;
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState::new(0, "127.0.0.1".to_string(), 600))
    }

    /// Advance the paused test clock one second at a time, yielding so the
    /// ticker task gets polled between seconds.
    async fn advance_secs(seconds: u64) {
        for _ in 0..seconds {
            tokio::time::advance(Duration::from_secs(1)).await;
            for _ in 0..8 {
                tokio::task::yield_now().await;
            }
        }
    }

    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_counts_seconds_while_running() {
        let state = test_state();
        let ticker = tokio::spawn(session_ticker_task(Arc::clone(&state)));

        state.start_timer().unwrap();
        settle().await;
        advance_secs(5).await;

        assert_eq!(state.get_timer_state().unwrap().elapsed_seconds, 5);
        ticker.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_is_idle_until_started() {
        let state = test_state();
        let ticker = tokio::spawn(session_ticker_task(Arc::clone(&state)));

        settle().await;
        advance_secs(10).await;

        assert_eq!(state.get_timer_state().unwrap().elapsed_seconds, 0);
        ticker.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn pause_cancels_ticks_and_resume_continues() {
        let state = test_state();
        let ticker = tokio::spawn(session_ticker_task(Arc::clone(&state)));

        state.start_timer().unwrap();
        settle().await;
        advance_secs(3).await;

        state.pause_timer().unwrap();
        settle().await;
        advance_secs(10).await;
        assert_eq!(state.get_timer_state().unwrap().elapsed_seconds, 3);

        state.start_timer().unwrap();
        settle().await;
        advance_secs(2).await;
        assert_eq!(state.get_timer_state().unwrap().elapsed_seconds, 5);

        ticker.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn stop_and_reset_cancel_ticks() {
        let state = test_state();
        let ticker = tokio::spawn(session_ticker_task(Arc::clone(&state)));

        state.start_timer().unwrap();
        settle().await;
        advance_secs(61).await;

        let (_, committed) = state.stop_timer().unwrap();
        assert_eq!(committed.unwrap().duration_minutes, 2);

        settle().await;
        advance_secs(10).await;
        assert_eq!(state.get_timer_state().unwrap().elapsed_seconds, 0);

        state.start_timer().unwrap();
        settle().await;
        advance_secs(4).await;
        state.reset_timer().unwrap();

        settle().await;
        advance_secs(10).await;
        assert_eq!(state.get_timer_state().unwrap().elapsed_seconds, 0);

        ticker.abort();
    }
}
