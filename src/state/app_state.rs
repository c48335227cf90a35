//! Main application state management

use std::{
    fmt,
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{info, warn};

use super::{CommittedDuration, SessionDraft, TimerState};

/// Rejection reasons for a manually typed duration.
///
/// The draft validates typed values; stopwatch commits are never rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    /// The stopwatch is driving the field; manual edits are locked out
    TimerRunning,
    /// Typed value outside the accepted range
    OutOfRange { minutes: u64, max: u64 },
    /// Lock poisoning or channel failure
    Internal(String),
}

impl fmt::Display for DurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationError::TimerRunning => {
                write!(f, "duration field is read-only while the stopwatch is running")
            }
            DurationError::OutOfRange { minutes, max } => {
                write!(f, "duration {} minutes is outside the accepted range 1-{}", minutes, max)
            }
            DurationError::Internal(msg) => write!(f, "{}", msg),
        }
    }
}

/// Main application state that manages the stopwatch and the session draft
#[derive(Debug)]
pub struct AppState {
    /// The stopwatch for the current feeding session
    pub timer: Arc<Mutex<TimerState>>,
    /// The feeding entry draft the stopwatch commits into
    pub session: Arc<Mutex<SessionDraft>>,
    /// Upper bound for manually typed durations, in minutes
    pub max_session_minutes: u64,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last command tracking
    pub last_command: Arc<Mutex<Option<String>>>,
    pub last_command_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Stopwatch snapshot feed; the ticker task waits on this to learn
    /// when to run and when a command cancelled the count
    pub timer_update_tx: watch::Sender<TimerState>,
    /// Keep one receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerState>,
    /// One-way committed-duration feed from the stopwatch to the draft
    pub commit_tx: broadcast::Sender<CommittedDuration>,
}

impl AppState {
    /// Create a new AppState with a zeroed stopwatch and an empty draft
    pub fn new(port: u16, host: String, max_session_minutes: u64) -> Self {
        let (timer_update_tx, timer_update_rx) = watch::channel(TimerState::new());
        let (commit_tx, _) = broadcast::channel(16);

        Self {
            timer: Arc::new(Mutex::new(TimerState::new())),
            session: Arc::new(Mutex::new(SessionDraft::new())),
            max_session_minutes,
            start_time: Instant::now(),
            port,
            host,
            last_command: Arc::new(Mutex::new(None)),
            last_command_time: Arc::new(Mutex::new(None)),
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
            commit_tx,
        }
    }

    /// Apply a command to the stopwatch and publish the resulting snapshot
    fn update_timer<F, R>(&self, command: &str, mutator: F) -> Result<(TimerState, R), String>
    where
        F: FnOnce(&mut TimerState) -> R,
    {
        let mut timer = self.timer.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        let outcome = mutator(&mut timer);
        let snapshot = timer.clone();
        drop(timer); // Release the lock early

        self.record_command(command);

        // Notify the ticker and any other snapshot watchers
        if self.timer_update_tx.send(snapshot.clone()).is_err() {
            warn!("No receivers for timer snapshot update");
        }

        Ok((snapshot, outcome))
    }

    /// Start or resume the stopwatch.
    /// Returns the snapshot and whether the command changed anything.
    pub fn start_timer(&self) -> Result<(TimerState, bool), String> {
        info!("Starting session stopwatch");
        self.update_timer("start", |timer| timer.start())
    }

    /// Pause the stopwatch, retaining the count
    pub fn pause_timer(&self) -> Result<(TimerState, bool), String> {
        info!("Pausing session stopwatch");
        self.update_timer("pause", |timer| timer.pause())
    }

    /// Stop the stopwatch, committing the accumulated time.
    ///
    /// The captured duration is published on the commit feed for the draft
    /// listener; it is also returned so the caller can echo it without
    /// re-reading the now-zeroed stopwatch.
    pub fn stop_timer(&self) -> Result<(TimerState, Option<CommittedDuration>), String> {
        info!("Stopping session stopwatch");
        let (snapshot, committed) = self.update_timer("stop", |timer| timer.stop())?;

        if let Some(commit) = &committed {
            info!(
                "Committed {} minute(s) ({} seconds) to the session draft",
                commit.duration_minutes, commit.elapsed_seconds
            );
            if self.commit_tx.send(commit.clone()).is_err() {
                warn!("No listener for committed duration; draft will not be updated");
            }
        }

        Ok((snapshot, committed))
    }

    /// Reset the stopwatch, discarding the accumulated time without a commit
    pub fn reset_timer(&self) -> Result<(TimerState, bool), String> {
        info!("Resetting session stopwatch");
        self.update_timer("reset", |timer| timer.reset())
    }

    /// Account one second of wall clock (ticker task only).
    /// Does not count as a client command.
    pub fn tick(&self) -> Result<TimerState, String> {
        let mut timer = self.timer.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        timer.tick();
        let snapshot = timer.clone();
        drop(timer);

        if self.timer_update_tx.send(snapshot.clone()).is_err() {
            warn!("No receivers for timer snapshot update");
        }

        Ok(snapshot)
    }

    /// Get the current stopwatch snapshot
    pub fn get_timer_state(&self) -> Result<TimerState, String> {
        self.timer.lock()
            .map(|timer| timer.clone())
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    /// Get the current session draft
    pub fn get_session(&self) -> Result<SessionDraft, String> {
        self.session.lock()
            .map(|session| session.clone())
            .map_err(|e| format!("Failed to lock session draft: {}", e))
    }

    /// Write a committed duration into the draft (commit listener task only)
    pub fn apply_commit(&self, commit: &CommittedDuration) -> Result<SessionDraft, String> {
        let mut session = self.session.lock()
            .map_err(|e| format!("Failed to lock session draft: {}", e))?;

        session.apply_commit(commit);
        Ok(session.clone())
    }

    /// Record a manually typed duration into the draft.
    ///
    /// Rejected while the stopwatch is running and outside 1..=max minutes.
    pub fn set_manual_duration(&self, minutes: u64) -> Result<SessionDraft, DurationError> {
        let running = self.get_timer_state()
            .map_err(DurationError::Internal)?
            .is_running();
        if running {
            return Err(DurationError::TimerRunning);
        }

        if minutes == 0 || minutes > self.max_session_minutes {
            return Err(DurationError::OutOfRange {
                minutes,
                max: self.max_session_minutes,
            });
        }

        let mut session = self.session.lock()
            .map_err(|e| DurationError::Internal(format!("Failed to lock session draft: {}", e)))?;

        info!("Setting manual duration of {} minute(s)", minutes);
        session.set_manual(minutes);
        let draft = session.clone();
        drop(session);

        self.record_command("manual-duration");
        Ok(draft)
    }

    /// Begin a fresh entry: clear the draft and zero the stopwatch.
    /// The discarded count is never committed.
    pub fn new_session(&self) -> Result<(TimerState, SessionDraft), String> {
        info!("Opening a fresh session draft");
        let (snapshot, _) = self.update_timer("new-session", |timer| timer.reset())?;

        let mut session = self.session.lock()
            .map_err(|e| format!("Failed to lock session draft: {}", e))?;
        session.clear();
        let draft = session.clone();

        Ok((snapshot, draft))
    }

    /// Subscribe to committed-duration events
    pub fn subscribe_commits(&self) -> broadcast::Receiver<CommittedDuration> {
        self.commit_tx.subscribe()
    }

    /// Subscribe to stopwatch snapshot updates
    pub fn timer_updates(&self) -> watch::Receiver<TimerState> {
        self.timer_update_tx.subscribe()
    }

    /// Update last command tracking
    fn record_command(&self, command: &str) {
        if let Ok(mut last_command) = self.last_command.lock() {
            *last_command = Some(command.to_string());
        }
        if let Ok(mut last_time) = self.last_command_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Get last command information
    pub fn get_last_command(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_command = self.last_command.lock().ok().and_then(|c| c.clone());
        let last_command_time = self.last_command_time.lock().ok().and_then(|t| *t);
        (last_command, last_command_time)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
