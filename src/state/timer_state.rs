//! Stopwatch state structure and transitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle phase of the stopwatch, derived from the raw state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    /// Zeroed and not counting
    Stopped,
    /// Counting up once per second
    Running,
    /// Holding a non-zero count, not counting
    Paused,
}

/// Duration captured by `stop()` before the counter is zeroed.
///
/// This is the only channel through which accumulated time leaves the
/// stopwatch; callers must keep this value rather than re-reading the
/// timer after stopping it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommittedDuration {
    /// Whole minutes, rounded up (61 seconds commits as 2 minutes)
    pub duration_minutes: u64,
    /// Raw second count at the moment of the stop
    pub elapsed_seconds: u64,
    pub committed_at: DateTime<Utc>,
}

/// Stopwatch state for one feeding session.
///
/// All operations outside their preconditions (double-start, stop at zero,
/// pause while stopped) are safe no-ops, never errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerState {
    pub elapsed_seconds: u64,
    pub running: bool,
}

impl TimerState {
    /// Create a new zeroed, stopped stopwatch
    pub fn new() -> Self {
        Self {
            elapsed_seconds: 0,
            running: false,
        }
    }

    /// Begin or resume counting. Returns false if already running.
    ///
    /// Resuming from a pause continues from the retained count.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// Account one whole second of wall clock. Increments only while running.
    pub fn tick(&mut self) -> bool {
        if self.running {
            self.elapsed_seconds += 1;
            true
        } else {
            false
        }
    }

    /// Stop counting, retaining the accumulated seconds.
    /// Returns false if the stopwatch was not running.
    pub fn pause(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        true
    }

    /// Commit the accumulated time and zero the stopwatch.
    ///
    /// Returns the captured duration, or `None` when nothing has accumulated
    /// (stopping at zero commits nothing).
    pub fn stop(&mut self) -> Option<CommittedDuration> {
        if self.elapsed_seconds == 0 {
            self.running = false;
            return None;
        }
        let committed = CommittedDuration {
            duration_minutes: self.duration_minutes(),
            elapsed_seconds: self.elapsed_seconds,
            committed_at: Utc::now(),
        };
        self.elapsed_seconds = 0;
        self.running = false;
        Some(committed)
    }

    /// Discard the accumulated time and zero the stopwatch.
    /// Commits nothing. Returns false if already zeroed and stopped.
    pub fn reset(&mut self) -> bool {
        if self.elapsed_seconds == 0 && !self.running {
            return false;
        }
        self.elapsed_seconds = 0;
        self.running = false;
        true
    }

    /// Check if the stopwatch is counting
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Derive the current phase
    pub fn phase(&self) -> TimerPhase {
        if self.running {
            TimerPhase::Running
        } else if self.elapsed_seconds > 0 {
            TimerPhase::Paused
        } else {
            TimerPhase::Stopped
        }
    }

    /// Accumulated time in whole minutes, rounded up.
    /// Derived on demand so it can never diverge from the second count.
    pub fn duration_minutes(&self) -> u64 {
        self.elapsed_seconds.div_ceil(60)
    }

    /// Render the count as `MM:SS`, both zero-padded.
    /// Minutes widen past two digits rather than wrapping.
    pub fn display(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.elapsed_seconds / 60,
            self.elapsed_seconds % 60
        )
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_for(timer: &mut TimerState, seconds: u64) {
        for _ in 0..seconds {
            timer.tick();
        }
    }

    #[test]
    fn new_timer_is_zeroed_and_stopped() {
        let timer = TimerState::new();
        assert_eq!(timer.elapsed_seconds, 0);
        assert!(!timer.is_running());
        assert_eq!(timer.phase(), TimerPhase::Stopped);
    }

    #[test]
    fn start_begins_counting() {
        let mut timer = TimerState::new();
        assert!(timer.start());
        assert_eq!(timer.phase(), TimerPhase::Running);
        run_for(&mut timer, 3);
        assert_eq!(timer.elapsed_seconds, 3);
    }

    #[test]
    fn double_start_is_a_noop() {
        let mut timer = TimerState::new();
        timer.start();
        run_for(&mut timer, 5);
        assert!(!timer.start());
        assert_eq!(timer.elapsed_seconds, 5);
        assert!(timer.is_running());
    }

    #[test]
    fn ticks_are_ignored_while_not_running() {
        let mut timer = TimerState::new();
        assert!(!timer.tick());
        assert_eq!(timer.elapsed_seconds, 0);

        timer.start();
        run_for(&mut timer, 2);
        timer.pause();
        run_for(&mut timer, 10);
        assert_eq!(timer.elapsed_seconds, 2);
    }

    #[test]
    fn pause_retains_count_and_resume_continues() {
        let mut timer = TimerState::new();
        timer.start();
        run_for(&mut timer, 40);
        assert!(timer.pause());
        assert_eq!(timer.phase(), TimerPhase::Paused);
        assert_eq!(timer.elapsed_seconds, 40);

        assert!(timer.start());
        run_for(&mut timer, 25);
        assert_eq!(timer.elapsed_seconds, 65);
    }

    #[test]
    fn pause_when_stopped_is_a_noop() {
        let mut timer = TimerState::new();
        assert!(!timer.pause());
        assert_eq!(timer.phase(), TimerPhase::Stopped);
    }

    #[test]
    fn pause_resume_cycles_never_lose_seconds() {
        let mut timer = TimerState::new();
        for _ in 0..4 {
            timer.start();
            run_for(&mut timer, 7);
            timer.pause();
        }
        assert_eq!(timer.elapsed_seconds, 28);
    }

    #[test]
    fn stop_commits_ceiling_minutes_and_zeroes() {
        let mut timer = TimerState::new();
        timer.start();
        run_for(&mut timer, 61);

        let committed = timer.stop().expect("accumulated time should commit");
        assert_eq!(committed.duration_minutes, 2);
        assert_eq!(committed.elapsed_seconds, 61);
        assert_eq!(timer.elapsed_seconds, 0);
        assert!(!timer.is_running());
        assert_eq!(timer.phase(), TimerPhase::Stopped);
    }

    #[test]
    fn stop_works_from_paused() {
        let mut timer = TimerState::new();
        timer.start();
        run_for(&mut timer, 30);
        timer.pause();

        let committed = timer.stop().expect("accumulated time should commit");
        assert_eq!(committed.duration_minutes, 1);
        assert_eq!(timer.elapsed_seconds, 0);
    }

    #[test]
    fn stop_at_zero_commits_nothing() {
        let mut timer = TimerState::new();
        assert!(timer.stop().is_none());
        assert_eq!(timer.elapsed_seconds, 0);
        assert!(!timer.is_running());

        // Started but never ticked: still nothing to commit.
        timer.start();
        assert!(timer.stop().is_none());
        assert!(!timer.is_running());
    }

    #[test]
    fn reset_discards_without_committing() {
        let mut timer = TimerState::new();
        timer.start();
        run_for(&mut timer, 90);
        assert!(timer.reset());
        assert_eq!(timer.elapsed_seconds, 0);
        assert!(!timer.is_running());

        // Resetting an already-reset stopwatch is a safe no-op.
        assert!(!timer.reset());
        assert_eq!(timer.phase(), TimerPhase::Stopped);
    }

    #[test]
    fn ceiling_minutes_table() {
        let mut timer = TimerState::new();
        assert_eq!(timer.duration_minutes(), 0);

        for (seconds, minutes) in [(1, 1), (59, 1), (60, 1), (61, 2), (125, 3)] {
            timer.elapsed_seconds = seconds;
            assert_eq!(timer.duration_minutes(), minutes, "at {} seconds", seconds);
        }
    }

    #[test]
    fn display_table() {
        let mut timer = TimerState::new();
        for (seconds, rendered) in [
            (0, "00:00"),
            (5, "00:05"),
            (65, "01:05"),
            (3605, "60:05"),
            (7387, "123:07"),
        ] {
            timer.elapsed_seconds = seconds;
            assert_eq!(timer.display(), rendered, "at {} seconds", seconds);
        }
    }

    #[test]
    fn full_session_scenario() {
        let mut timer = TimerState::new();
        timer.start();
        run_for(&mut timer, 125);

        assert_eq!(timer.elapsed_seconds, 125);
        assert_eq!(timer.display(), "02:05");
        assert_eq!(timer.duration_minutes(), 3);

        let committed = timer.stop().expect("accumulated time should commit");
        assert_eq!(committed.duration_minutes, 3);
        assert_eq!(committed.elapsed_seconds, 125);
        assert_eq!(timer.elapsed_seconds, 0);

        // No ticks land after the stop until the next start.
        run_for(&mut timer, 10);
        assert_eq!(timer.elapsed_seconds, 0);
    }
}
