//! Session draft structure - the feeding entry being composed

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timer_state::CommittedDuration;

/// Where the draft's duration value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationSource {
    /// Committed by the stopwatch on stop
    Timer,
    /// Typed by the user
    Manual,
}

/// Draft state for one feeding entry.
///
/// Holds the duration field the stopwatch commits into. The surrounding
/// client submits the full entry elsewhere; this server only keeps the
/// in-progress value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDraft {
    /// Duration in whole minutes, unset until committed or typed
    pub duration_minutes: Option<u64>,
    pub source: Option<DurationSource>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl SessionDraft {
    /// Create an empty draft with no duration recorded
    pub fn new() -> Self {
        Self {
            duration_minutes: None,
            source: None,
            updated_at: None,
        }
    }

    /// Write a stopwatch-committed duration into the draft
    pub fn apply_commit(&mut self, commit: &CommittedDuration) {
        self.duration_minutes = Some(commit.duration_minutes);
        self.source = Some(DurationSource::Timer);
        self.updated_at = Some(commit.committed_at);
    }

    /// Record a manually typed duration
    pub fn set_manual(&mut self, minutes: u64) {
        self.duration_minutes = Some(minutes);
        self.source = Some(DurationSource::Manual);
        self.updated_at = Some(Utc::now());
    }

    /// Clear the draft for a fresh entry
    pub fn clear(&mut self) {
        self.duration_minutes = None;
        self.source = None;
        self.updated_at = None;
    }

    /// Check whether a duration has been recorded
    pub fn has_duration(&self) -> bool {
        self.duration_minutes.is_some()
    }
}

impl Default for SessionDraft {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_draft_is_empty() {
        let draft = SessionDraft::new();
        assert!(!draft.has_duration());
        assert!(draft.source.is_none());
        assert!(draft.updated_at.is_none());
    }

    #[test]
    fn apply_commit_records_timer_duration() {
        let mut draft = SessionDraft::new();
        let commit = CommittedDuration {
            duration_minutes: 3,
            elapsed_seconds: 125,
            committed_at: Utc::now(),
        };

        draft.apply_commit(&commit);
        assert_eq!(draft.duration_minutes, Some(3));
        assert_eq!(draft.source, Some(DurationSource::Timer));
        assert_eq!(draft.updated_at, Some(commit.committed_at));
    }

    #[test]
    fn manual_entry_overrides_committed_value() {
        let mut draft = SessionDraft::new();
        let commit = CommittedDuration {
            duration_minutes: 3,
            elapsed_seconds: 125,
            committed_at: Utc::now(),
        };
        draft.apply_commit(&commit);

        draft.set_manual(15);
        assert_eq!(draft.duration_minutes, Some(15));
        assert_eq!(draft.source, Some(DurationSource::Manual));
    }

    #[test]
    fn clear_empties_the_draft() {
        let mut draft = SessionDraft::new();
        draft.set_manual(10);
        draft.clear();
        assert!(!draft.has_duration());
        assert!(draft.source.is_none());
        assert!(draft.updated_at.is_none());
    }
}
