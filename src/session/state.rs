//! Session lifecycle and per-track results.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::TrackError;

use super::cancel::CancelReason;

/// Lifecycle of a session. Only moves forward; `Terminated` is final.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Deadline and stop listener are being armed.
    Initializing,
    /// Selecting and playing tracks.
    Playing,
    /// Cancellation observed; halting output.
    Interrupting,
    /// Releasing the last track's resources.
    Draining,
    Terminated,
}

impl SessionState {
    pub fn can_advance_to(self, next: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (self, next),
            (Initializing, Playing)
                | (Playing, Interrupting)
                | (Interrupting, Draining)
                | (Draining, Terminated)
        )
    }
}

/// How one track iteration ended.
#[derive(Debug)]
pub enum PlaybackOutcome {
    CompletedNaturally,
    /// Cancellation preempted the track. Not an error.
    Interrupted,
    Failed(TrackError),
}

#[derive(Debug)]
pub struct TrackReport {
    pub path: PathBuf,
    pub outcome: PlaybackOutcome,
}

/// Terminal session-ended event.
#[derive(Debug)]
pub struct SessionSummary {
    pub reason: CancelReason,
    pub tracks: Vec<TrackReport>,
    pub elapsed: Duration,
}

impl SessionSummary {
    /// Tracks that actually reached the output device.
    pub fn played(&self) -> usize {
        self.tracks
            .iter()
            .filter(|t| !matches!(t.outcome, PlaybackOutcome::Failed(_)))
            .count()
    }
}
