use std::io::BufRead;
use std::time::Instant;

use crossbeam_channel::{Receiver, at, select};
use rand::Rng;

use crate::audio::{Completion, DeviceConfig, OutputDevice, TrackDecoder};
use crate::error::{DeviceError, TrackError};
use crate::library::Track;
use crate::selector::select_track;

use super::cancel::{CancelReason, CancelToken};
use super::state::{PlaybackOutcome, SessionState, SessionSummary, TrackReport};
use super::stop_listener::StopListener;

/// Which side of the per-track race resolved first.
enum Race {
    Finished,
    Cancelled,
}

/// One bounded playback run.
///
/// Owns the decoder, the output device and the session-scoped
/// "device initialized" flag. The device is only ever touched from the
/// thread calling [`Session::run`].
pub struct Session<C, D> {
    decoder: C,
    device: D,
    cancel: CancelToken,
    buffer_ms: u32,
    device_initialized: bool,
    state: SessionState,
}

impl<C, D> Session<C, D>
where
    C: TrackDecoder,
    D: OutputDevice<Stream = C::Stream>,
{
    pub fn new(decoder: C, device: D, buffer_ms: u32) -> Self {
        Self {
            decoder,
            device,
            cancel: CancelToken::new(),
            buffer_ms,
            device_initialized: false,
            state: SessionState::Initializing,
        }
    }

    /// Handle to this session's cancellation signal.
    #[cfg(test)]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Play random tracks from `catalog` until `deadline` passes or the stop
    /// listener fires.
    ///
    /// Per-track failures are logged and skipped. Only a device that cannot
    /// be initialized ends the session with an error.
    pub fn run<I, R>(
        mut self,
        deadline: Instant,
        catalog: &[Track],
        stop: StopListener<I>,
        rng: &mut R,
    ) -> Result<SessionSummary, DeviceError>
    where
        I: BufRead + Send + 'static,
        R: Rng + ?Sized,
    {
        let started = Instant::now();

        // Detached on purpose; see `stop_listener`.
        if let Err(e) = stop.spawn(self.cancel.clone()) {
            tracing::warn!(error = %e, "stop listener unavailable; session ends on the timer only");
        }
        self.advance(SessionState::Playing);

        let mut tracks: Vec<TrackReport> = Vec::new();
        let result = loop {
            if self.cancel.is_cancelled() {
                break Ok(());
            }
            if Instant::now() >= deadline {
                self.cancel.cancel(CancelReason::Deadline);
                break Ok(());
            }

            let track = match select_track(catalog, rng) {
                Ok(t) => t,
                Err(e) => {
                    // The catalog never changes mid-session, so selecting again
                    // cannot succeed; idle until the session is over.
                    tracing::error!(error = %e, "no track to play");
                    self.wait_for_cancel(deadline);
                    continue;
                }
            };

            match self.play_track(track, deadline) {
                Ok(outcome) => {
                    log_outcome(track, &outcome);
                    tracks.push(TrackReport {
                        path: track.path.clone(),
                        outcome,
                    });
                }
                Err(e) => break Err(e),
            }
        };

        if self.state == SessionState::Playing {
            self.advance(SessionState::Interrupting);
            self.advance(SessionState::Draining);
        }
        self.device.release();
        self.advance(SessionState::Terminated);

        result?;

        let summary = SessionSummary {
            reason: self.cancel.reason().unwrap_or(CancelReason::Deadline),
            tracks,
            elapsed: started.elapsed(),
        };
        tracing::info!(
            reason = ?summary.reason,
            tracks = summary.tracks.len(),
            played = summary.played(),
            elapsed = ?summary.elapsed,
            "session ended"
        );
        Ok(summary)
    }

    /// One iteration: open, decode, lazily init the device, play and race.
    ///
    /// Whatever was opened is released before this returns.
    fn play_track(&mut self, track: &Track, deadline: Instant) -> Result<PlaybackOutcome, DeviceError> {
        let path = track.path.as_path();

        let decoded = match self
            .decoder
            .open(path)
            .and_then(|input| self.decoder.decode(path, input))
        {
            Ok(d) => d,
            Err(e) => return Ok(PlaybackOutcome::Failed(e)),
        };

        if !self.device_initialized {
            let config = DeviceConfig::for_format(decoded.format, self.buffer_ms);
            tracing::debug!(
                sample_rate = decoded.format.sample_rate,
                channels = decoded.format.channels,
                "initializing output"
            );
            // On failure `decoded` drops here, closing the file.
            self.device.init(config)?;
            self.device_initialized = true;
        }

        tracing::info!(track = %track.label(), kind = ?track.media_type, file = ?path, "playing..");

        let (done, finished) = Completion::channel();
        if let Err(source) = self.device.play(decoded.stream, done) {
            self.device.release();
            return Ok(PlaybackOutcome::Failed(TrackError::Play {
                path: path.to_path_buf(),
                source,
            }));
        }

        let outcome = match self.race(&finished, deadline) {
            Race::Finished => PlaybackOutcome::CompletedNaturally,
            Race::Cancelled => {
                self.advance(SessionState::Interrupting);
                self.device.stop();
                self.advance(SessionState::Draining);
                PlaybackOutcome::Interrupted
            }
        };

        self.device.release();
        Ok(outcome)
    }

    /// Block until the track finishes or the session is cancelled, whichever
    /// happens first. The deadline fires the cancellation itself.
    fn race(&self, finished: &Receiver<()>, deadline: Instant) -> Race {
        select! {
            // A device that drops its completion handle has nothing left to play.
            recv(finished) -> _ => Race::Finished,
            recv(self.cancel.fired()) -> _ => Race::Cancelled,
            recv(at(deadline)) -> _ => {
                self.cancel.cancel(CancelReason::Deadline);
                Race::Cancelled
            }
        }
    }

    fn wait_for_cancel(&self, deadline: Instant) {
        select! {
            recv(self.cancel.fired()) -> _ => {}
            recv(at(deadline)) -> _ => {
                self.cancel.cancel(CancelReason::Deadline);
            }
        }
    }

    fn advance(&mut self, next: SessionState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "invalid session transition {:?} -> {:?}",
            self.state,
            next
        );
        tracing::debug!(from = ?self.state, to = ?next, "session state");
        self.state = next;
    }
}

fn log_outcome(track: &Track, outcome: &PlaybackOutcome) {
    match outcome {
        PlaybackOutcome::CompletedNaturally => {
            tracing::info!(file = ?track.path, "track finished");
        }
        PlaybackOutcome::Interrupted => {
            tracing::info!(file = ?track.path, "track interrupted");
        }
        PlaybackOutcome::Failed(e) => {
            tracing::warn!(file = ?e.path(), error = %e, "skipping track");
        }
    }
}
