//! Capabilities the session drives: a track decoder and an output device.
//!
//! The session only talks to these traits, so tests can swap in fakes.

use std::path::Path;

use crate::error::{DeviceError, TrackError};

use super::types::{Completion, DecodedTrack, DeviceConfig};

/// Opens track files and turns them into playable streams.
pub trait TrackDecoder {
    /// An open byte source (file handle). Dropping it closes the file.
    type Input;
    /// Decoded audio frames. Owns its input.
    type Stream;

    fn open(&self, path: &Path) -> Result<Self::Input, TrackError>;

    /// Consumes `input`: on failure it is dropped (and closed) here.
    fn decode(&self, path: &Path, input: Self::Input)
    -> Result<DecodedTrack<Self::Stream>, TrackError>;
}

/// The audio sink.
///
/// `init` is called at most once per session, before the first `play`.
/// Calls never overlap: the session loop is the only caller.
pub trait OutputDevice {
    type Stream;

    fn init(&mut self, config: DeviceConfig) -> Result<(), DeviceError>;

    /// Start playing `stream` and return without waiting. `done` must be
    /// completed when the stream runs out on its own.
    fn play(&mut self, stream: Self::Stream, done: Completion) -> Result<(), DeviceError>;

    /// Halt the active stream now, without draining buffered audio.
    fn stop(&mut self);

    /// Drop whatever the device still holds for the current track.
    fn release(&mut self);
}
