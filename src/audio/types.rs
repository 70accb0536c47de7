//! Audio-related small types.
//!
//! Stream parameters, the device configuration derived from them and the
//! single-fire completion handle passed to an output device.

use crossbeam_channel::{Receiver, Sender};

/// Parameters of a decoded stream.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StreamFormat {
    pub sample_rate: u32,
    pub channels: u16,
}

/// What an output device is initialized with.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    pub sample_rate: u32,
    /// Output buffer size in frames.
    pub buffer_frames: u32,
}

impl DeviceConfig {
    /// Size the buffer to hold `buffer_ms` of audio at the stream's rate.
    pub fn for_format(format: StreamFormat, buffer_ms: u32) -> Self {
        let frames = u64::from(format.sample_rate) * u64::from(buffer_ms) / 1000;
        Self {
            sample_rate: format.sample_rate,
            buffer_frames: u32::try_from(frames).unwrap_or(u32::MAX).max(1),
        }
    }
}

/// A decoded track ready to hand to an output device.
pub struct DecodedTrack<S> {
    pub stream: S,
    pub format: StreamFormat,
}

/// Fires once when playback of a stream ends on its own.
///
/// Consuming `complete` makes a second notification impossible. Dropping the
/// handle without completing disconnects the receiver instead.
#[derive(Debug)]
pub struct Completion {
    tx: Sender<()>,
}

impl Completion {
    pub fn channel() -> (Completion, Receiver<()>) {
        let (tx, rx) = crossbeam_channel::bounded(1);
        (Completion { tx }, rx)
    }

    pub fn complete(self) {
        // Nobody listening any more is fine: the race was already decided.
        let _ = self.tx.send(());
    }
}
