//! Audio decoding and output.
//!
//! [`TrackDecoder`] and [`OutputDevice`] are the seams the session drives;
//! [`RodioDecoder`] and [`RodioDevice`] implement them on top of `rodio`.

mod backend;
mod decoder;
mod sink;
mod types;

pub use backend::{OutputDevice, TrackDecoder};
pub use decoder::RodioDecoder;
pub use sink::RodioDevice;
pub use types::{Completion, DecodedTrack, DeviceConfig, StreamFormat};
