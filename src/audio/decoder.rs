use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, Source};

use crate::error::TrackError;

use super::backend::TrackDecoder;
use super::types::{DecodedTrack, StreamFormat};

/// A decoded file as rodio plays it. Owns the file handle.
pub type RodioStream = Decoder<BufReader<File>>;

/// Opens tracks from disk and decodes them with `rodio::Decoder`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RodioDecoder;

impl TrackDecoder for RodioDecoder {
    type Input = File;
    type Stream = RodioStream;

    fn open(&self, path: &Path) -> Result<File, TrackError> {
        File::open(path).map_err(|source| TrackError::Open {
            path: path.to_path_buf(),
            source,
        })
    }

    fn decode(&self, path: &Path, input: File) -> Result<DecodedTrack<RodioStream>, TrackError> {
        let decoder = Decoder::new(BufReader::new(input)).map_err(|e| TrackError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let format = StreamFormat {
            sample_rate: decoder.sample_rate(),
            channels: decoder.channels(),
        };
        Ok(DecodedTrack {
            stream: decoder,
            format,
        })
    }
}
