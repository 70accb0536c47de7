use std::path::PathBuf;

use super::display::track_label;

/// The only container/codec the player decodes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MediaType {
    Flac,
}

/// Display metadata read from a track's tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackTags {
    pub artist: Option<String>,
    pub title: Option<String>,
}

/// A playable file in the catalog. Immutable once scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub path: PathBuf,
    pub media_type: MediaType,
    pub tags: Option<TrackTags>,
}

impl Track {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            media_type: MediaType::Flac,
            tags: None,
        }
    }

    /// Human readable name: `Artist "Title"`, falling back to the file stem.
    pub fn label(&self) -> String {
        track_label(&self.path, self.tags.as_ref())
    }
}
