use std::borrow::Cow;
use std::fs;
use std::path::Path;

use lofty::file::TaggedFileExt;
use lofty::tag::Accessor;
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::error::ConfigError;

use super::model::{MediaType, Track, TrackTags};

/// Map a file to the media type we can decode, if any.
pub fn resolve_media_type(path: &Path) -> Option<MediaType> {
    path.extension()
        .and_then(|s| s.to_str())
        .and_then(|ext| match ext.to_ascii_lowercase().as_str() {
            "flac" => Some(MediaType::Flac),
            _ => None,
        })
}

fn clean(v: Option<Cow<'_, str>>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Artist/title from the primary (or first) tag. `None` when the file has no
/// readable tag or the tag carries neither field.
fn read_tags(path: &Path) -> Option<TrackTags> {
    let tagged = match lofty::read_from_path(path) {
        Ok(t) => t,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "no readable tags");
            return None;
        }
    };
    let tag = tagged.primary_tag().or_else(|| tagged.first_tag())?;

    let tags = TrackTags {
        artist: clean(tag.artist()),
        title: clean(tag.title()),
    };

    if tags.artist.is_none() && tags.title.is_none() {
        None
    } else {
        Some(tags)
    }
}

/// Enumerate the playable tracks under `dir`.
///
/// The root must be a readable directory. Entries that cannot be read while
/// walking are logged and skipped. The result is sorted by path.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Result<Vec<Track>, ConfigError> {
    fs::read_dir(dir).map_err(|source| ConfigError::Library {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut tracks: Vec<Track> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(error = %e, "error reading library entry");
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(media_type) = resolve_media_type(path) else {
            continue;
        };

        tracks.push(Track {
            media_type,
            tags: read_tags(path),
            ..Track::new(path)
        });
    }

    tracks.sort_by(|a, b| a.path.cmp(&b.path));
    tracing::debug!(root = %dir.display(), count = tracks.len(), "library scanned");
    Ok(tracks)
}
