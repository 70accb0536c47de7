use std::path::Path;

use super::model::TrackTags;

/// Build the now-playing label for a track.
///
/// Artist and quoted title are joined by a space, e.g. `Nujabes "Aruarian Dance"`.
/// Blank tags are ignored; with nothing left the file stem is used.
pub fn track_label(path: &Path, tags: Option<&TrackTags>) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(tags) = tags {
        if let Some(a) = tags.artist.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            parts.push(a.to_string());
        }
        if let Some(t) = tags.title.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            parts.push(format!("\"{t}\""));
        }
    }

    if parts.is_empty() {
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string()
    } else {
        parts.join(" ")
    }
}
