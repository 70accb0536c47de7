use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings.
///
/// File format: TOML or INI (picked from the file extension)
/// Lookup order: `--config`, `POMORAD_CONFIG_PATH`, `./config.ini` or
/// `./config.toml`, then `$XDG_CONFIG_HOME/pomorad/config.toml` or
/// `~/.config/pomorad/config.toml`.
///
/// Precedence (highest wins):
/// 1) Command-line flags
/// 2) Environment variables (prefix `POMORAD__`, `__` as nested separator)
/// 3) Config file (if present)
/// 4) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(alias = "pomodoro")]
    pub session: SessionSettings,
    #[serde(alias = "path")]
    pub library: LibrarySettings,
    pub audio: AudioSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// How long a session plays, in seconds. Required.
    pub playback_timer: Option<u64>,
    /// Letter that stops the session when typed followed by Enter
    /// (case-insensitive).
    pub stop_key: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            playback_timer: None,
            stop_key: "q".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Root directory of the music library. Required.
    pub music_dir: Option<PathBuf>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            music_dir: None,
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Output buffer length in milliseconds of audio at the device rate.
    pub buffer_ms: u32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self { buffer_ms: 100 }
    }
}
