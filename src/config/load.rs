use std::env;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::ConfigError;

use super::schema::{LibrarySettings, Settings};

/// Config files looked up in the working directory, in order.
const LOCAL_CONFIG_FILES: [&str; 2] = ["config.ini", "config.toml"];

/// Validated values a session needs. Built by [`Settings::resolve`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub duration: Duration,
    pub music_dir: PathBuf,
    pub stop_key: char,
    pub buffer_ms: u32,
    pub library: LibrarySettings,
}

/// Configuration loading helpers.
///
/// `Settings::load` reads the config file first (when one is found), then
/// environment variables with prefix `POMORAD__` on top, over struct defaults.
impl Settings {
    /// Load settings from an optional explicit path, the environment and the
    /// default config file locations.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => resolve_config_path(),
        };

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            tracing::debug!(path = %path.display(), "reading config file");
            // An explicit path must exist; discovered ones are best-effort.
            builder = builder
                .add_source(::config::File::from(path.as_path()).required(explicit.is_some()));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("POMORAD")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Check the loaded settings and turn them into a [`SessionConfig`].
    pub fn resolve(self) -> Result<SessionConfig, ConfigError> {
        let seconds = self.session.playback_timer.ok_or(ConfigError::Missing {
            key: "session.playback_timer",
        })?;
        if seconds == 0 {
            return Err(ConfigError::Invalid {
                key: "session.playback_timer",
                reason: "must be a positive number of seconds".to_string(),
            });
        }
        let duration = Duration::from_secs(seconds);
        if Instant::now().checked_add(duration).is_none() {
            return Err(ConfigError::Invalid {
                key: "session.playback_timer",
                reason: format!("{seconds} seconds is too long"),
            });
        }

        let music_dir = self
            .library
            .music_dir
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(ConfigError::Missing {
                key: "library.music_dir",
            })?;
        if !music_dir.is_dir() {
            return Err(ConfigError::Invalid {
                key: "library.music_dir",
                reason: format!("{} is not a directory", music_dir.display()),
            });
        }

        let stop_key = parse_stop_key(&self.session.stop_key)?;

        if !(1..=1000).contains(&self.audio.buffer_ms) {
            return Err(ConfigError::Invalid {
                key: "audio.buffer_ms",
                reason: format!("{} is outside 1..=1000", self.audio.buffer_ms),
            });
        }

        Ok(SessionConfig {
            duration,
            music_dir,
            stop_key,
            buffer_ms: self.audio.buffer_ms,
            library: self.library,
        })
    }
}

/// The stop key must be a single ASCII letter.
pub fn parse_stop_key(raw: &str) -> Result<char, ConfigError> {
    let mut chars = raw.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(c.to_ascii_lowercase()),
        _ => Err(ConfigError::Invalid {
            key: "session.stop_key",
            reason: format!("{raw:?} is not a single letter"),
        }),
    }
}

/// Resolve the config path from `POMORAD_CONFIG_PATH`, the working directory
/// or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("POMORAD_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    local_config_path(Path::new(".")).or_else(default_config_path)
}

/// First of `config.ini` / `config.toml` that exists in `dir`.
pub fn local_config_path(dir: &Path) -> Option<PathBuf> {
    LOCAL_CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
}

/// Compute the default config path under `$XDG_CONFIG_HOME/pomorad/config.toml`
/// or `~/.config/pomorad/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("pomorad").join("config.toml"))
}
