use super::load::{default_config_path, local_config_path, parse_stop_key, resolve_config_path};
use super::*;
use crate::error::ConfigError;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

pub(crate) fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

pub(crate) struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

pub(crate) fn clear_pomorad_env() -> Vec<EnvGuard> {
    vec![
        EnvGuard::remove("POMORAD__SESSION__PLAYBACK_TIMER"),
        EnvGuard::remove("POMORAD__SESSION__STOP_KEY"),
        EnvGuard::remove("POMORAD__LIBRARY__MUSIC_DIR"),
        EnvGuard::remove("POMORAD__AUDIO__BUFFER_MS"),
    ]
}

fn settings_with(timer: Option<u64>, music_dir: Option<std::path::PathBuf>) -> Settings {
    let mut s = Settings::default();
    s.session.playback_timer = timer;
    s.library.music_dir = music_dir;
    s
}

#[test]
fn resolve_config_path_prefers_pomorad_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("POMORAD_CONFIG_PATH", "/tmp/pomorad-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/pomorad-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("pomorad")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("pomorad")
            .join("config.toml")
    );
}

#[test]
fn local_config_path_prefers_ini_over_toml() {
    let dir = tempfile::tempdir().unwrap();
    assert!(local_config_path(dir.path()).is_none());

    std::fs::write(dir.path().join("config.toml"), "").unwrap();
    assert_eq!(
        local_config_path(dir.path()).unwrap(),
        dir.path().join("config.toml")
    );

    std::fs::write(dir.path().join("config.ini"), "").unwrap();
    assert_eq!(
        local_config_path(dir.path()).unwrap(),
        dir.path().join("config.ini")
    );
}

#[test]
fn settings_load_from_toml_file() {
    let _lock = env_lock();
    let _env = clear_pomorad_env();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[session]
playback_timer = 1500
stop_key = "S"

[library]
music_dir = "/srv/music"
recursive = false
include_hidden = true
follow_links = false
max_depth = 3

[audio]
buffer_ms = 250
"#,
    )
    .unwrap();

    let s = Settings::load(Some(cfg_path.as_path())).unwrap();
    assert_eq!(s.session.playback_timer, Some(1500));
    assert_eq!(s.session.stop_key, "S");
    assert_eq!(
        s.library.music_dir.as_deref(),
        Some(std::path::Path::new("/srv/music"))
    );
    assert!(!s.library.recursive);
    assert!(s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(s.library.max_depth, Some(3));
    assert_eq!(s.audio.buffer_ms, 250);
}

#[test]
fn settings_load_accepts_original_ini_sections() {
    let _lock = env_lock();
    let _env = clear_pomorad_env();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.ini");
    std::fs::write(
        &cfg_path,
        "[pomodoro]\nplayback_timer = 60\n\n[path]\nmusic_dir = /home/me/Music\n",
    )
    .unwrap();

    let s = Settings::load(Some(cfg_path.as_path())).unwrap();
    assert_eq!(s.session.playback_timer, Some(60));
    assert_eq!(
        s.library.music_dir.as_deref(),
        Some(std::path::Path::new("/home/me/Music"))
    );
    // Untouched sections keep their defaults.
    assert_eq!(s.session.stop_key, "q");
    assert_eq!(s.audio.buffer_ms, 100);
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();
    let _env = clear_pomorad_env();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[session]
playback_timer = 1500
"#,
    )
    .unwrap();

    let _g = EnvGuard::set("POMORAD__SESSION__PLAYBACK_TIMER", "90");

    let s = Settings::load(Some(cfg_path.as_path())).unwrap();
    assert_eq!(s.session.playback_timer, Some(90));
}

#[test]
fn settings_load_fails_for_missing_explicit_file() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    let err = Settings::load(Some(missing.as_path())).unwrap_err();
    assert!(matches!(err, ConfigError::Load(_)));
}

#[test]
fn resolve_builds_session_config() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = settings_with(Some(300), Some(dir.path().to_path_buf()))
        .resolve()
        .unwrap();

    assert_eq!(cfg.duration, Duration::from_secs(300));
    assert_eq!(cfg.music_dir, dir.path());
    assert_eq!(cfg.stop_key, 'q');
    assert_eq!(cfg.buffer_ms, 100);
}

#[test]
fn resolve_rejects_missing_or_zero_timer() {
    let dir = tempfile::tempdir().unwrap();

    let err = settings_with(None, Some(dir.path().to_path_buf()))
        .resolve()
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Missing {
            key: "session.playback_timer"
        }
    ));

    let err = settings_with(Some(0), Some(dir.path().to_path_buf()))
        .resolve()
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid {
            key: "session.playback_timer",
            ..
        }
    ));
}

#[test]
fn resolve_rejects_timer_past_the_clock_range() {
    let dir = tempfile::tempdir().unwrap();

    let err = settings_with(Some(u64::MAX), Some(dir.path().to_path_buf()))
        .resolve()
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid {
            key: "session.playback_timer",
            ..
        }
    ));
}

#[test]
fn resolve_rejects_missing_or_bogus_music_dir() {
    let err = settings_with(Some(10), None).resolve().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Missing {
            key: "library.music_dir"
        }
    ));

    let err = settings_with(Some(10), Some(std::path::PathBuf::new()))
        .resolve()
        .unwrap_err();
    assert!(matches!(err, ConfigError::Missing { .. }));

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("song.flac");
    std::fs::write(&file, b"x").unwrap();
    let err = settings_with(Some(10), Some(file)).resolve().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid {
            key: "library.music_dir",
            ..
        }
    ));
}

#[test]
fn resolve_rejects_out_of_range_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = settings_with(Some(10), Some(dir.path().to_path_buf()));
    s.audio.buffer_ms = 0;
    assert!(matches!(
        s.resolve().unwrap_err(),
        ConfigError::Invalid {
            key: "audio.buffer_ms",
            ..
        }
    ));
}

#[test]
fn parse_stop_key_accepts_single_letter_only() {
    assert_eq!(parse_stop_key("q").unwrap(), 'q');
    assert_eq!(parse_stop_key(" S ").unwrap(), 's');
    assert!(parse_stop_key("").is_err());
    assert!(parse_stop_key("qq").is_err());
    assert!(parse_stop_key("1").is_err());
}
