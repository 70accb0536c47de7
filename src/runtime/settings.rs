use crate::cli::Args;
use crate::config::{self, SessionConfig};
use crate::error::ConfigError;

/// Load settings from file and environment, layer the command line on top
/// and validate. Unlike a missing config file, invalid values are fatal.
pub fn load_settings(args: &Args) -> Result<SessionConfig, ConfigError> {
    let mut settings = config::Settings::load(args.config.as_deref())?;
    apply_args(&mut settings, args);
    settings.resolve()
}

fn apply_args(settings: &mut config::Settings, args: &Args) {
    if let Some(t) = args.timer {
        settings.session.playback_timer = Some(t);
    }
    if let Some(dir) = &args.music_dir {
        settings.library.music_dir = Some(dir.clone());
    }
    if let Some(key) = args.stop_key {
        settings.session.stop_key = key.to_string();
    }
}
