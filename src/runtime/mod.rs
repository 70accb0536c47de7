use std::fmt::Display;
use std::io::{self, BufReader};
use std::time::Instant;

use chrono::{Local, SecondsFormat};

use crate::audio::{RodioDecoder, RodioDevice};
use crate::cli::Args;
use crate::error::{AppError, CatalogEmptyError, ConfigError};
use crate::library::scan;
use crate::session::{Session, SessionSummary, StopListener};

mod settings;


const ME: &str = "pomorad";

/// Console line in the player's own voice.
fn message(msg: impl Display) {
    println!("[{ME}♪] {msg}");
}

fn now() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Validate configuration and the catalog, then run one session on the
/// default audio output. Nothing touches the device before both checks pass.
pub fn run(args: &Args) -> Result<SessionSummary, AppError> {
    message(format_args!("started at {}", now()));

    let config = settings::load_settings(args)?;
    message(format_args!("playback_timer : {}", config.duration.as_secs()));
    message(format_args!("music_dir : {:?}", config.music_dir));

    let catalog = scan(&config.music_dir, &config.library)?;
    if catalog.is_empty() {
        return Err(AppError::CatalogEmpty(CatalogEmptyError, config.music_dir));
    }
    tracing::info!(tracks = catalog.len(), "library ready");

    let session = Session::new(RodioDecoder, RodioDevice::new(), config.buffer_ms);
    let stop = StopListener::new(BufReader::new(io::stdin()), config.stop_key);
    message(format_args!("type '{}' and press Enter to stop", stop.key()));

    let deadline = Instant::now()
        .checked_add(config.duration)
        .ok_or_else(|| ConfigError::Invalid {
            key: "session.playback_timer",
            reason: "deadline out of range".to_string(),
        })?;
    let summary = session.run(deadline, &catalog, stop, &mut rand::thread_rng())?;

    message(format_args!("done at {}", now()));
    Ok(summary)
}
