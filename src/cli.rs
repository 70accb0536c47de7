use std::path::PathBuf;

use clap::Parser;

/// Play random tracks from your music library until the timer runs out.
#[derive(Parser, Debug)]
#[command(name = "pomorad", version)]
pub struct Args {
    /// Config file (TOML or INI). Defaults to ./config.ini, ./config.toml or
    /// ~/.config/pomorad/config.toml
    #[arg(long, short = 'c', env = "POMORAD_CONFIG_PATH")]
    pub config: Option<PathBuf>,

    /// Session length in seconds (overrides `session.playback_timer`)
    #[arg(long, short = 't', env = "POMORAD_TIMER")]
    pub timer: Option<u64>,

    /// Music library root (overrides `library.music_dir`)
    #[arg(long, short = 'd', env = "POMORAD_MUSIC_DIR")]
    pub music_dir: Option<PathBuf>,

    /// Letter that stops the session when typed followed by Enter
    #[arg(long)]
    pub stop_key: Option<char>,

    /// Log debug output (RUST_LOG takes precedence)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
