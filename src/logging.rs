use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber. Logs go to stderr; stdout carries
/// the session's start/done lines.
pub fn init(verbose: bool) {
    let default = if verbose {
        "info,pomorad=debug"
    } else {
        "info"
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
