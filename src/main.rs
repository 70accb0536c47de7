use std::process::ExitCode;

use clap::Parser;

mod audio;
mod cli;
mod config;
mod error;
mod library;
mod logging;
mod runtime;
mod selector;
mod session;

fn main() -> ExitCode {
    let args = cli::Args::parse();
    logging::init(args.verbose);

    match runtime::run(&args) {
        Ok(summary) => {
            for report in &summary.tracks {
                tracing::debug!(file = ?report.path, outcome = ?report.outcome, "played");
            }
            tracing::debug!(played = summary.played(), reason = ?summary.reason, "exiting");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("pomorad: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
