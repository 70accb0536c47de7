//! Background watcher for the user's stop command.
//!
//! The listener blocks on a line-based reader (stdin in production). A read
//! like that cannot be interrupted, so the thread is never joined: when the
//! session ends some other way it stays parked on the read until the process
//! exits.

use std::io::{self, BufRead};
use std::thread::{self, JoinHandle};

use super::cancel::{CancelReason, CancelToken};

/// `true` when `line` is exactly the stop letter, ignoring case and
/// surrounding whitespace.
pub fn is_stop_token(line: &str, key: char) -> bool {
    let mut chars = line.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.eq_ignore_ascii_case(&key),
        _ => false,
    }
}

pub struct StopListener<R> {
    input: R,
    key: char,
}

impl<R> StopListener<R>
where
    R: BufRead + Send + 'static,
{
    pub fn new(input: R, key: char) -> Self {
        Self { input, key }
    }

    pub fn key(&self) -> char {
        self.key
    }

    /// Start listening on a background thread. The handle may be dropped.
    pub fn spawn(self, cancel: CancelToken) -> io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("pomorad-stop-listener".to_string())
            .spawn(move || self.listen(&cancel))
    }

    /// Read lines until the stop token, end of input or a read error.
    fn listen(self, cancel: &CancelToken) {
        let key = self.key;
        for line in self.input.lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    tracing::debug!(error = %e, "stop listener input failed");
                    return;
                }
            };

            if is_stop_token(&line, key) {
                if cancel.cancel(CancelReason::UserStop) {
                    tracing::info!("stop requested");
                } else {
                    tracing::debug!("stop requested after the session was already cancelled");
                }
                return;
            }

            if !line.trim().is_empty() {
                tracing::info!("type '{key}' and press Enter to stop");
            }
        }
        tracing::debug!("stop listener input closed");
    }
}
