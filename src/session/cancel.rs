//! Fire-once session cancellation shared by the deadline and the stop listener.

use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use crossbeam_channel::{Receiver, Sender};

/// Why a session was cancelled.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CancelReason {
    /// The session timer ran out.
    Deadline,
    /// The user typed the stop key.
    UserStop,
}

/// Cancellation signal for one session.
///
/// Any clone may fire it; the first `cancel` wins and later calls are no-ops.
/// Once fired it stays fired. [`CancelToken::fired`] becomes ready at that
/// point (the channel disconnects), so it can sit in a `select!`.
#[derive(Debug, Clone)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    reason: OnceLock<CancelReason>,
    armed: Mutex<Option<Sender<()>>>,
    fired: Receiver<()>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::bounded(0);
        Self {
            inner: Arc::new(Inner {
                reason: OnceLock::new(),
                armed: Mutex::new(Some(tx)),
                fired: rx,
            }),
        }
    }

    /// Fire the signal. Returns `true` only for the call that fired it.
    pub fn cancel(&self, reason: CancelReason) -> bool {
        if self.inner.reason.set(reason).is_err() {
            return false;
        }
        // Reason is visible before waiters wake up.
        self.inner
            .armed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        true
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.reason.get().is_some()
    }

    pub fn reason(&self) -> Option<CancelReason> {
        self.inner.reason.get().copied()
    }

    /// Ready (disconnected) once the token has fired. Never carries a message.
    pub fn fired(&self) -> &Receiver<()> {
        &self.inner.fired
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
