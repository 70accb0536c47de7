//! Playback session: a bounded loop of random tracks that ends on a deadline
//! or on the user's stop command.
//!
//! Two activities run per session: the loop in [`Session::run`] and the
//! [`StopListener`] thread. They share one [`cancel::CancelToken`]; the loop's only
//! suspension point is the race between the current track ending and the
//! token firing.

mod cancel;
mod orchestrator;
mod state;
mod stop_listener;

pub use cancel::CancelReason;
pub use orchestrator::Session;
pub use state::SessionSummary;
pub use stop_listener::StopListener;
