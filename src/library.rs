//! Library catalog: the playable tracks under the configured music directory.

mod display;
mod model;
mod scan;

pub use model::Track;
pub use scan::scan;
