//! Configuration loader and schema types.
//!
//! This module exposes the settings schema, helpers to load it from disk and
//! the environment, and validation into a [`SessionConfig`].

mod load;
mod schema;

pub use load::SessionConfig;
pub use schema::*;

#[cfg(test)]
pub(crate) mod tests;
