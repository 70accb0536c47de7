//! Error types for pomorad.
//!
//! Only [`ConfigError`] and [`CatalogEmptyError`] (plus an unusable audio
//! device) are fatal. [`TrackError`]s are caught by the session loop, logged
//! and the track is skipped.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration loading or validation error. Aborts before a session starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("'{key}' is missing (set it in the config file, environment or command line)")]
    Missing { key: &'static str },

    #[error("'{key}' is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("failed to read library root {path:?}: {source}")]
    Library {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The catalog has nothing to select from.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no playable tracks in the catalog")]
pub struct CatalogEmptyError;

/// Per-track failure. Never escapes the session loop.
#[derive(Error, Debug)]
pub enum TrackError {
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("failed to play {path:?}: {source}")]
    Play {
        path: PathBuf,
        #[source]
        source: DeviceError,
    },
}

impl TrackError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            TrackError::Open { path, .. }
            | TrackError::Decode { path, .. }
            | TrackError::Play { path, .. } => path,
        }
    }
}

/// Output device failure.
#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("audio output unavailable: {0}")]
    Init(String),

    #[error("playback rejected: {0}")]
    Play(String),
}

/// Top-level failure of a `pomorad` run.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0} under {1:?}")]
    CatalogEmpty(CatalogEmptyError, PathBuf),

    #[error(transparent)]
    Device(#[from] DeviceError),
}

impl AppError {
    /// Process exit status for this failure. `0` is reserved for a session
    /// that ran, however it ended.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) => 2,
            AppError::CatalogEmpty(..) => 3,
            AppError::Device(_) => 4,
        }
    }
}
