//! Error types shared by the intake, store and sound layers.

use std::io;

use thiserror::Error;

/// Intake rejection. Only the first failed rule is ever reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing application name.")]
    MissingAppName,
    #[error("missing priority.")]
    MissingPriority,
    #[error("invalid duration.")]
    InvalidDuration,
}

/// Failure writing the store slot. Read failures never surface.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("could not encode intimations: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Alert sound could not be played. Always swallowed by the caller.
#[derive(Debug, Error)]
pub enum SoundError {
    #[error("no audio output available: {0}")]
    Output(String),
    #[error("could not open alert sound: {0}")]
    Source(#[from] io::Error),
    #[error("could not decode alert sound: {0}")]
    Decode(String),
}

/// Top-level error surfaced by the command line front end.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration Error: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("could not write settings: {0}")]
    Config(io::Error),
    #[error("no free intimation id left")]
    IdsExhausted,
    #[error("confirmation prompt failed: {0}")]
    Prompt(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
