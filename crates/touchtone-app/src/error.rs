//! Error types for the touchtone app
//!
//! Application-level errors that wrap engine errors and add app-specific
//! variants.

use thiserror::Error;
use touchtone::ToneError;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] ToneError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Engine(ToneError::Io(e))
    }
}

/// Result type alias for the touchtone app
pub type Result<T> = std::result::Result<T, AppError>;
