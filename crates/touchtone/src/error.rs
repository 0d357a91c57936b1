//! Error types for Touchtone
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Main error type for the Touchtone engine
#[derive(Error, Debug)]
pub enum ToneError {
    #[error("Audio error: {0}")]
    Audio(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Touchtone
pub type Result<T> = std::result::Result<T, ToneError>;
