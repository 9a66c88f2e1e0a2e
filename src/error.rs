//! Error types for the assessment core

use thiserror::Error;

/// Errors raised by the scoring core
///
/// Partial missing-feature conditions are not errors: they degrade into
/// renormalised scores plus explicit findings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssessError {
    /// Malformed configuration, fatal at load time
    #[error("Configuration error: {0}")]
    ConfigValidation(String),

    /// Sample duration outside configured bounds
    #[error(
        "Audio duration {duration_secs:.2}s is outside the allowed range [{min_secs:.1}s, {max_secs:.1}s]"
    )]
    AudioDuration {
        duration_secs: f64,
        min_secs: f64,
        max_secs: f64,
    },

    /// Sample that cannot describe audio at all (e.g. zero sample rate)
    #[error("Invalid audio sample: {0}")]
    InvalidAudio(String),

    /// No dimension could be scored
    #[error("Insufficient signal: {0}")]
    InsufficientSignal(String),
}

impl AssessError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        AssessError::ConfigValidation(message.into())
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, AssessError>;
