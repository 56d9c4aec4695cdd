//! Admission error types

use thiserror::Error;

/// Errors raised by admission configuration handling
#[derive(Debug, Error)]
pub enum AdmissionError {
    /// Configuration failed validation or could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),
}
