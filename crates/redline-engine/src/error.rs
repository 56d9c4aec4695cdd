//! Error types for the analysis engine

use redline_domain::traits::ProviderErrorKind;
use thiserror::Error;

/// Errors that can occur during an analysis
///
/// Per-finding rejections are deliberately absent: they are classification
/// outcomes, not errors, and surface only through `ValidationStats`.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Document exceeds the maximum analyzable length
    #[error("Document too large: {0} chars (max: {1})")]
    DocumentTooLarge(usize, usize),

    /// The upstream model produced output no JSON object could be read from
    #[error("Malformed model response: {detail}")]
    MalformedResponse {
        /// What went wrong while locating or parsing the JSON
        detail: String,
        /// The raw model output, kept for diagnostics
        raw: String,
    },

    /// The upstream model call failed
    #[error("Upstream model failure ({kind}): {message}")]
    Upstream {
        /// Failure category, mapped straight through from the provider
        kind: ProviderErrorKind,
        /// Provider's own description of the failure
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl EngineError {
    /// The upstream fault category, if this is an upstream failure
    pub fn upstream_kind(&self) -> Option<ProviderErrorKind> {
        match self {
            EngineError::Upstream { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
