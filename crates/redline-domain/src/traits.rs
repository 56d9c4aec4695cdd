//! Trait definitions for external interactions
//!
//! These traits define the boundary between the reconciliation pipeline and
//! infrastructure. Provider implementations live in `redline-llm`.

use std::fmt;

/// Categories of upstream provider failure
///
/// The engine maps these straight through without further interpretation;
/// the transport layer chooses status codes and retryability from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// Provider-side rate limit hit
    RateLimit,
    /// Credentials rejected; not retryable
    Auth,
    /// Provider temporarily overloaded
    Overloaded,
    /// The call did not complete in time
    Timeout,
    /// Anything else
    Other,
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderErrorKind::RateLimit => "rate_limit",
            ProviderErrorKind::Auth => "auth",
            ProviderErrorKind::Overloaded => "overloaded",
            ProviderErrorKind::Timeout => "timeout",
            ProviderErrorKind::Other => "other",
        };
        write!(f, "{}", name)
    }
}

/// Errors a provider can surface, classified into upstream categories
pub trait ProviderFault: std::error::Error {
    /// The failure category for this error
    fn kind(&self) -> ProviderErrorKind;
}

/// The external language-model collaborator
///
/// Implemented by the infrastructure layer (`redline-llm`). The call is
/// opaque: a system prompt plus a JSON document payload in, raw text out.
pub trait ModelProvider {
    /// Error type for provider operations
    type Error: ProviderFault;

    /// Request a completion for the given system prompt and payload
    fn complete(
        &self,
        system_prompt: &str,
        payload: &serde_json::Value,
    ) -> Result<String, Self::Error>;
}
