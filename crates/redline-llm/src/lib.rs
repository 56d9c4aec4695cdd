//! Redline Model Provider Layer
//!
//! Pluggable language-model provider implementations.
//!
//! # Architecture
//!
//! This crate provides implementations of the `ModelProvider` trait from
//! `redline-domain`. The engine treats the provider as an opaque function
//! from (system prompt, document payload) to raw text; everything here is
//! about getting that text reliably and classifying failures.
//!
//! # Providers
//!
//! - `MockProvider`: deterministic mock for testing
//! - `ChatProvider`: OpenAI-style chat-completions HTTP API
//!
//! # Examples
//!
//! ```
//! use redline_llm::MockProvider;
//! use redline_domain::traits::ModelProvider;
//!
//! let provider = MockProvider::new("{\"issues\":[]}");
//! let payload = serde_json::json!({"documentText": "hello"});
//! let raw = provider.complete("review this", &payload).unwrap();
//! assert_eq!(raw, "{\"issues\":[]}");
//! ```

#![warn(missing_docs)]

pub mod chat;

use redline_domain::traits::{ModelProvider, ProviderErrorKind, ProviderFault};
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use chat::ChatProvider;

/// Errors that can occur while talking to a model provider
#[derive(Error, Debug)]
pub enum ModelError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// The provider answered with something we could not read
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    /// Provider-side rate limit hit
    #[error("Provider rate limit exceeded")]
    RateLimited,

    /// Credentials rejected
    #[error("Provider rejected credentials: {0}")]
    Auth(String),

    /// Provider temporarily overloaded
    #[error("Provider overloaded")]
    Overloaded,

    /// The request did not complete in time
    #[error("Provider request timed out")]
    Timeout,

    /// Generic error
    #[error("Provider error: {0}")]
    Other(String),
}

impl ProviderFault for ModelError {
    fn kind(&self) -> ProviderErrorKind {
        match self {
            ModelError::RateLimited => ProviderErrorKind::RateLimit,
            ModelError::Auth(_) => ProviderErrorKind::Auth,
            ModelError::Overloaded => ProviderErrorKind::Overloaded,
            ModelError::Timeout => ProviderErrorKind::Timeout,
            ModelError::Communication(_)
            | ModelError::InvalidResponse(_)
            | ModelError::Other(_) => ProviderErrorKind::Other,
        }
    }
}

/// Mock model provider for deterministic testing
///
/// Returns a pre-configured raw response without any network calls, counts
/// invocations, records the last request for assertions, and can be set to
/// fail with a chosen fault category.
///
/// # Examples
///
/// ```
/// use redline_llm::MockProvider;
/// use redline_domain::traits::{ModelProvider, ProviderErrorKind, ProviderFault};
///
/// let provider = MockProvider::new("raw text");
/// provider.complete("prompt", &serde_json::json!({})).unwrap();
/// assert_eq!(provider.call_count(), 1);
///
/// let failing = MockProvider::failing(ProviderErrorKind::RateLimit);
/// let err = failing.complete("prompt", &serde_json::json!({})).unwrap_err();
/// assert_eq!(err.kind(), ProviderErrorKind::RateLimit);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    response: String,
    fault: Option<ProviderErrorKind>,
    call_count: Arc<Mutex<usize>>,
    last_request: Arc<Mutex<Option<(String, serde_json::Value)>>>,
}

impl MockProvider {
    /// Create a mock that returns a fixed raw response
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            fault: None,
            call_count: Arc::new(Mutex::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Create a mock that always fails with the given fault category
    pub fn failing(kind: ProviderErrorKind) -> Self {
        Self {
            response: String::new(),
            fault: Some(kind),
            call_count: Arc::new(Mutex::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Number of times `complete` was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// The system prompt and payload from the most recent call
    pub fn last_request(&self) -> Option<(String, serde_json::Value)> {
        self.last_request.lock().unwrap().clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("{}")
    }
}

impl ModelProvider for MockProvider {
    type Error = ModelError;

    fn complete(
        &self,
        system_prompt: &str,
        payload: &serde_json::Value,
    ) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;
        *self.last_request.lock().unwrap() =
            Some((system_prompt.to_string(), payload.clone()));

        match self.fault {
            Some(ProviderErrorKind::RateLimit) => Err(ModelError::RateLimited),
            Some(ProviderErrorKind::Auth) => {
                Err(ModelError::Auth("mock auth failure".to_string()))
            }
            Some(ProviderErrorKind::Overloaded) => Err(ModelError::Overloaded),
            Some(ProviderErrorKind::Timeout) => Err(ModelError::Timeout),
            Some(ProviderErrorKind::Other) => {
                Err(ModelError::Other("mock failure".to_string()))
            }
            None => Ok(self.response.clone()),
        }
    }
}
