//! Chat-completions provider implementation
//!
//! Talks to any OpenAI-style chat-completions HTTP endpoint. The system
//! prompt carries the review instructions; the document payload is sent as
//! the user message, serialized as JSON.
//!
//! # Features
//!
//! - Async HTTP via reqwest with request timeout
//! - Retry with exponential backoff on transient failures only
//! - HTTP status mapping into the upstream fault taxonomy

use crate::ModelError;
use redline_domain::traits::ModelProvider as ModelProviderTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default request timeout (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of attempts for transient failures
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Provider for OpenAI-style chat-completions APIs
pub struct ChatProvider {
    endpoint: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl ChatProvider {
    /// Create a new chat provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: full completions URL
    ///   (e.g., "https://api.example.com/v1/chat/completions")
    /// - `api_key`: bearer token for the provider
    /// - `model`: model identifier to request
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ModelError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Set the maximum number of attempts for transient failures
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// The model identifier this provider requests
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Request a completion from the provider
    ///
    /// Retries transient failures (connect errors, 5xx) with exponential
    /// backoff. Rate-limit and auth rejections are returned immediately;
    /// backoff on those belongs to the caller, not this layer.
    pub async fn complete(
        &self,
        system_prompt: &str,
        payload: &serde_json::Value,
    ) -> Result<String, ModelError> {
        let request_body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: payload.to_string(),
                },
            ],
        };

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&request_body)
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return extract_content(response).await;
                    }
                    match status.as_u16() {
                        401 | 403 => {
                            return Err(ModelError::Auth(format!("HTTP {}", status)));
                        }
                        429 => return Err(ModelError::RateLimited),
                        503 | 529 => {
                            last_error = Some(ModelError::Overloaded);
                        }
                        _ => {
                            let body = response
                                .text()
                                .await
                                .unwrap_or_else(|_| "<unreadable body>".to_string());
                            last_error = Some(ModelError::Communication(format!(
                                "HTTP {}: {}",
                                status, body
                            )));
                        }
                    }
                }
                Err(e) if e.is_timeout() => return Err(ModelError::Timeout),
                Err(e) => {
                    last_error =
                        Some(ModelError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, ...
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| ModelError::Communication("Max retries exceeded".to_string())))
    }
}

async fn extract_content(response: reqwest::Response) -> Result<String, ModelError> {
    let parsed: ChatResponse = response
        .json()
        .await
        .map_err(|e| ModelError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    parsed
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .ok_or_else(|| ModelError::InvalidResponse("Response contained no choices".to_string()))
}

impl ModelProviderTrait for ChatProvider {
    type Error = ModelError;

    fn complete(
        &self,
        system_prompt: &str,
        payload: &serde_json::Value,
    ) -> Result<String, Self::Error> {
        // Blocking wrapper for the async client; the engine always invokes
        // providers from a blocking worker thread.
        tokio::runtime::Runtime::new()
            .map_err(|e| ModelError::Other(format!("Failed to start runtime: {}", e)))?
            .block_on(async { self.complete(system_prompt, payload).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_provider_creation() {
        let provider =
            ChatProvider::new("https://api.example.com/v1/chat/completions", "key", "gpt-x")
                .unwrap();
        assert_eq!(provider.model(), "gpt-x");
        assert_eq!(provider.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_chat_provider_with_max_retries() {
        let provider = ChatProvider::new("https://e", "k", "m")
            .unwrap()
            .with_max_retries(5);
        assert_eq!(provider.max_retries, 5);
    }

    #[tokio::test]
    async fn test_chat_provider_connection_error() {
        // Unroutable local port, single attempt
        let provider = ChatProvider::new("http://127.0.0.1:1/v1/chat/completions", "k", "m")
            .unwrap()
            .with_max_retries(1);

        let result = provider
            .complete("prompt", &serde_json::json!({"documentText": "x"}))
            .await;

        match result {
            Err(ModelError::Communication(_)) | Err(ModelError::Timeout) => {}
            other => panic!("Expected communication failure, got {:?}", other.map(|_| ())),
        }
    }

    // Live integration test (requires a reachable provider)
    #[tokio::test]
    #[ignore]
    async fn test_chat_provider_live() {
        let endpoint = std::env::var("REDLINE_TEST_ENDPOINT").unwrap();
        let api_key = std::env::var("REDLINE_TEST_API_KEY").unwrap();
        let model = std::env::var("REDLINE_TEST_MODEL").unwrap();

        let provider = ChatProvider::new(endpoint, api_key, model).unwrap();
        let raw = provider
            .complete(
                "Reply with an empty JSON object and nothing else.",
                &serde_json::json!({"documentText": "hello"}),
            )
            .await
            .unwrap();
        assert!(!raw.is_empty());
    }
}
