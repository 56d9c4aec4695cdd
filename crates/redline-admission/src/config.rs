//! Admission configuration

use crate::error::AdmissionError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// One rate tier: how many requests fit in one sliding window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierConfig {
    /// Window length in milliseconds
    pub window_ms: u64,

    /// Requests admitted per window
    pub max_requests: usize,
}

impl TierConfig {
    /// The window length as a [`Duration`]
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            window_ms: 60_000,
            max_requests: 30,
        }
    }
}

/// How a client identity is derived from an incoming request
///
/// Each strategy prefixes its namespace so that keys derived under
/// different strategies can never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyStrategy {
    /// Key on the peer socket address
    ClientAddr,
    /// Key on an authenticated user id
    UserId,
    /// Key on the presented API key
    ApiKey,
}

impl KeyStrategy {
    /// Derive the namespaced admission key for a raw identity value
    pub fn key_for(&self, value: &str) -> String {
        match self {
            KeyStrategy::ClientAddr => format!("addr:{}", value),
            KeyStrategy::UserId => format!("user:{}", value),
            KeyStrategy::ApiKey => format!("key:{}", value),
        }
    }
}

/// Admission controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdmissionConfig {
    /// Tier applied when an endpoint has no dedicated entry
    pub default_tier: TierConfig,

    /// Per-endpoint tier overrides
    pub endpoint_tiers: HashMap<String, TierConfig>,

    /// How client keys are derived
    pub key_strategy: KeyStrategy,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            default_tier: TierConfig::default(),
            endpoint_tiers: HashMap::new(),
            key_strategy: KeyStrategy::ClientAddr,
        }
    }
}

impl AdmissionConfig {
    /// Resolve the tier for an endpoint, falling back to the default
    pub fn tier_for(&self, endpoint: &str) -> TierConfig {
        self.endpoint_tiers
            .get(endpoint)
            .copied()
            .unwrap_or(self.default_tier)
    }

    /// Validate that every tier is usable
    pub fn validate(&self) -> Result<(), AdmissionError> {
        let default_endpoint = String::new();
        let tiers = std::iter::once((&default_endpoint, &self.default_tier))
            .chain(self.endpoint_tiers.iter());
        for (endpoint, tier) in tiers {
            if tier.window_ms == 0 {
                return Err(AdmissionError::Config(format!(
                    "Tier for '{}' has a zero-length window",
                    endpoint
                )));
            }
            if tier.max_requests == 0 {
                return Err(AdmissionError::Config(format!(
                    "Tier for '{}' admits zero requests",
                    endpoint
                )));
            }
        }
        Ok(())
    }

    /// Parse a configuration from TOML
    pub fn from_toml(content: &str) -> Result<Self, AdmissionError> {
        let config: Self =
            toml::from_str(content).map_err(|e| AdmissionError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
