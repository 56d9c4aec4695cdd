//! Configuration for the analysis engine

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Policy configuration for one engine instance
///
/// The defaults match the service's published limits; none of the values is
/// load-bearing beyond what `validate` enforces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum document length in characters, checked before the upstream
    /// call
    pub max_document_length: usize,

    /// Minimum similarity ratio for fuzzy acceptance of an offset anchor
    pub similarity_threshold: f64,

    /// Longest span the fuzzy matcher will compare; longer claimed text is
    /// rejected outright to bound the O(n·m) distance cost
    pub max_compare_length: usize,

    /// Deadline for one upstream model call (seconds)
    pub analysis_timeout_secs: u64,
}

impl EngineConfig {
    /// Get the analysis timeout as a Duration
    pub fn analysis_timeout(&self) -> Duration {
        Duration::from_secs(self.analysis_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_document_length == 0 {
            return Err("max_document_length must be greater than 0".to_string());
        }
        if !(self.similarity_threshold > 0.0 && self.similarity_threshold <= 1.0) {
            return Err("similarity_threshold must be within (0.0, 1.0]".to_string());
        }
        if self.max_compare_length == 0 {
            return Err("max_compare_length must be greater than 0".to_string());
        }
        if self.analysis_timeout_secs == 0 {
            return Err("analysis_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Strict preset: smaller documents, near-exact matching only
    pub fn strict() -> Self {
        Self {
            max_document_length: 50_000,
            similarity_threshold: 0.95,
            max_compare_length: 500,
            analysis_timeout_secs: 60,
        }
    }

    /// Lenient preset: larger documents, looser fuzzy acceptance
    pub fn lenient() -> Self {
        Self {
            max_document_length: 200_000,
            similarity_threshold: 0.7,
            max_compare_length: 4_000,
            analysis_timeout_secs: 300,
        }
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_document_length: 200_000,
            similarity_threshold: 0.8,
            max_compare_length: 2_000,
            analysis_timeout_secs: 120,
        }
    }
}
