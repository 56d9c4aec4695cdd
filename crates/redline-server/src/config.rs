//! Configuration file parsing for the analysis server.
//!
//! Loads settings from TOML files including bind address, upstream model
//! credentials, engine policy, and admission tiers.

use redline_admission::AdmissionConfig;
use redline_engine::EngineConfig;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A section failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 8080)
    pub bind_port: u16,

    /// Upstream model connection
    pub llm: LlmConfig,

    /// Engine policy knobs
    #[serde(default)]
    pub engine: EngineConfig,

    /// Admission tiers and key strategy
    #[serde(default)]
    pub admission: AdmissionConfig,
}

/// Upstream model configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Full completions URL
    pub endpoint: String,

    /// Bearer token for the provider
    pub api_key: String,

    /// Model identifier to request
    pub model: String,
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&contents)?;

        if config.llm.api_key.is_empty() {
            return Err(ConfigError::Invalid("llm.api_key is empty".to_string()));
        }
        config.engine.validate().map_err(ConfigError::Invalid)?;
        config
            .admission
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(config)
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8080,
            llm: LlmConfig {
                endpoint: "http://localhost:9999/v1/chat/completions".to_string(),
                api_key: "test-key-do-not-use-in-production".to_string(),
                model: "test-model".to_string(),
            },
            engine: EngineConfig::default(),
            admission: AdmissionConfig::default(),
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
