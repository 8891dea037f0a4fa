//! Code Explainer - explains pasted code snippets with a locally hosted LLM
//!
//! This crate provides:
//! - An Ollama chat provider behind the `LlmProvider` trait
//! - The explanation service, which races each model call against a timeout
//! - A REST API plus an embedded browser UI

pub mod api;
pub mod explain;
pub mod provider;

pub use explain::{ExplainError, Explainer};
pub use provider::{LlmProvider, LlmRequest, LlmResponse, OllamaProvider};

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errors from loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("timeout_secs must be greater than zero")]
    ZeroTimeout,
}

/// Configuration for the explainer server
#[derive(Debug, Clone, Deserialize)]
pub struct ExplainerConfig {
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Seconds to wait for the model before giving up
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Model service configuration
    #[serde(default)]
    pub provider: ProviderConfig,
}

fn default_port() -> u16 { 5000 }
fn default_timeout_secs() -> u64 { 30 }

impl Default for ExplainerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            provider: ProviderConfig::default(),
        }
    }
}

impl ExplainerConfig {
    /// Parse and validate a TOML document; missing keys take their defaults
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        if config.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Configuration for the Ollama model service
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the Ollama server
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_base_url() -> String { "http://localhost:11434".to_string() }
fn default_model() -> String { "qwen2:0.5b".to_string() }

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
        }
    }
}
