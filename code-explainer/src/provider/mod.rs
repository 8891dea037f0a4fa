//! LLM provider abstraction and implementations

mod ollama;
#[cfg(test)]
pub(crate) mod stub;

pub use ollama::OllamaProvider;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when interacting with an LLM provider
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed model response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Provider returned error: {0}")]
    Provider(String),

    #[error("Connection failed: {0}")]
    Connection(String),
}

/// Chat request: one system message and one user message
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub system: String,
    pub prompt: String,
}

impl LlmRequest {
    pub fn new(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
        }
    }
}

/// Generated text plus whatever accounting the model reported
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub usage: Option<TokenUsage>,
    /// Time taken for generation (ms)
    pub duration_ms: Option<u64>,
}

impl LlmResponse {
    /// Response carrying only text, as produced by stubs and tests
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: None,
            duration_ms: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Health status of a provider
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    pub latency_ms: Option<u64>,
    pub error: Option<String>,
}

/// Trait for chat-style LLM backends
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name for logging/identification
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;

    /// Send a completion request to the LLM
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, ProviderError>;

    /// Check if the provider is reachable and serves the configured model
    async fn health_check(&self) -> HealthStatus;
}
