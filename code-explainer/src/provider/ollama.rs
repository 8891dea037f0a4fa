//! Ollama LLM provider implementation (chat API)

use super::{HealthStatus, LlmProvider, LlmRequest, LlmResponse, ProviderError, TokenUsage};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Transport-level ceiling. Kept above the gateway's race timeout so the
/// race, not the client, decides when a request has taken too long.
const CLIENT_TIMEOUT_SECS: u64 = 300;

/// Ollama provider for local or remote Ollama servers
pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
    name: String,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Result<Self, ProviderError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model = model.into();
        let name = format!("ollama:{}", model);

        let client = Client::builder()
            .timeout(Duration::from_secs(CLIENT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url,
            model,
            name,
        })
    }
}

/// Ollama chat request format
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Ollama chat response format
#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
    #[serde(default)]
    eval_count: Option<u32>,
    #[serde(default)]
    prompt_eval_count: Option<u32>,
    #[serde(default)]
    total_duration: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// Ollama tags response (for health check)
#[derive(Deserialize)]
struct TagsResponse {
    models: Vec<TagModel>,
}

#[derive(Deserialize)]
struct TagModel {
    name: String,
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, ProviderError> {
        let url = format!("{}/api/chat", self.base_url);

        let chat_request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            stream: false,
        };

        let start = Instant::now();

        let response = self
            .client
            .post(&url)
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ProviderError::Connection(format!("{}: {}", self.base_url, e))
                } else {
                    ProviderError::Http(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Provider(format!("HTTP {}: {}", status, body)));
        }

        // Decode by hand so a wrong shape surfaces as a JSON error, not a transport one
        let body = response.text().await?;
        let chat_response: ChatResponse = serde_json::from_str(&body)?;

        // Ollama reports nanoseconds; fall back to our own measurement
        let duration_ms = chat_response
            .total_duration
            .map(|ns| ns / 1_000_000)
            .unwrap_or_else(|| start.elapsed().as_millis() as u64);

        let usage = match (chat_response.prompt_eval_count, chat_response.eval_count) {
            (Some(prompt), Some(completion)) => Some(TokenUsage {
                prompt_tokens: prompt,
                completion_tokens: completion,
                total_tokens: prompt.saturating_add(completion),
            }),
            _ => None,
        };

        Ok(LlmResponse {
            content: chat_response.message.content,
            usage,
            duration_ms: Some(duration_ms),
        })
    }

    async fn health_check(&self) -> HealthStatus {
        let url = format!("{}/api/tags", self.base_url);
        let start = Instant::now();

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                return HealthStatus {
                    healthy: false,
                    latency_ms: None,
                    error: Some(e.to_string()),
                }
            }
        };

        if !response.status().is_success() {
            return HealthStatus {
                healthy: false,
                latency_ms: None,
                error: Some(format!("HTTP {}", response.status())),
            };
        }

        let latency = start.elapsed().as_millis() as u64;

        match response.json::<TagsResponse>().await {
            Ok(tags) => {
                let model_available = tags
                    .models
                    .iter()
                    .any(|m| m.name == self.model || m.name.starts_with(&self.model));

                HealthStatus {
                    healthy: model_available,
                    latency_ms: Some(latency),
                    error: (!model_available).then(|| format!("Model {} not found", self.model)),
                }
            }
            // Reachable but the tag list is unreadable; don't hold that against it
            Err(_) => HealthStatus {
                healthy: true,
                latency_ms: Some(latency),
                error: None,
            },
        }
    }
}
