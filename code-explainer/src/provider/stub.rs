//! In-process providers for exercising the explainer and the API without Ollama

use super::{HealthStatus, LlmProvider, LlmRequest, LlmResponse, ProviderError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Replies with fixed text (or a fixed error) after an optional delay
pub struct StubProvider {
    reply: Result<String, String>,
    delay: Option<Duration>,
    pub calls: AtomicUsize,
    pub finished: AtomicBool,
    pub last_request: Mutex<Option<LlmRequest>>,
}

impl StubProvider {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            delay: None,
            calls: AtomicUsize::new(0),
            finished: AtomicBool::new(false),
            last_request: Mutex::new(None),
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            reply: Err(msg.to_string()),
            ..Self::replying("")
        }
    }

    pub fn delayed(text: &str, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::replying(text)
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    fn model(&self) -> &str {
        "stub-model"
    }

    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.finished.store(true, Ordering::SeqCst);
        match &self.reply {
            Ok(text) => Ok(LlmResponse::text(text.clone())),
            Err(msg) => Err(ProviderError::Provider(msg.clone())),
        }
    }

    async fn health_check(&self) -> HealthStatus {
        HealthStatus {
            healthy: self.reply.is_ok(),
            latency_ms: Some(0),
            error: self.reply.as_ref().err().cloned(),
        }
    }
}

/// Never settles
pub struct PendingProvider;

#[async_trait]
impl LlmProvider for PendingProvider {
    fn name(&self) -> &str {
        "pending"
    }

    fn model(&self) -> &str {
        "pending-model"
    }

    async fn complete(&self, _request: &LlmRequest) -> Result<LlmResponse, ProviderError> {
        std::future::pending().await
    }

    async fn health_check(&self) -> HealthStatus {
        HealthStatus {
            healthy: true,
            latency_ms: None,
            error: None,
        }
    }
}
