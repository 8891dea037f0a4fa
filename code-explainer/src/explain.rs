//! Explanation service: fixed prompt, single model call, timeout race

use crate::provider::{LlmProvider, LlmRequest, LlmResponse, ProviderError};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// System message sent with every explanation request
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that explains code.";

const PROMPT_PREAMBLE: &str = "Explain the following code step by step in simple English. \
Break down what each line does and what the overall purpose is:";

/// Errors from producing an explanation
#[derive(Error, Debug)]
pub enum ExplainError {
    #[error("Code input is required!")]
    MissingCode,

    #[error("Model did not respond within {0:?}")]
    Timeout(Duration),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Model call aborted: {0}")]
    Aborted(String),
}

impl ExplainError {
    /// Whether the caller, rather than the model service, is at fault
    pub fn is_client_error(&self) -> bool {
        matches!(self, ExplainError::MissingCode)
    }
}

/// Build the user prompt; the code is embedded verbatim
pub fn build_prompt(code: &str) -> String {
    format!("{}\n\n{}", PROMPT_PREAMBLE, code)
}

/// Plain-text record of a snippet and its explanation, as offered for download
pub fn transcript(code: &str, explanation: &str) -> String {
    format!("Code:\n{}\n\nExplanation:\n{}", code, explanation)
}

/// Explains code snippets with a single provider
pub struct Explainer {
    provider: Arc<dyn LlmProvider>,
    timeout: Duration,
}

impl Explainer {
    pub fn new(provider: Arc<dyn LlmProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn provider(&self) -> &Arc<dyn LlmProvider> {
        &self.provider
    }

    /// Explain `code`, racing the model call against the configured timeout.
    ///
    /// The model call runs on its own task. If the timer wins, the task is
    /// detached rather than aborted: the request to the model service still
    /// completes in the background and its result is dropped.
    pub async fn explain(&self, code: &str) -> Result<LlmResponse, ExplainError> {
        if code.is_empty() {
            return Err(ExplainError::MissingCode);
        }

        let request = LlmRequest::new(SYSTEM_PROMPT, build_prompt(code));
        info!(
            provider = self.provider.name(),
            code_len = code.len(),
            "Sending prompt to model"
        );

        let provider = Arc::clone(&self.provider);
        let call = tokio::spawn(async move { provider.complete(&request).await });

        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(result)) => {
                let response = result?;
                debug!(
                    content = %response.content,
                    duration_ms = ?response.duration_ms,
                    usage = ?response.usage,
                    "Model response"
                );
                Ok(response)
            }
            Ok(Err(join_err)) => Err(ExplainError::Aborted(join_err.to_string())),
            Err(_) => {
                warn!(timeout = ?self.timeout, "Model call timed out, detaching");
                Err(ExplainError::Timeout(self.timeout))
            }
        }
    }
}
