//! Code Explainer server binary

use anyhow::{Context, Result};
use explainer::api::{create_router, ApiState};
use explainer::provider::{LlmProvider, OllamaProvider};
use explainer::{Explainer, ExplainerConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Code Explainer v{}", env!("CARGO_PKG_VERSION"));

    // Config file is optional; built-in defaults cover a local Ollama
    let config = match std::env::args().nth(1) {
        Some(config_path) => {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file: {}", config_path))?;
            let config = ExplainerConfig::from_toml(&contents)
                .with_context(|| format!("Failed to parse config file: {}", config_path))?;
            info!(config_path = config_path, "Loaded configuration");
            config
        }
        None => {
            info!("No config file given, using defaults");
            ExplainerConfig::default()
        }
    };

    let provider = OllamaProvider::new(&config.provider.base_url, &config.provider.model)
        .context("Failed to create Ollama client")?;
    info!(
        provider = "ollama",
        model = config.provider.model,
        base_url = config.provider.base_url,
        timeout_secs = config.timeout_secs,
        "Configured model provider"
    );

    // Not fatal: Ollama may come up after us
    let status = provider.health_check().await;
    if status.healthy {
        info!(latency_ms = ?status.latency_ms, "Model service reachable");
    } else {
        warn!(error = ?status.error, "Model service not ready; requests will fail until it is");
    }

    let explainer = Explainer::new(Arc::new(provider), config.timeout());
    let state = Arc::new(ApiState { explainer });
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Backend is running on http://localhost:{}", config.port);
    info!("UI available at http://localhost:{}/ui", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
