//! Explain CLI - explain a source file from the terminal
//!
//! Usage:
//!   explain <file> [--model <model>] [--ollama-url <url>] [--timeout <secs>] [--output <path>] [--verbose]
//!
//! Example:
//!   explain fib.py
//!   explain main.rs -m llama3.2:3b -o main-explained.txt

use anyhow::{bail, Context, Result};
use colored::Colorize;
use explainer::explain::transcript;
use explainer::provider::{LlmProvider, OllamaProvider};
use explainer::{ExplainError, Explainer, LlmResponse, ProviderConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn print_usage() {
    let defaults = ProviderConfig::default();
    eprintln!(
        r#"
{} - Explain code with a local LLM

{}
    explain <FILE> [OPTIONS]

{}
    <FILE>     Source file to explain

{}
    -m, --model <MODEL>         Model to use (default: {})
    -u, --ollama-url <URL>      Ollama server URL (default: {})
    -t, --timeout <SECS>        Seconds to wait for the model (default: {})
    -o, --output <PATH>         Also write a Code/Explanation transcript to PATH
    -v, --verbose               Log requests and model timings
    -h, --help                  Print this help message
"#,
        "explain".bold(),
        "USAGE:".bold(),
        "ARGS:".bold(),
        "OPTIONS:".bold(),
        defaults.model,
        defaults.base_url,
        DEFAULT_TIMEOUT_SECS,
    );
}

struct CliArgs {
    file: PathBuf,
    model: String,
    ollama_url: String,
    timeout_secs: u64,
    output: Option<PathBuf>,
    verbose: bool,
}

fn parse_args() -> Result<CliArgs> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        std::process::exit(if args.len() < 2 { 1 } else { 0 });
    }

    let defaults = ProviderConfig::default();
    let file = PathBuf::from(&args[1]);
    let mut model = defaults.model;
    let mut ollama_url = defaults.base_url;
    let mut timeout_secs = DEFAULT_TIMEOUT_SECS;
    let mut output = None;
    let mut verbose = false;

    let mut i = 2;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--verbose" | "-v" => verbose = true,
            "--model" | "-m" | "--ollama-url" | "-u" | "--timeout" | "-t" | "--output" | "-o" => {
                i += 1;
                let value = args
                    .get(i)
                    .with_context(|| format!("{} needs a value", flag))?
                    .clone();
                match flag {
                    "--model" | "-m" => model = value,
                    "--ollama-url" | "-u" => ollama_url = value,
                    "--timeout" | "-t" => {
                        timeout_secs = value
                            .parse()
                            .with_context(|| format!("Invalid timeout: {}", value))?;
                        if timeout_secs == 0 {
                            bail!("Timeout must be greater than zero");
                        }
                    }
                    _ => output = Some(PathBuf::from(value)),
                }
            }
            other => bail!("Unknown option: {}", other),
        }
        i += 1;
    }

    Ok(CliArgs {
        file,
        model,
        ollama_url,
        timeout_secs,
        output,
        verbose,
    })
}

/// Run one file through the explainer; failures come back as errors for `main` to report
async fn explain_source(explainer: &Explainer, file: &Path, code: &str) -> Result<LlmResponse> {
    match explainer.explain(code).await {
        Ok(response) => Ok(response),
        Err(ExplainError::MissingCode) => {
            bail!("Code input is required! ({} is empty)", file.display())
        }
        Err(e) => {
            eprintln!("{}", "Error generating explanation".red().bold());
            Err(anyhow::Error::new(e).context("Error generating explanation"))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = parse_args()?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let code = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read file: {}", args.file.display()))?;

    let provider = OllamaProvider::new(&args.ollama_url, &args.model)
        .context("Failed to create Ollama client")?;

    eprintln!(
        "{} {}  {} {}",
        "File:".dimmed(),
        args.file.display(),
        "Model:".dimmed(),
        provider.name()
    );
    eprintln!("{}", "Analyzing code...".cyan());

    let explainer = Explainer::new(Arc::new(provider), Duration::from_secs(args.timeout_secs));
    let response = explain_source(&explainer, &args.file, &code).await?;

    println!("{}", response.content);

    if let Some(duration_ms) = response.duration_ms {
        eprintln!("{}", format!("({} ms)", duration_ms).dimmed());
    }

    if let Some(path) = &args.output {
        std::fs::write(path, transcript(&code, &response.content))
            .with_context(|| format!("Failed to write transcript: {}", path.display()))?;
        eprintln!("{} {}", "Saved:".green(), path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use explainer::provider::{HealthStatus, LlmRequest, ProviderError};

    struct DownProvider;

    #[async_trait]
    impl LlmProvider for DownProvider {
        fn name(&self) -> &str {
            "down"
        }

        fn model(&self) -> &str {
            "down-model"
        }

        async fn complete(&self, _request: &LlmRequest) -> Result<LlmResponse, ProviderError> {
            Err(ProviderError::Connection("connection refused".to_string()))
        }

        async fn health_check(&self) -> HealthStatus {
            HealthStatus {
                healthy: false,
                latency_ms: None,
                error: Some("connection refused".to_string()),
            }
        }
    }

    fn down_explainer() -> Explainer {
        Explainer::new(Arc::new(DownProvider), Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    #[tokio::test]
    async fn test_model_failure_is_returned_as_error() {
        let err = explain_source(&down_explainer(), Path::new("fib.py"), "print(1)")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Error generating explanation");
        let cause = err.downcast_ref::<ExplainError>().unwrap();
        assert!(matches!(cause, ExplainError::Provider(ProviderError::Connection(_))));
    }

    #[tokio::test]
    async fn test_empty_file_is_rejected() {
        let err = explain_source(&down_explainer(), Path::new("empty.py"), "")
            .await
            .unwrap_err();

        assert!(err.to_string().starts_with("Code input is required!"));
        assert!(err.to_string().contains("empty.py"));
    }
}
