//! Turn runner entry point for the manifestation core.
//!
//! Reads `TurnRequest` JSON lines from stdin and writes one response line
//! per request to stdout. Logs go to stderr so stdout stays a clean data
//! channel.
//!
//! # Architecture
//!
//! ```text
//! stdin --> TurnRunner --> ManifestationEngine --> LLM Backend --> stdout
//!                                   |                   |
//!                                   +---- fallback <----+ (error / timeout)
//! ```
//!
//! Every request gets an answer. With no backend configured, or when the
//! backend fails, the engine answers from its local fallback narrative.

mod config;
mod error;
mod llm;
mod runner;

use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use manifest_core::ManifestationEngine;

use crate::config::RunnerConfig;
use crate::llm::create_backend;
use crate::runner::TurnRunner;

/// Application entry point.
///
/// Loads configuration, initializes logging, builds the engine around the
/// configured LLM backend, then answers turns until stdin closes.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the streams fail.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let runner_config = RunnerConfig::from_env()?;
    let engine_config = runner_config.engine_config()?;

    // Initialize structured logging
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&engine_config.logging.level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    if engine_config.logging.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    info!(
        config_path = ?runner_config.config_path,
        completion_timeout_ms = engine_config.engine.completion_timeout_ms,
        cache_ttl_secs = engine_config.cache.ttl_secs,
        "manifest-runner starting"
    );

    let backend = create_backend(runner_config.backend.as_ref());
    match &runner_config.backend {
        Some(cfg) => info!(
            backend = manifest_core::TextCompletion::name(&backend),
            model = cfg.model,
            "LLM backend configured"
        ),
        None => info!("no LLM backend configured, answering from fallback narrative"),
    }

    let engine = ManifestationEngine::from_config(engine_config, backend)?;
    let turn_runner = TurnRunner::new(engine);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let answered = turn_runner.run(stdin, &mut stdout).await?;

    info!(answered, "input closed, shutting down");
    Ok(())
}
