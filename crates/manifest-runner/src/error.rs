//! Error types for the turn runner.
//!
//! Uses `thiserror` for typed errors that surface through startup and the
//! turn loop: environment configuration, LLM calls, stream I/O, JSON.
//! Malformed turns are not errors here; they are answered on the output
//! stream and the loop continues.

use manifest_core::CoreError;

/// Errors that can occur during turn runner operation.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration is invalid or missing.
    #[error("config error: {0}")]
    Config(String),

    /// An LLM backend returned an error or was unreachable.
    #[error("LLM backend error: {0}")]
    LlmBackend(String),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),

    /// The engine could not be constructed.
    #[error("engine error: {0}")]
    Core(#[from] CoreError),
}
