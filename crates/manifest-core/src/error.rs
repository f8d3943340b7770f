//! Error types for the manifest-core crate.
//!
//! Only [`ValidationError`] ever reaches a caller of
//! [`ManifestationEngine::process_turn`](crate::engine::ManifestationEngine::process_turn).
//! Completion and template failures are recovered inside the engine by the
//! templated fallback and only surface in logs.

use crate::config::ConfigError;

/// Malformed turn input, rejected before any work is done.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The user message is empty or whitespace.
    #[error("user message must not be empty")]
    EmptyMessage,

    /// The user message exceeds the configured character limit.
    #[error("user message is {len} characters, limit is {max}")]
    MessageTooLong {
        /// Characters in the message.
        len: usize,
        /// Configured limit.
        max: usize,
    },

    /// The conversation history exceeds the configured length.
    #[error("conversation history has {len} messages, limit is {max}")]
    HistoryTooLong {
        /// Messages supplied.
        len: usize,
        /// Configured limit.
        max: usize,
    },
}

/// Failure of the external text-completion collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompletionError {
    /// The backend returned an error or was unreachable.
    #[error("completion backend error: {0}")]
    Backend(String),

    /// The completion deadline passed.
    #[error("completion timed out after {0} ms")]
    Timeout(u64),

    /// The backend answered with blank text.
    #[error("completion returned no usable text")]
    Empty,

    /// No backend is configured.
    #[error("no completion backend configured")]
    NotConfigured,
}

/// A prompt template failed to load or render.
#[derive(Debug, thiserror::Error)]
#[error("template error: {0}")]
pub struct TemplateError(pub String);

/// Failure while assembling an engine from configuration.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The YAML configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The prompt templates could not be loaded.
    #[error(transparent)]
    Template(#[from] TemplateError),
}
