//! The text-completion collaborator seam.
//!
//! The engine never talks HTTP itself. It renders a [`CompletionPrompt`]
//! and hands it to whatever implements [`TextCompletion`]; the runner binary
//! supplies real backends, tests supply scripted ones.

use std::future::Future;

use crate::error::CompletionError;

/// A rendered prompt ready for a completion backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionPrompt {
    /// Instruction establishing the coach's voice.
    pub system: String,
    /// The turn-specific utterance.
    pub user: String,
}

impl CompletionPrompt {
    /// Stable key identifying this prompt in a response cache.
    pub fn cache_key(&self) -> String {
        format!("{}\u{1f}{}", self.system, self.user)
    }
}

/// Something that turns a prompt into natural-language text.
///
/// Implementations should return [`CompletionError::Empty`] rather than
/// blank text, though the engine guards against blank text either way.
pub trait TextCompletion: Send + Sync {
    /// Produce the narrative text for `prompt`.
    fn complete(
        &self,
        prompt: &CompletionPrompt,
    ) -> impl Future<Output = Result<String, CompletionError>> + Send;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}

/// Stand-in used when no backend is configured. Every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconfigured;

impl TextCompletion for Unconfigured {
    async fn complete(&self, _prompt: &CompletionPrompt) -> Result<String, CompletionError> {
        Err(CompletionError::NotConfigured)
    }

    fn name(&self) -> &str {
        "unconfigured"
    }
}
