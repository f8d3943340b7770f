//! Prompt template loading and rendering via `minijinja`.
//!
//! Two templates make up a prompt: `system` (the coach's voice) and `user`
//! (the turn). Defaults are compiled into the binary; operators can point
//! `prompts.templates_dir` at a directory holding `system.j2` and `user.j2`
//! to tune the voice without recompiling.

use std::path::Path;

use minijinja::Environment;
use serde::Serialize;

use manifest_types::{ConversationMessage, ManifestationState};

use crate::completion::CompletionPrompt;
use crate::config::PromptsConfig;
use crate::error::TemplateError;

const DEFAULT_SYSTEM: &str = include_str!("../templates/system.j2");
const DEFAULT_USER: &str = include_str!("../templates/user.j2");

/// Everything the templates can reference for one turn.
#[derive(Debug, Clone, Serialize)]
pub struct PromptContext<'a> {
    /// Inferred core desire.
    pub core_desire: &'a str,
    /// Current lifecycle state.
    pub state: ManifestationState,
    /// Inferred emotional charge.
    pub emotional_charge: &'a str,
    /// Real limiting beliefs; empty when none were identified.
    pub limiting_beliefs: Vec<&'a str>,
    /// Next-action texts of the deployed plan.
    pub next_actions: &'a [String],
    /// Most recent messages, oldest first.
    pub history: &'a [ConversationMessage],
    /// The message being answered.
    pub user_message: &'a str,
}

/// Holds the `system` and `user` templates.
pub struct PromptEngine {
    env: Environment<'static>,
}

impl std::fmt::Debug for PromptEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptEngine").finish_non_exhaustive()
    }
}

impl PromptEngine {
    /// Engine with the compiled-in templates.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if an embedded template fails to parse.
    pub fn embedded() -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        env.add_template("system", DEFAULT_SYSTEM)
            .map_err(|e| TemplateError(format!("failed to add system template: {e}")))?;
        env.add_template("user", DEFAULT_USER)
            .map_err(|e| TemplateError(format!("failed to add user template: {e}")))?;
        Ok(Self { env })
    }

    /// Engine loading `system.j2` and `user.j2` from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if a file is missing or fails to parse.
    pub fn from_dir(dir: &Path) -> Result<Self, TemplateError> {
        let mut env = Environment::new();

        let system_tpl = load_template(dir, "system.j2")?;
        let user_tpl = load_template(dir, "user.j2")?;

        env.add_template_owned("system", system_tpl)
            .map_err(|e| TemplateError(format!("failed to add system template: {e}")))?;
        env.add_template_owned("user", user_tpl)
            .map_err(|e| TemplateError(format!("failed to add user template: {e}")))?;

        Ok(Self { env })
    }

    /// Engine for the configured location.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if the templates cannot be loaded.
    pub fn from_config(config: &PromptsConfig) -> Result<Self, TemplateError> {
        match &config.templates_dir {
            Some(dir) => Self::from_dir(dir),
            None => Self::embedded(),
        }
    }

    /// Render both templates for one turn.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if rendering fails.
    pub fn render(&self, ctx: &PromptContext<'_>) -> Result<CompletionPrompt, TemplateError> {
        let system = self
            .env
            .get_template("system")
            .map_err(|e| TemplateError(format!("missing system template: {e}")))?
            .render(ctx)
            .map_err(|e| TemplateError(format!("system render failed: {e}")))?;

        let user = self
            .env
            .get_template("user")
            .map_err(|e| TemplateError(format!("missing user template: {e}")))?
            .render(ctx)
            .map_err(|e| TemplateError(format!("user render failed: {e}")))?;

        Ok(CompletionPrompt { system, user })
    }
}

/// Read a template file from disk.
fn load_template(dir: &Path, filename: &str) -> Result<String, TemplateError> {
    let path = dir.join(filename);
    std::fs::read_to_string(&path)
        .map_err(|e| TemplateError(format!("failed to read {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context<'a>(
        history: &'a [ConversationMessage],
        next_actions: &'a [String],
    ) -> PromptContext<'a> {
        PromptContext {
            core_desire: "financial abundance",
            state: ManifestationState::Active,
            emotional_charge: "high",
            limiting_beliefs: vec!["I don't deserve it"],
            next_actions,
            history,
            user_message: "I want more money",
        }
    }

    #[test]
    fn embedded_templates_render() {
        let engine = PromptEngine::embedded();
        assert!(engine.is_ok());
        let Ok(engine) = engine else { return };

        let history = vec![
            ConversationMessage::user("hi"),
            ConversationMessage::assistant("hello"),
        ];
        let actions = vec!["Track every expense for one week".to_owned()];
        let prompt = engine.render(&context(&history, &actions));
        assert!(prompt.is_ok());
        let prompt = prompt.unwrap_or_else(|_| CompletionPrompt {
            system: String::new(),
            user: String::new(),
        });

        assert!(prompt.system.contains("manifestation coach"));
        assert!(prompt.user.contains("Core desire: financial abundance"));
        assert!(prompt.user.contains("Manifestation state: active"));
        assert!(prompt.user.contains("- Track every expense for one week"));
        assert!(prompt.user.contains("assistant: hello"));
        assert!(prompt.user.contains("I don't deserve it"));
    }

    #[test]
    fn directory_templates_override_defaults() {
        let dir = std::env::temp_dir().join(format!("manifest-prompts-{}", std::process::id()));
        std::fs::create_dir_all(&dir).ok();
        std::fs::write(dir.join("system.j2"), "Coach for {{ core_desire }}").ok();
        std::fs::write(dir.join("user.j2"), "{{ user_message }}").ok();

        let engine = PromptEngine::from_dir(&dir);
        assert!(engine.is_ok());
        if let Ok(engine) = engine {
            let prompt = engine.render(&context(&[], &[]));
            assert!(prompt.is_ok_and(|p| {
                p.system == "Coach for financial abundance" && p.user == "I want more money"
            }));
        }

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_directory_is_an_error() {
        let result = PromptEngine::from_dir(Path::new("/nonexistent/manifest-templates"));
        assert!(result.is_err());
    }

    #[test]
    fn config_without_dir_uses_embedded() {
        assert!(PromptEngine::from_config(&PromptsConfig::default()).is_ok());
    }
}
