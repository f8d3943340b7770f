//! Configuration types for the turn runner.
//!
//! Runner settings come from environment variables. Engine behavior comes
//! from the optional YAML file named by `MANIFEST_CONFIG`, with a few
//! environment overrides applied on top.

use std::path::PathBuf;

use manifest_core::{CoreError, EngineConfig};

use crate::error::RunnerError;

/// Complete runner configuration loaded from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Path to the engine YAML file, if any.
    pub config_path: Option<PathBuf>,
    /// LLM backend, or `None` to run on the local fallback only.
    pub backend: Option<LlmBackendConfig>,
    /// Override for `engine.completion_timeout_ms`.
    pub completion_timeout_ms: Option<u64>,
}

/// Configuration for a single LLM backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmBackendConfig {
    /// Request flavour spoken by the endpoint.
    pub backend_type: BackendType,
    /// Base URL the route is appended to.
    pub api_url: String,
    /// API key for authentication.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
}

/// Supported LLM backend types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// Chat completions; also selected by the `deepseek` and `ollama` aliases.
    OpenAi,
    /// Messages API.
    Anthropic,
}

impl RunnerConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional variables:
    /// - `MANIFEST_CONFIG` -- path to the engine YAML file
    /// - `LLM_BACKEND` -- backend type (`openai`, `deepseek`, `ollama`, `anthropic`)
    /// - `LLM_API_URL` -- API base URL
    /// - `LLM_API_KEY` -- API key
    /// - `LLM_MODEL` -- model name
    /// - `COMPLETION_TIMEOUT_MS` -- completion deadline in milliseconds
    ///
    /// The four `LLM_*` variables form a group: unless all are set, no
    /// backend is configured and every turn uses the fallback narrative.
    pub fn from_env() -> Result<Self, RunnerError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RunnerError> {
        let config_path = lookup("MANIFEST_CONFIG")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        let backend = load_backend_config(&lookup, "LLM")?;

        let completion_timeout_ms = lookup("COMPLETION_TIMEOUT_MS")
            .map(|raw| {
                raw.parse::<u64>().map_err(|e| {
                    RunnerError::Config(format!("invalid COMPLETION_TIMEOUT_MS: {e}"))
                })
            })
            .transpose()?;

        Ok(Self {
            config_path,
            backend,
            completion_timeout_ms,
        })
    }

    /// The engine configuration with environment overrides applied.
    pub fn engine_config(&self) -> Result<EngineConfig, RunnerError> {
        let mut config = match &self.config_path {
            Some(path) => EngineConfig::from_file(path).map_err(CoreError::from)?,
            None => EngineConfig::default(),
        };
        if let Some(ms) = self.completion_timeout_ms {
            config.engine.completion_timeout_ms = ms;
        }
        Ok(config)
    }
}

/// Load an LLM backend config from a set of prefixed variables.
///
/// Returns `Ok(None)` when any variable of the group is missing.
fn load_backend_config(
    lookup: &impl Fn(&str) -> Option<String>,
    prefix: &str,
) -> Result<Option<LlmBackendConfig>, RunnerError> {
    let var = |suffix: &str| lookup(&format!("{prefix}_{suffix}")).filter(|v| !v.is_empty());

    let (Some(backend_str), Some(api_url), Some(api_key), Some(model)) =
        (var("BACKEND"), var("API_URL"), var("API_KEY"), var("MODEL"))
    else {
        return Ok(None);
    };

    let backend_type = match backend_str.to_lowercase().as_str() {
        "openai" | "deepseek" | "ollama" => BackendType::OpenAi,
        "anthropic" | "claude" => BackendType::Anthropic,
        other => {
            return Err(RunnerError::Config(format!("unknown backend type: {other}")));
        }
    };

    Ok(Some(LlmBackendConfig {
        backend_type,
        api_url: api_url.trim_end_matches('/').to_owned(),
        api_key,
        model,
    }))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    const FULL_GROUP: [(&str, &str); 4] = [
        ("LLM_BACKEND", "anthropic"),
        ("LLM_API_URL", "https://api.anthropic.com/v1/"),
        ("LLM_API_KEY", "test-key"),
        ("LLM_MODEL", "test-model"),
    ];

    #[test]
    fn empty_environment_runs_fallback_only() {
        let config = RunnerConfig::from_lookup(lookup(&[]));
        assert_eq!(config.ok(), Some(RunnerConfig::default()));
    }

    #[test]
    fn full_backend_group_is_loaded() {
        let config = RunnerConfig::from_lookup(lookup(&FULL_GROUP)).unwrap_or_default();
        let backend = config.backend.unwrap_or_else(|| LlmBackendConfig {
            backend_type: BackendType::OpenAi,
            api_url: String::new(),
            api_key: String::new(),
            model: String::new(),
        });
        assert_eq!(backend.backend_type, BackendType::Anthropic);
        assert_eq!(backend.api_url, "https://api.anthropic.com/v1");
    }

    #[test]
    fn partial_backend_group_is_ignored() {
        let vars = [("LLM_BACKEND", "openai"), ("LLM_MODEL", "m")];
        let config = RunnerConfig::from_lookup(lookup(&vars)).unwrap_or_default();
        assert!(config.backend.is_none());
    }

    #[test]
    fn unknown_backend_type_is_an_error() {
        let vars = [
            ("LLM_BACKEND", "carrier-pigeon"),
            ("LLM_API_URL", "http://localhost:9"),
            ("LLM_API_KEY", "k"),
            ("LLM_MODEL", "m"),
        ];
        let result = RunnerConfig::from_lookup(lookup(&vars));
        assert!(matches!(result, Err(RunnerError::Config(msg)) if msg.contains("carrier-pigeon")));
    }

    #[test]
    fn timeout_override_applies_to_engine_config() {
        let config = RunnerConfig::from_lookup(lookup(&[("COMPLETION_TIMEOUT_MS", "1500")]))
            .unwrap_or_default();
        let engine = config.engine_config().map(|c| c.engine.completion_timeout_ms);
        assert_eq!(engine.ok(), Some(1500));
    }

    #[test]
    fn invalid_timeout_is_an_error() {
        let result = RunnerConfig::from_lookup(lookup(&[("COMPLETION_TIMEOUT_MS", "soon")]));
        assert!(matches!(result, Err(RunnerError::Config(_))));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let config = RunnerConfig {
            config_path: Some(PathBuf::from("/nonexistent/manifest-config.yaml")),
            ..RunnerConfig::default()
        };
        assert!(matches!(config.engine_config(), Err(RunnerError::Core(_))));
    }
}
