//! Configuration loading and typed config structures for the engine.
//!
//! The configuration is an optional YAML file (`manifest-config.yaml` by
//! convention). Every section and every key has a default, so an empty file
//! and no file at all produce the same engine.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;

use manifest_agents::DEFAULT_SECONDARY_THRESHOLD;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Turn limits and the completion deadline.
    #[serde(default)]
    pub engine: TurnConfig,

    /// Agent routing.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Completion response cache.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Prompt template location.
    #[serde(default)]
    pub prompts: PromptsConfig,
}

impl EngineConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Per-turn limits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TurnConfig {
    /// Deadline for the completion call in milliseconds.
    #[serde(default = "default_completion_timeout_ms")]
    pub completion_timeout_ms: u64,

    /// Longest accepted user message, in characters.
    #[serde(default = "default_max_message_chars")]
    pub max_message_chars: usize,

    /// Longest accepted conversation history, in messages.
    #[serde(default = "default_max_history")]
    pub max_history: usize,

    /// Number of micro-action texts returned as `nextActions`.
    #[serde(default = "default_next_action_count")]
    pub next_action_count: usize,
}

impl TurnConfig {
    /// The completion deadline.
    pub const fn completion_timeout(&self) -> Duration {
        Duration::from_millis(self.completion_timeout_ms)
    }
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self {
            completion_timeout_ms: default_completion_timeout_ms(),
            max_message_chars: default_max_message_chars(),
            max_history: default_max_history(),
            next_action_count: default_next_action_count(),
        }
    }
}

/// Agent routing parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoutingConfig {
    /// Score a non-primary agent must exceed to contribute a secondary plan.
    #[serde(default = "default_secondary_confidence_threshold")]
    pub secondary_confidence_threshold: Decimal,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            secondary_confidence_threshold: default_secondary_confidence_threshold(),
        }
    }
}

/// Completion response cache parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Seconds a cached response stays valid.
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,

    /// Entries kept before the oldest is evicted.
    #[serde(default = "default_cache_max_entries")]
    pub max_entries: usize,
}

impl CacheConfig {
    /// Entry lifetime.
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl_secs(),
            max_entries: default_cache_max_entries(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit one JSON object per log event instead of text.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Prompt template location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PromptsConfig {
    /// Directory holding `system.j2` and `user.j2`; embedded templates when absent.
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,
}

const fn default_completion_timeout_ms() -> u64 {
    8000
}

const fn default_max_message_chars() -> usize {
    1000
}

const fn default_max_history() -> usize {
    20
}

const fn default_next_action_count() -> usize {
    3
}

const fn default_secondary_confidence_threshold() -> Decimal {
    DEFAULT_SECONDARY_THRESHOLD
}

const fn default_cache_ttl_secs() -> u64 {
    300
}

const fn default_cache_max_entries() -> usize {
    256
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.engine.completion_timeout_ms, 8000);
        assert_eq!(config.engine.max_message_chars, 1000);
        assert_eq!(config.engine.max_history, 20);
        assert_eq!(config.engine.next_action_count, 3);
        assert_eq!(config.routing.secondary_confidence_threshold, dec!(0.6));
        assert_eq!(config.cache.ttl(), Duration::from_secs(300));
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
        assert!(config.prompts.templates_dir.is_none());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
engine:
  completion_timeout_ms: 2500
  max_message_chars: 500
  max_history: 10
  next_action_count: 5

routing:
  secondary_confidence_threshold: 0.75

cache:
  ttl_secs: 60
  max_entries: 16

logging:
  level: "debug"
  json: true

prompts:
  templates_dir: "/etc/manifest/templates"
"#;

        let config = EngineConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.engine.completion_timeout(), Duration::from_millis(2500));
        assert_eq!(config.engine.max_message_chars, 500);
        assert_eq!(config.engine.next_action_count, 5);
        assert_eq!(config.routing.secondary_confidence_threshold, dec!(0.75));
        assert_eq!(config.cache.max_entries, 16);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert_eq!(
            config.prompts.templates_dir,
            Some(PathBuf::from("/etc/manifest/templates"))
        );
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = EngineConfig::parse("engine:\n  max_history: 4\n");
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        // Overridden
        assert_eq!(config.engine.max_history, 4);
        // Everything else uses defaults
        assert_eq!(config.engine.max_message_chars, 1000);
        assert_eq!(config.cache.ttl_secs, 300);
    }

    #[test]
    fn parse_empty_yaml() {
        assert_eq!(EngineConfig::parse("").ok(), Some(EngineConfig::default()));
    }

    #[test]
    fn parse_invalid_yaml() {
        let result = EngineConfig::parse("engine: [unterminated");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = EngineConfig::from_file(Path::new("/nonexistent/manifest-config.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
