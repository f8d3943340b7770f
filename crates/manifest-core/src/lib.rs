//! Intent inference, action deployment, and turn orchestration for the
//! manifestation core.
//!
//! A turn flows through this crate in one direction: the conversation is
//! scanned for intent, the intent is routed to domain agents
//! ([`manifest_agents`]), their causal map is deployed into action
//! sequences, and a completion backend (or the local fallback) supplies the
//! narrative text.
//!
//! # Modules
//!
//! - [`intent`] -- Keyword scan, sentinel merge, and confidence
//! - [`deployer`] -- Causal map to category-grouped [`ActionSequence`]s
//! - [`engine`] -- [`ManifestationEngine`], perception, and saturation
//! - [`completion`] -- The [`TextCompletion`] collaborator seam
//! - [`cache`] -- TTL response cache with an injectable [`Clock`]
//! - [`prompt`] -- `minijinja` prompt templates
//! - [`fallback`] -- Deterministic narrative when completion fails
//! - [`config`] -- YAML configuration ([`EngineConfig`])
//! - [`error`] -- Validation, completion, and setup errors
//!
//! [`ActionSequence`]: manifest_types::ActionSequence

pub mod cache;
pub mod completion;
pub mod config;
pub mod deployer;
pub mod engine;
pub mod error;
pub mod fallback;
pub mod intent;
pub mod prompt;

pub use cache::{CachedCompletion, Clock, Completion, ManualClock, ResponseCache, SystemClock};
pub use completion::{CompletionPrompt, TextCompletion, Unconfigured};
pub use config::{ConfigError, EngineConfig};
pub use deployer::deploy_action_plan;
pub use engine::{ManifestationEngine, Perception, TurnPlan, perceive, saturation_level};
pub use error::{CompletionError, CoreError, TemplateError, ValidationError};
pub use fallback::compose_fallback_response;
pub use intent::{calculate_confidence, infer_intent};
pub use prompt::{PromptContext, PromptEngine};
