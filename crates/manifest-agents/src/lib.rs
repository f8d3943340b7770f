//! Domain specialist agents and routing for the manifestation core.
//!
//! This crate turns an [`AgentContext`](manifest_types::AgentContext) into
//! concrete plans. It holds no I/O and no randomness: every function is a
//! pure computation over the context and the static agent tables.
//!
//! # Modules
//!
//! - [`base`] -- The [`DomainAgent`] contract and its shared algorithms
//! - [`coordinator`] -- Scoring, primary/secondary routing, the general fallback
//! - [`graph`] -- Dependency-graph validation ([`validate_graph`])
//! - [`profile`] -- Static table shape every agent is described by
//! - [`finance`], [`health`], [`career`], [`relationship`], [`environment`] -- Agent tables
//! - [`error`] -- Graph validation errors ([`GraphError`])

pub mod base;
pub mod career;
pub mod coordinator;
pub mod environment;
pub mod error;
pub mod finance;
pub mod graph;
pub mod health;
pub mod profile;
pub mod relationship;

pub use base::{DomainAgent, PATH_RESISTANCE_EPSILON, build_path, path_ratio, select_optimal_path};
pub use coordinator::{
    AgentConfidence, AgentCoordinator, CombinedPlan, DEFAULT_SECONDARY_THRESHOLD,
};
pub use error::GraphError;
pub use graph::{GraphNode, prune_dangling, validate_graph};
pub use profile::AgentProfile;
