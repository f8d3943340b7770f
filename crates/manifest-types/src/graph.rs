//! Causal graph, micro-action and agent I/O records.
//!
//! Probabilities, resistances and velocities are [`Decimal`] in `[0, 1]`
//! so scoring stays exact and comparisons are testable. On the wire they
//! are plain JSON numbers.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{AgentKind, CapacityLevel, Category, ManifestationState, Timeframe};
use crate::intent::ExtractedData;

// ---------------------------------------------------------------------------
// Causal nodes
// ---------------------------------------------------------------------------

/// One step of a dependency graph toward a manifestation.
///
/// `dependencies` must name other nodes of the same graph and the relation
/// must be acyclic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct CausalNode {
    /// Unique within its graph.
    pub id: String,
    /// Human-readable description.
    pub action: String,
    /// Ids of nodes that must come first.
    pub dependencies: Vec<String>,
    /// Likelihood of success.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(as = "f64")]
    pub probability: Decimal,
    /// Friction or difficulty.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(as = "f64")]
    pub resistance: Decimal,
    /// Baseline duration.
    pub timeframe: Timeframe,
    /// Kind of change.
    pub category: Category,
}

/// A granular, user-facing task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct MicroAction {
    /// Unique within its list.
    pub id: String,
    /// Human-readable description.
    pub action: String,
    /// Ids of actions that must come first.
    pub dependencies: Vec<String>,
    /// Likelihood of success.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(as = "f64")]
    pub probability: Decimal,
    /// Friction or difficulty.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(as = "f64")]
    pub resistance: Decimal,
    /// Baseline duration.
    pub timeframe: Timeframe,
    /// Kind of change.
    pub category: Category,
    /// Short reward cue shown on completion.
    pub dopamine_trigger: Option<String>,
}

impl From<&MicroAction> for CausalNode {
    fn from(action: &MicroAction) -> Self {
        Self {
            id: action.id.clone(),
            action: action.action.clone(),
            dependencies: action.dependencies.clone(),
            probability: action.probability,
            resistance: action.resistance,
            timeframe: action.timeframe,
            category: action.category,
        }
    }
}

/// One candidate strategy: an ordered run of micro-actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct RealityPath {
    /// Path identifier (`conservative`, `finance-path`, ...).
    pub id: String,
    /// What the strategy is.
    pub description: String,
    /// Ordered steps.
    pub steps: Vec<MicroAction>,
    /// Aggregate likelihood of success.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(as = "f64")]
    pub total_probability: Decimal,
    /// Aggregate friction.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(as = "f64")]
    pub total_resistance: Decimal,
    /// Rough end-to-end duration label.
    pub estimated_timeframe: String,
    /// Opportunity-noticing guidance.
    pub synchronicity_triggers: Vec<String>,
}

// ---------------------------------------------------------------------------
// Agent input
// ---------------------------------------------------------------------------

/// Preferences inferred about the user by upstream profiling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct InferredPreferences {
    /// Room to spend or invest.
    pub financial_capacity: Option<CapacityLevel>,
}

/// Optional user profile supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct UserProfile {
    /// Inferred preferences.
    pub inferred_preferences: InferredPreferences,
}

/// The unit of work handed to every agent. Agents never mutate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct AgentContext {
    /// Completed intent snapshot.
    pub extracted_data: ExtractedData,
    /// Caller-supplied profile, if any.
    pub user_profile: Option<UserProfile>,
    /// Lowercased conversation text used for keyword routing.
    pub conversation_text: String,
    /// Current lifecycle state.
    pub manifestation_state: ManifestationState,
    /// Progress so far.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(as = "f64")]
    pub progress_velocity: Decimal,
}

impl AgentContext {
    /// Context with only extracted data; everything else at its start value.
    pub fn from_extracted(extracted_data: ExtractedData) -> Self {
        Self {
            extracted_data,
            user_profile: None,
            conversation_text: String::new(),
            manifestation_state: ManifestationState::Discovered,
            progress_velocity: Decimal::ZERO,
        }
    }

    /// Financial capacity from the profile, if present.
    pub fn financial_capacity(&self) -> Option<CapacityLevel> {
        self.user_profile
            .as_ref()
            .and_then(|p| p.inferred_preferences.financial_capacity)
    }
}

// ---------------------------------------------------------------------------
// Agent output
// ---------------------------------------------------------------------------

/// What an agent (or the general fallback) produced for one context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct AgentResult {
    /// Producing agent; `None` for the synthesized general result.
    pub agent: Option<AgentKind>,
    /// Routing confidence of the producing agent.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(as = "f64")]
    pub confidence: Decimal,
    /// Causal view of the chosen path.
    pub causal_map: Vec<CausalNode>,
    /// The agent's full dependency graph the path was chosen from.
    pub dependency_graph: Vec<CausalNode>,
    /// Micro-actions of the deployed path.
    pub micro_actions: Vec<MicroAction>,
    /// The chosen strategy.
    pub optimal_path: RealityPath,
    /// Domain-specific guidance for the user's surroundings.
    pub environmental_directives: Vec<String>,
    /// Signs of progress to watch for.
    pub progress_indicators: Vec<String>,
}

/// Externally observed outcome flags, keyed by signal name.
pub type OutcomeSignals = BTreeMap<String, bool>;

/// Result of evaluating observed outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Evaluation {
    /// Updated velocity, capped at 1.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(as = "f64")]
    pub progress_velocity: Decimal,
    /// Suggested plan changes.
    pub adjustments: Vec<String>,
    /// What to do next.
    pub next_actions: Vec<String>,
}
