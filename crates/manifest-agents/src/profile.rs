//! Static per-agent tables.
//!
//! Each domain agent is nothing more than an [`AgentProfile`]: its routing
//! keywords, a hand-authored node and micro-action catalog, path
//! templates, directive and indicator text, evaluation rules, and two pure
//! calculators for probability and resistance. The shared algorithms in
//! [`crate::base`] read these tables; nothing here has behavior of its own.

use manifest_types::{AgentContext, Category, Timeframe};
use rust_decimal::Decimal;

/// Pure function of the context producing a value in `[0, 1]`.
pub type Calculator = fn(&AgentContext) -> Decimal;

/// One node of an agent's dependency graph.
#[derive(Debug)]
pub struct NodeTemplate {
    /// Node id, unique across every catalog.
    pub id: &'static str,
    /// Description shown to the user.
    pub action: &'static str,
    /// Ids of nodes in the same catalog that come first.
    pub dependencies: &'static [&'static str],
    /// Baseline duration.
    pub timeframe: Timeframe,
    /// Kind of change.
    pub category: Category,
}

/// One micro-action of an agent's catalog.
#[derive(Debug)]
pub struct ActionTemplate {
    /// Action id, unique across every catalog.
    pub id: &'static str,
    /// Description shown to the user.
    pub action: &'static str,
    /// The causal node this action advances; emitted only when present.
    pub supports: &'static str,
    /// Ids of other actions in the same catalog that come first.
    pub dependencies: &'static [&'static str],
    /// Baseline duration.
    pub timeframe: Timeframe,
    /// Kind of change.
    pub category: Category,
    /// Added to the agent's computed probability before clamping.
    pub probability_shift: Decimal,
    /// Added to the agent's computed resistance before clamping.
    pub resistance_shift: Decimal,
    /// Reward cue.
    pub dopamine_trigger: &'static str,
}

/// A named strategy built by filtering the micro-actions.
#[derive(Debug)]
pub struct PathTemplate {
    /// Path id.
    pub id: &'static str,
    /// What the strategy is.
    pub description: &'static str,
    /// Keep actions whose id contains any of these; empty keeps all.
    pub id_filter: &'static [&'static str],
    /// Rough end-to-end duration label.
    pub estimated_timeframe: &'static str,
    /// Opportunity-noticing guidance.
    pub synchronicity_triggers: &'static [&'static str],
}

/// A velocity bonus earned by a positive outcome signal.
#[derive(Debug)]
pub struct SignalRule {
    /// Signal name (`incomeIncrease`, ...).
    pub signal: &'static str,
    /// Added to velocity when the signal is true.
    pub bonus: Decimal,
    /// Suggested next action when the signal is true.
    pub next_action: &'static str,
    /// Suggested adjustment when the signal is missing or false.
    pub adjustment: &'static str,
}

/// Everything that distinguishes one domain agent from another.
#[derive(Debug)]
pub struct AgentProfile {
    /// Core desire label this domain owns.
    pub desire_label: &'static str,
    /// Lowercase routing keywords.
    pub keywords: &'static [&'static str],
    /// Dependency graph catalog.
    pub nodes: &'static [NodeTemplate],
    /// Micro-action catalog.
    pub actions: &'static [ActionTemplate],
    /// Candidate strategies, at least one.
    pub paths: &'static [PathTemplate],
    /// Surroundings guidance attached to a deployed plan.
    pub environmental_directives: &'static [&'static str],
    /// Signs of progress attached to a deployed plan.
    pub progress_indicators: &'static [&'static str],
    /// Velocity before any outcome bonus.
    pub base_velocity: Decimal,
    /// Outcome evaluation rules.
    pub signals: &'static [SignalRule],
    /// Next action when no signal is met.
    pub default_next_action: &'static str,
    /// Probability calculator.
    pub probability: Calculator,
    /// Resistance calculator.
    pub resistance: Calculator,
}

/// Clamp a value to `[0, 1]`.
pub fn clamp_unit(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, Decimal::ONE)
}
