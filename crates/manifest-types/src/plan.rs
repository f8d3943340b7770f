//! Deployment output: category-grouped, prioritized action sequences.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Category, Difficulty, Priority, Timeframe};

/// A checkpoint inside one action's progress tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Milestone {
    /// What reaching the milestone means.
    pub label: String,
    /// Percent complete at this milestone (0, 50, 100).
    pub progress_pct: u8,
}

/// Progress tracking state for one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ProgressTracker {
    /// Tracked action.
    pub action_id: String,
    /// Start, optional midpoint, completion.
    pub milestones: Vec<Milestone>,
    /// Whether the user has completed the action.
    pub completed: bool,
}

/// An action annotated for execution by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ExecutableAction {
    /// Source node id.
    pub id: String,
    /// Human-readable description.
    pub action: String,
    /// How to carry the action out.
    pub instructions: String,
    /// Kind of change.
    pub category: Category,
    /// Baseline duration.
    pub timeframe: Timeframe,
    /// Derived from resistance.
    pub difficulty: Difficulty,
    /// Reward cue.
    pub dopamine_trigger: String,
    /// Opportunity-noticing cue.
    pub synchronicity_trigger: String,
    /// Milestones for this action.
    pub progress: ProgressTracker,
}

/// Actions of one category with their scheduling metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ActionSequence {
    /// Shared category of every action in the sequence.
    pub category: Category,
    /// Derived from the share of easy actions.
    pub priority: Priority,
    /// Bucketed total duration (`1 week` .. `2 months`).
    pub estimated_duration: String,
    /// The actions, in causal-map order.
    pub actions: Vec<ExecutableAction>,
}
