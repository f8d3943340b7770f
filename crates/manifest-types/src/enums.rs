//! Enumeration types for the manifestation core.
//!
//! Every enum here is a closed vocabulary: the lifecycle states, the node
//! categories and timeframes used by causal graphs, the planning priority
//! and difficulty tiers, and the set of domain specialists.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Progression of a manifestation through the conversation.
///
/// Ordered: `Discovered < Active < Materializing < Manifested`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum ManifestationState {
    /// The desire has been named but little signal exists yet.
    Discovered,
    /// The user is actively describing the desire.
    Active,
    /// Enough signal exists to show a plan on the dashboard.
    Materializing,
    /// The conversation has run its full course.
    Manifested,
}

impl ManifestationState {
    /// Wire label (`"discovered"`, `"active"`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Discovered => "discovered",
            Self::Active => "active",
            Self::Materializing => "materializing",
            Self::Manifested => "manifested",
        }
    }
}

impl std::fmt::Display for ManifestationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Causal graph vocabulary
// ---------------------------------------------------------------------------

/// Kind of change a causal node asks of the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Category {
    /// Changes to the physical surroundings.
    Environmental,
    /// Habits and concrete actions.
    Behavioral,
    /// Beliefs, planning and learning.
    Cognitive,
    /// Mood, emotional state and energy.
    Energetic,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Environmental,
        Self::Behavioral,
        Self::Cognitive,
        Self::Energetic,
    ];

    /// Wire label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Environmental => "environmental",
            Self::Behavioral => "behavioral",
            Self::Cognitive => "cognitive",
            Self::Energetic => "energetic",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Baseline time a step is expected to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Timeframe {
    /// Can be done right now.
    #[serde(rename = "immediate")]
    Immediate,
    /// Within a day.
    #[serde(rename = "1 day")]
    OneDay,
    /// Within a week.
    #[serde(rename = "1 week")]
    OneWeek,
    /// Within two weeks.
    #[serde(rename = "2 weeks")]
    TwoWeeks,
    /// Within a month.
    #[serde(rename = "1 month")]
    OneMonth,
    /// Within a quarter.
    #[serde(rename = "3 months")]
    ThreeMonths,
}

impl Timeframe {
    /// Wire label (`"1 week"`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Immediate => "immediate",
            Self::OneDay => "1 day",
            Self::OneWeek => "1 week",
            Self::TwoWeeks => "2 weeks",
            Self::OneMonth => "1 month",
            Self::ThreeMonths => "3 months",
        }
    }

    /// Day-equivalent used when summing the duration of a sequence.
    pub const fn day_equivalent(self) -> u32 {
        match self {
            Self::Immediate => 0,
            Self::OneDay => 1,
            Self::OneWeek => 7,
            Self::TwoWeeks => 14,
            Self::OneMonth => 30,
            Self::ThreeMonths => 90,
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Planning tiers
// ---------------------------------------------------------------------------

/// Scheduling priority of an action sequence.
///
/// Ordered so that `High` sorts greatest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Priority {
    /// Mostly hard actions.
    Low,
    /// A mix of easy and harder actions.
    Medium,
    /// Mostly easy actions; do these first.
    High,
}

/// How hard a single action is, derived from its resistance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Difficulty {
    /// Resistance below 0.3.
    Easy,
    /// Resistance below 0.6.
    Medium,
    /// Everything else.
    Hard,
}

// ---------------------------------------------------------------------------
// Agents and domains
// ---------------------------------------------------------------------------

/// The closed set of domain specialists.
///
/// Declaration order is the routing tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum AgentKind {
    /// Money, income and abundance.
    Finance,
    /// Fitness, wellness and energy.
    Health,
    /// Work and professional growth.
    Career,
    /// Love, partnership and connection.
    Relationship,
    /// Home and living space.
    Environment,
}

impl AgentKind {
    /// All agents in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Finance,
        Self::Health,
        Self::Career,
        Self::Relationship,
        Self::Environment,
    ];

    /// Wire label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Finance => "finance",
            Self::Health => "health",
            Self::Career => "career",
            Self::Relationship => "relationship",
            Self::Environment => "environment",
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse topic of free text, used only to pick narrative flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Domain {
    /// Money and abundance.
    Finance,
    /// Body and wellbeing.
    Health,
    /// Work.
    Career,
    /// Love and connection.
    Relationship,
    /// Living space.
    Home,
    /// Nothing recognisable.
    General,
}

impl Domain {
    /// Lowercase label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Finance => "finance",
            Self::Health => "health",
            Self::Career => "career",
            Self::Relationship => "relationship",
            Self::Home => "home",
            Self::General => "general",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Self-reported or inferred financial capacity of the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum CapacityLevel {
    /// Little room to spend or invest.
    Low,
    /// Some room.
    Medium,
    /// Comfortable room.
    High,
}

// ---------------------------------------------------------------------------
// Conversation
// ---------------------------------------------------------------------------

/// Speaker of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Role {
    /// The person being coached.
    User,
    /// The coach.
    Assistant,
}

/// Where the narrative text of a turn came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum ResponseSource {
    /// Fresh text from the completion service.
    Llm,
    /// Text served from the response cache.
    Cache,
    /// Locally templated text after a completion failure.
    Fallback,
    /// Locally templated text after the completion deadline passed.
    Timeout,
}

impl ResponseSource {
    /// Label for logging.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Llm => "llm",
            Self::Cache => "cache",
            Self::Fallback => "fallback",
            Self::Timeout => "timeout",
        }
    }
}
