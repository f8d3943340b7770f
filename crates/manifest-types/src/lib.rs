//! Shared type definitions for the manifestation core.
//!
//! This crate is the single source of truth for every record used across
//! the workspace. Types defined here flow downstream to `TypeScript` via
//! `ts-rs` for the front-end.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers
//! - [`enums`] -- Lifecycle states, categories, timeframes, agent kinds
//! - [`intent`] -- Extracted intent with sentinel defaults
//! - [`graph`] -- Causal nodes, micro-actions, paths, agent I/O
//! - [`plan`] -- Deployed action sequences and progress trackers
//! - [`turn`] -- Turn request/response contract

pub mod enums;
pub mod graph;
pub mod ids;
pub mod intent;
pub mod plan;
pub mod turn;

// Re-export all public types at crate root for convenience.
pub use enums::{
    AgentKind, CapacityLevel, Category, Difficulty, Domain, ManifestationState, Priority,
    ResponseSource, Role, Timeframe,
};
pub use graph::{
    AgentContext, AgentResult, CausalNode, Evaluation, InferredPreferences, MicroAction,
    OutcomeSignals, RealityPath, UserProfile,
};
pub use ids::ManifestationId;
pub use intent::{
    DEFAULT_CORE_DESIRE, DEFAULT_EMOTIONAL_CHARGE, DEFAULT_TIMEFRAME, ExtractedData,
    NONE_IDENTIFIED, PartialExtractedData,
};
pub use plan::{ActionSequence, ExecutableAction, Milestone, ProgressTracker};
pub use turn::{ConversationMessage, TurnRequest, TurnResponse};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs writes the files to `bindings/` relative to the crate root.
        use ts_rs::TS;

        let _ = crate::ids::ManifestationId::export_all();

        let _ = crate::enums::ManifestationState::export_all();
        let _ = crate::enums::Category::export_all();
        let _ = crate::enums::Timeframe::export_all();
        let _ = crate::enums::Priority::export_all();
        let _ = crate::enums::Difficulty::export_all();
        let _ = crate::enums::AgentKind::export_all();
        let _ = crate::enums::Domain::export_all();
        let _ = crate::enums::CapacityLevel::export_all();
        let _ = crate::enums::Role::export_all();
        let _ = crate::enums::ResponseSource::export_all();

        let _ = crate::intent::ExtractedData::export_all();
        let _ = crate::intent::PartialExtractedData::export_all();

        let _ = crate::graph::CausalNode::export_all();
        let _ = crate::graph::MicroAction::export_all();
        let _ = crate::graph::RealityPath::export_all();
        let _ = crate::graph::InferredPreferences::export_all();
        let _ = crate::graph::UserProfile::export_all();
        let _ = crate::graph::AgentContext::export_all();
        let _ = crate::graph::AgentResult::export_all();
        let _ = crate::graph::Evaluation::export_all();

        let _ = crate::plan::Milestone::export_all();
        let _ = crate::plan::ProgressTracker::export_all();
        let _ = crate::plan::ExecutableAction::export_all();
        let _ = crate::plan::ActionSequence::export_all();

        let _ = crate::turn::ConversationMessage::export_all();
        let _ = crate::turn::TurnRequest::export_all();
        let _ = crate::turn::TurnResponse::export_all();
    }
}
