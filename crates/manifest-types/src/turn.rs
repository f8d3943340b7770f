//! Turn-level request and response records.
//!
//! These are the only records that cross the boundary to the (external)
//! HTTP layer; field names follow its `camelCase` JSON contract.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ManifestationState, ResponseSource, Role};
use crate::graph::{CausalNode, UserProfile};
use crate::ids::ManifestationId;
use crate::intent::{ExtractedData, PartialExtractedData};
use crate::plan::ActionSequence;

/// One message of the conversation so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ConversationMessage {
    /// Speaker.
    pub role: Role,
    /// Message text.
    pub content: String,
    /// When the message was sent.
    pub timestamp: DateTime<Utc>,
}

impl ConversationMessage {
    /// A user message stamped now.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// An assistant message stamped now.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Input for one conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct TurnRequest {
    /// Prior messages, oldest first.
    #[serde(default)]
    pub conversation_history: Vec<ConversationMessage>,
    /// The new user message.
    pub user_message: String,
    /// Caller's key for this manifestation, echoed back.
    #[serde(default)]
    pub manifestation_id: Option<ManifestationId>,
    /// Snapshot persisted by the caller after the previous turn.
    #[serde(default)]
    pub prior_data: Option<PartialExtractedData>,
    /// Profile of the user, if known.
    #[serde(default)]
    pub user_profile: Option<UserProfile>,
}

impl TurnRequest {
    /// Request with only history and message.
    pub const fn new(conversation_history: Vec<ConversationMessage>, user_message: String) -> Self {
        Self {
            conversation_history,
            user_message,
            manifestation_id: None,
            prior_data: None,
            user_profile: None,
        }
    }
}

/// Output of one conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct TurnResponse {
    /// Coach's narrative reply.
    pub ai_response: String,
    /// Lifecycle state after this turn.
    pub manifestation_state: ManifestationState,
    /// Short list of what to do next.
    pub next_actions: Vec<String>,
    /// Full dependency graph of every routed agent, in routing order.
    pub causal_map: Vec<CausalNode>,
    /// Progress so far.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(as = "f64")]
    pub progress_velocity: Decimal,
    /// Whether the dashboard should show the plan.
    pub ready_for_dashboard: bool,
    /// Completed intent snapshot to persist for the next turn.
    pub extracted_data: ExtractedData,
    /// How much real signal has been gathered.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(as = "f64")]
    pub saturation_level: Decimal,
    /// Category-grouped deployment of the causal map.
    pub action_sequences: Vec<ActionSequence>,
    /// Surroundings guidance for the causal map.
    pub environmental_directives: Vec<String>,
    /// Where `ai_response` came from.
    pub response_source: ResponseSource,
    /// Echo of the request's manifestation id.
    pub manifestation_id: Option<ManifestationId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_parses_minimal_contract() {
        let json = r#"{
            "conversationHistory": [
                {"role": "user", "content": "hi", "timestamp": "2026-01-01T00:00:00Z"}
            ],
            "userMessage": "I want more money"
        }"#;
        let parsed: Result<TurnRequest, _> = serde_json::from_str(json);
        assert!(parsed.is_ok());
        if let Ok(req) = parsed {
            assert_eq!(req.conversation_history.len(), 1);
            assert!(req.prior_data.is_none());
        }
    }

    #[test]
    fn request_history_defaults_to_empty() {
        let parsed: Result<TurnRequest, _> = serde_json::from_str(r#"{"userMessage": "hello"}"#);
        assert!(parsed.is_ok_and(|r| r.conversation_history.is_empty()));
    }
}
