//! Structured intent inferred from a conversation.
//!
//! [`ExtractedData`] is always complete: missing signal is represented by
//! sentinel defaults, never by absent fields. [`PartialExtractedData`] is
//! the pre-merge shape carried by callers (their prior snapshot) and by the
//! implicit keyword scan.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Core desire used when nothing more specific was found.
pub const DEFAULT_CORE_DESIRE: &str = "personal fulfillment";

/// Timeframe used when no temporal cue was found.
pub const DEFAULT_TIMEFRAME: &str = "flexible";

/// Emotional charge used when no mood cue was found.
pub const DEFAULT_EMOTIONAL_CHARGE: &str = "neutral";

/// Single-element sentinel for empty list fields.
pub const NONE_IDENTIFIED: &str = "none identified";

/// Complete intent snapshot for one conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ExtractedData {
    /// What the user ultimately wants, as a short label.
    pub core_desire: String,
    /// `short-term`, `long-term` or `flexible`.
    pub timeframe: String,
    /// Things standing in the way (`resources`, `time`, ...).
    pub constraints: Vec<String>,
    /// Mood label (`high`, `calm`, `neutral`, ...).
    pub emotional_charge: String,
    /// Beliefs that may hold the user back.
    pub limiting_beliefs: Vec<String>,
}

impl Default for ExtractedData {
    fn default() -> Self {
        Self {
            core_desire: DEFAULT_CORE_DESIRE.to_owned(),
            timeframe: DEFAULT_TIMEFRAME.to_owned(),
            constraints: vec![NONE_IDENTIFIED.to_owned()],
            emotional_charge: DEFAULT_EMOTIONAL_CHARGE.to_owned(),
            limiting_beliefs: vec![NONE_IDENTIFIED.to_owned()],
        }
    }
}

impl ExtractedData {
    /// Whether the core desire carries real signal.
    pub fn has_core_desire(&self) -> bool {
        self.core_desire != DEFAULT_CORE_DESIRE
    }

    /// Whether the timeframe carries real signal.
    pub fn has_timeframe(&self) -> bool {
        self.timeframe != DEFAULT_TIMEFRAME
    }

    /// Whether any real constraint was identified.
    pub fn has_constraints(&self) -> bool {
        !is_sentinel_list(&self.constraints)
    }

    /// Whether the emotional charge carries real signal.
    pub fn has_emotional_charge(&self) -> bool {
        self.emotional_charge != DEFAULT_EMOTIONAL_CHARGE
    }

    /// Whether any real limiting belief was identified.
    pub fn has_limiting_beliefs(&self) -> bool {
        !is_sentinel_list(&self.limiting_beliefs)
    }

    /// Number of the five fields holding a non-default value.
    pub fn informative_field_count(&self) -> u32 {
        [
            self.has_core_desire(),
            self.has_timeframe(),
            self.has_constraints(),
            self.has_emotional_charge(),
            self.has_limiting_beliefs(),
        ]
        .into_iter()
        .map(u32::from)
        .sum()
    }
}

/// List equal to the single-element sentinel, or empty.
fn is_sentinel_list(list: &[String]) -> bool {
    match list {
        [] => true,
        [only] => only == NONE_IDENTIFIED,
        _ => false,
    }
}

/// Intent fields that may or may not be known yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct PartialExtractedData {
    /// Core desire, if known.
    pub core_desire: Option<String>,
    /// Timeframe, if known.
    pub timeframe: Option<String>,
    /// Constraints, if known.
    pub constraints: Option<Vec<String>>,
    /// Emotional charge, if known.
    pub emotional_charge: Option<String>,
    /// Limiting beliefs, if known.
    pub limiting_beliefs: Option<Vec<String>>,
}

impl From<ExtractedData> for PartialExtractedData {
    fn from(data: ExtractedData) -> Self {
        Self {
            core_desire: Some(data.core_desire),
            timeframe: Some(data.timeframe),
            constraints: Some(data.constraints),
            emotional_charge: Some(data.emotional_charge),
            limiting_beliefs: Some(data.limiting_beliefs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_all_sentinels() {
        let data = ExtractedData::default();
        assert_eq!(data.informative_field_count(), 0);
        assert_eq!(data.constraints, vec![NONE_IDENTIFIED.to_owned()]);
    }

    #[test]
    fn informative_fields_are_counted() {
        let data = ExtractedData {
            core_desire: "optimal health".to_owned(),
            constraints: vec!["time".to_owned()],
            ..ExtractedData::default()
        };
        assert_eq!(data.informative_field_count(), 2);
    }

    #[test]
    fn wire_names_are_camel_case() {
        let json = serde_json::to_value(ExtractedData::default()).unwrap_or_default();
        assert!(json.get("coreDesire").is_some());
        assert!(json.get("limitingBeliefs").is_some());
    }

    #[test]
    fn partial_accepts_missing_keys() {
        let parsed: Result<PartialExtractedData, _> =
            serde_json::from_str(r#"{"coreDesire": "optimal health"}"#);
        let parsed = parsed.unwrap_or_default();
        assert_eq!(parsed.core_desire.as_deref(), Some("optimal health"));
        assert!(parsed.timeframe.is_none());
    }
}
