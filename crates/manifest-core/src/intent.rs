//! Intent extraction and schema completion.
//!
//! Turns free conversation text into an [`ExtractedData`] snapshot. The
//! scan is a fixed keyword pass over the lowercased text; inference then
//! merges the caller's prior snapshot over the scan result and backfills
//! sentinels so every field is always populated.
//!
//! None of these functions can fail. Absence of signal degrades to the
//! sentinel defaults.

use rust_decimal::Decimal;

use manifest_types::{
    ConversationMessage, DEFAULT_CORE_DESIRE, DEFAULT_EMOTIONAL_CHARGE, DEFAULT_TIMEFRAME,
    ExtractedData, NONE_IDENTIFIED, PartialExtractedData,
};

/// Number of fields in an [`ExtractedData`] snapshot.
const SCHEMA_FIELDS: u32 = 5;

/// Core-desire keyword sets, in scan order. A later match overwrites an earlier one.
const DESIRE_KEYWORDS: &[(&[&str], &str)] = &[
    (&["money", "financial", "wealth"], "financial abundance"),
    (&["health", "fitness", "wellness"], "optimal health"),
    (&["career", "job", "work"], "career advancement"),
    (&["love", "relationship", "partner"], "harmonious relationships"),
    (&["home", "environment", "space"], "ideal living space"),
];

/// Timeframe keyword sets, in scan order.
const TIMEFRAME_KEYWORDS: &[(&[&str], &str)] = &[
    (&["soon", "quickly"], "short-term"),
    (&["long term", "future"], "long-term"),
];

/// Emotional-charge keyword sets, in scan order.
const EMOTION_KEYWORDS: &[(&[&str], &str)] = &[
    (&["excited", "passionate", "desperate", "urgent"], "high"),
    (&["calm", "peaceful"], "calm"),
];

/// Constraint keyword sets; every matching set contributes its label.
const CONSTRAINT_KEYWORDS: &[(&[&str], &str)] = &[
    (&["afford", "budget", "expensive", "broke"], "resources"),
    (&["busy", "no time", "enough time"], "time"),
];

/// Limiting-belief phrases; every match contributes its label.
const BELIEF_KEYWORDS: &[(&[&str], &str)] = &[
    (&["can't", "cannot"], "I can't do this"),
    (&["impossible"], "it's impossible"),
    (&["don't deserve"], "I don't deserve it"),
];

/// Lowercased concatenation of every message.
pub fn conversation_text(history: &[ConversationMessage]) -> String {
    history
        .iter()
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Keyword scan over the whole conversation.
///
/// Fields with no matching keyword are `None`.
pub fn extract_implicit_data(history: &[ConversationMessage]) -> PartialExtractedData {
    extract_from_text(&conversation_text(history))
}

/// Keyword scan over already-lowercased text.
pub fn extract_from_text(text: &str) -> PartialExtractedData {
    let constraints = all_matches(text, CONSTRAINT_KEYWORDS);
    let beliefs = all_matches(text, BELIEF_KEYWORDS);

    PartialExtractedData {
        core_desire: last_match(text, DESIRE_KEYWORDS),
        timeframe: last_match(text, TIMEFRAME_KEYWORDS),
        constraints: (!constraints.is_empty()).then_some(constraints),
        emotional_charge: last_match(text, EMOTION_KEYWORDS),
        limiting_beliefs: (!beliefs.is_empty()).then_some(beliefs),
    }
}

/// Merge `current` over `implicit`, then backfill sentinels.
///
/// A field counts as absent when it is `None`, blank, or already the
/// sentinel, so a prior snapshot full of defaults never masks new signal.
pub fn predict_missing_variables(
    current: &PartialExtractedData,
    implicit: &PartialExtractedData,
) -> ExtractedData {
    build_complete_schema(ExtractedData {
        core_desire: pick_text(
            current.core_desire.as_deref(),
            implicit.core_desire.as_deref(),
            DEFAULT_CORE_DESIRE,
        ),
        timeframe: pick_text(
            current.timeframe.as_deref(),
            implicit.timeframe.as_deref(),
            DEFAULT_TIMEFRAME,
        ),
        constraints: pick_list(current.constraints.as_deref(), implicit.constraints.as_deref()),
        emotional_charge: pick_text(
            current.emotional_charge.as_deref(),
            implicit.emotional_charge.as_deref(),
            DEFAULT_EMOTIONAL_CHARGE,
        ),
        limiting_beliefs: pick_list(
            current.limiting_beliefs.as_deref(),
            implicit.limiting_beliefs.as_deref(),
        ),
    })
}

/// Guarantee every field is populated. Idempotent.
pub fn build_complete_schema(data: ExtractedData) -> ExtractedData {
    ExtractedData {
        core_desire: or_sentinel(data.core_desire, DEFAULT_CORE_DESIRE),
        timeframe: or_sentinel(data.timeframe, DEFAULT_TIMEFRAME),
        constraints: list_or_sentinel(data.constraints),
        emotional_charge: or_sentinel(data.emotional_charge, DEFAULT_EMOTIONAL_CHARGE),
        limiting_beliefs: list_or_sentinel(data.limiting_beliefs),
    }
}

/// Fraction of the five fields that hold a non-default value.
pub fn calculate_confidence(data: &ExtractedData) -> Decimal {
    Decimal::from(data.informative_field_count())
        .checked_div(Decimal::from(SCHEMA_FIELDS))
        .unwrap_or(Decimal::ZERO)
        .min(Decimal::ONE)
}

/// Full inference for one turn: scan, merge over the prior snapshot, complete.
pub fn infer_intent(
    history: &[ConversationMessage],
    prior: Option<&PartialExtractedData>,
) -> ExtractedData {
    let implicit = extract_implicit_data(history);
    let prior = prior.cloned().unwrap_or_default();
    predict_missing_variables(&prior, &implicit)
}

fn last_match(text: &str, table: &[(&[&str], &str)]) -> Option<String> {
    table
        .iter()
        .rev()
        .find(|(keywords, _)| keywords.iter().any(|kw| text.contains(kw)))
        .map(|(_, label)| (*label).to_owned())
}

fn all_matches(text: &str, table: &[(&[&str], &str)]) -> Vec<String> {
    table
        .iter()
        .filter(|(keywords, _)| keywords.iter().any(|kw| text.contains(kw)))
        .map(|(_, label)| (*label).to_owned())
        .collect()
}

fn informative_text(value: Option<&str>, sentinel: &str) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != sentinel)
        .map(ToOwned::to_owned)
}

fn informative_list(value: Option<&[String]>) -> Option<Vec<String>> {
    let items: Vec<String> = value
        .unwrap_or_default()
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != NONE_IDENTIFIED)
        .map(ToOwned::to_owned)
        .collect();
    (!items.is_empty()).then_some(items)
}

fn pick_text(current: Option<&str>, implicit: Option<&str>, sentinel: &str) -> String {
    informative_text(current, sentinel)
        .or_else(|| informative_text(implicit, sentinel))
        .unwrap_or_else(|| sentinel.to_owned())
}

fn pick_list(current: Option<&[String]>, implicit: Option<&[String]>) -> Vec<String> {
    informative_list(current)
        .or_else(|| informative_list(implicit))
        .unwrap_or_else(|| vec![NONE_IDENTIFIED.to_owned()])
}

fn or_sentinel(value: String, sentinel: &str) -> String {
    if value.trim().is_empty() {
        sentinel.to_owned()
    } else {
        value
    }
}

fn list_or_sentinel(list: Vec<String>) -> Vec<String> {
    let items: Vec<String> = list.into_iter().filter(|s| !s.trim().is_empty()).collect();
    if items.is_empty() {
        vec![NONE_IDENTIFIED.to_owned()]
    } else {
        items
    }
}
