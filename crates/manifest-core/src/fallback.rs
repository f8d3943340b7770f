//! Locally templated narrative used whenever the completion service fails.
//!
//! The text is fully deterministic: same snapshot, state, history length
//! and message in, same text out. It always names the core desire.

use std::sync::LazyLock;

use regex::Regex;

use manifest_types::{Domain, ExtractedData, ManifestationState};

/// Domain patterns, checked in order; the first match wins.
const DOMAIN_PATTERNS: [(Domain, &str); 5] = [
    (
        Domain::Finance,
        r"(?i)\b(money|financ\w*|wealth\w*|abundan\w*|income|salary|debt|invest\w*|savings|rich)\b",
    ),
    (
        Domain::Health,
        r"(?i)\b(health\w*|fitness|fit|wellness|weight|exercise|energy|sleep|diet|body)\b",
    ),
    (
        Domain::Career,
        r"(?i)\b(career\w*|jobs?|work\w*|promotion|business|boss|profession\w*|interview\w*)\b",
    ),
    (
        Domain::Relationship,
        r"(?i)\b(love\w*|relationship\w*|partner\w*|dating|marri\w*|friends?|romance|soulmate)\b",
    ),
    (
        Domain::Home,
        r"(?i)\b(home|house|apartment|room|space|living|environment|move|moving)\b",
    ),
];

static DOMAIN_REGEXES: LazyLock<Vec<(Domain, Regex)>> = LazyLock::new(|| {
    DOMAIN_PATTERNS
        .iter()
        .filter_map(|(domain, pattern)| Regex::new(pattern).ok().map(|re| (*domain, re)))
        .collect()
});

/// Questions rotated by history length. None of them asks "how".
const QUESTIONS: [&str; 4] = [
    "What would having {desire} change about your mornings?",
    "Which part of this feels most alive for you right now?",
    "What is the first sign you would notice that it is arriving?",
    "Who will you be once {desire} is simply part of your life?",
];

const IDENTITY_LINE: &str =
    "You are already the kind of person who follows through on what matters to you.";

const MOMENTUM_CLOSER: &str = "Momentum is on your side. Keep going.";

/// Classify free text into a narrative domain.
pub fn infer_domain(text: &str) -> Domain {
    DOMAIN_REGEXES
        .iter()
        .find(|(_, re)| re.is_match(text))
        .map_or(Domain::General, |(domain, _)| *domain)
}

/// Two concrete actions per domain.
pub const fn domain_actions(domain: Domain) -> [&'static str; 2] {
    match domain {
        Domain::Finance => [
            "Open your banking app and name one expense you are ready to release.",
            "Write down one new income idea before the end of today.",
        ],
        Domain::Health => [
            "Take a ten-minute walk before your next meal.",
            "Fill a water bottle now and finish it by lunch.",
        ],
        Domain::Career => [
            "Update one line of your professional profile today.",
            "Send a short message to someone whose work you admire.",
        ],
        Domain::Relationship => [
            "Send a note of thanks to someone you care about.",
            "Put one social plan on your calendar this week.",
        ],
        Domain::Home => [
            "Clear one surface in your home and keep it clear.",
            "Open a window and let fresh air move through your space.",
        ],
        Domain::General => [
            "Write one sentence describing what you want most.",
            "Take three slow breaths and picture it already done.",
        ],
    }
}

/// The state-specific opening line.
pub fn state_line(state: ManifestationState, desire: &str) -> String {
    match state {
        ManifestationState::Discovered => {
            format!("Your desire for {desire} has been heard, and it is already taking shape.")
        }
        ManifestationState::Active => {
            format!("Your {desire} is actively forming as we talk.")
        }
        ManifestationState::Materializing => {
            format!("Your {desire} is materializing; the pieces are coming together.")
        }
        ManifestationState::Manifested => {
            format!("Your {desire} is here. You are living it now.")
        }
    }
}

/// The question for a conversation of `history_len` messages.
pub fn rotating_question(history_len: usize, desire: &str) -> String {
    let template = QUESTIONS
        .get(history_len.checked_rem(QUESTIONS.len()).unwrap_or(0))
        .copied()
        .unwrap_or_default();
    template.replace("{desire}", desire)
}

/// Assemble the full fallback text.
///
/// Lines: state, visualization, up to two domain actions, identity,
/// rotating question, momentum closer.
pub fn compose_fallback_response(
    data: &ExtractedData,
    state: ManifestationState,
    history_len: usize,
    user_message: &str,
) -> String {
    let desire = data.core_desire.as_str();
    let domain = infer_domain(&format!("{desire} {user_message}"));

    let mut lines = vec![
        state_line(state, desire),
        format!("Picture yourself a month from now, already enjoying {desire}."),
    ];
    lines.extend(domain_actions(domain).iter().map(|a| (*a).to_owned()));
    lines.push(IDENTITY_LINE.to_owned());
    lines.push(rotating_question(history_len, desire));
    lines.push(MOMENTUM_CLOSER.to_owned());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pattern_compiles() {
        assert_eq!(DOMAIN_REGEXES.len(), DOMAIN_PATTERNS.len());
    }

    #[test]
    fn domains_are_inferred() {
        assert_eq!(infer_domain("financial abundance"), Domain::Finance);
        assert_eq!(infer_domain("Optimal HEALTH"), Domain::Health);
        assert_eq!(infer_domain("career advancement"), Domain::Career);
        assert_eq!(infer_domain("harmonious relationships"), Domain::Relationship);
        assert_eq!(infer_domain("ideal living space"), Domain::Home);
        assert_eq!(infer_domain("personal fulfillment"), Domain::General);
        assert_eq!(infer_domain(""), Domain::General);
    }

    #[test]
    fn word_boundaries_prevent_false_hits() {
        // "enrich" and "spaceship" must not match "rich" or "space".
        assert_eq!(infer_domain("enrich my spaceship"), Domain::General);
    }

    #[test]
    fn fallback_names_the_desire_and_is_deterministic() {
        let data = ExtractedData {
            core_desire: "financial abundance".to_owned(),
            ..ExtractedData::default()
        };
        let a = compose_fallback_response(&data, ManifestationState::Active, 3, "more money");
        let b = compose_fallback_response(&data, ManifestationState::Active, 3, "more money");
        assert_eq!(a, b);
        assert!(a.contains("financial abundance"));
        assert!(a.contains("banking app"));
        assert!(a.ends_with(MOMENTUM_CLOSER));
        assert_eq!(a.lines().count(), 7);
    }

    #[test]
    fn question_rotates_and_never_asks_how() {
        let asked: Vec<String> = (0..QUESTIONS.len())
            .map(|n| rotating_question(n, "peace"))
            .collect();
        for (i, q) in asked.iter().enumerate() {
            assert!(!q.to_lowercase().starts_with("how"), "{q}");
            for other in asked.iter().skip(i + 1) {
                assert_ne!(q, other);
            }
        }
        assert_eq!(rotating_question(0, "peace"), rotating_question(QUESTIONS.len(), "peace"));
    }

    #[test]
    fn state_lines_differ_by_state() {
        let discovered = state_line(ManifestationState::Discovered, "x");
        let manifested = state_line(ManifestationState::Manifested, "x");
        assert_ne!(discovered, manifested);
    }
}
