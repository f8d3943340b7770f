//! Finance agent: money, income and abundance.
//!
//! The only agent whose calculators read the context (financial capacity,
//! emotional charge, resource constraints) and the only one that offers
//! three competing strategies.

use manifest_types::{AgentContext, CapacityLevel, Category, Timeframe};
use rust_decimal::Decimal;

use crate::profile::{
    ActionTemplate, AgentProfile, NodeTemplate, PathTemplate, SignalRule, clamp_unit,
};

const BASE_PROBABILITY: Decimal = Decimal::from_parts(7, 0, 0, false, 1);
const HIGH_CAPACITY_BONUS: Decimal = Decimal::from_parts(2, 0, 0, false, 1);
const LOW_CAPACITY_PENALTY: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

const BASE_RESISTANCE: Decimal = Decimal::from_parts(4, 0, 0, false, 1);
const HIGH_CHARGE_RESISTANCE: Decimal = Decimal::from_parts(2, 0, 0, false, 1);
const RESOURCE_CONSTRAINT_RESISTANCE: Decimal = Decimal::from_parts(3, 0, 0, false, 1);

/// Probability: base 0.7, +0.2 for high capacity, -0.1 for low capacity.
fn probability(ctx: &AgentContext) -> Decimal {
    let adjusted = match ctx.financial_capacity() {
        Some(CapacityLevel::High) => BASE_PROBABILITY.saturating_add(HIGH_CAPACITY_BONUS),
        Some(CapacityLevel::Low) => BASE_PROBABILITY.saturating_sub(LOW_CAPACITY_PENALTY),
        Some(CapacityLevel::Medium) | None => BASE_PROBABILITY,
    };
    clamp_unit(adjusted)
}

/// Resistance: base 0.4, +0.2 for a high emotional charge, +0.3 when
/// resources are a named constraint.
fn resistance(ctx: &AgentContext) -> Decimal {
    let data = &ctx.extracted_data;
    let mut value = BASE_RESISTANCE;
    if data.emotional_charge == "high" {
        value = value.saturating_add(HIGH_CHARGE_RESISTANCE);
    }
    if data.constraints.iter().any(|c| c == "resources") {
        value = value.saturating_add(RESOURCE_CONSTRAINT_RESISTANCE);
    }
    clamp_unit(value)
}

/// Finance routing and planning tables.
pub static PROFILE: AgentProfile = AgentProfile {
    desire_label: "financial abundance",
    keywords: &[
        "money", "financial", "wealth", "abundance", "abundant", "income", "salary", "debt",
        "invest", "savings", "rich",
    ],
    nodes: &[
        NodeTemplate {
            id: "money-mindset",
            action: "Shift your money story from scarcity to abundance",
            dependencies: &[],
            timeframe: Timeframe::OneWeek,
            category: Category::Cognitive,
        },
        NodeTemplate {
            id: "financial-clarity",
            action: "Get clear on current income, expenses and the number you want",
            dependencies: &["money-mindset"],
            timeframe: Timeframe::OneDay,
            category: Category::Cognitive,
        },
        NodeTemplate {
            id: "wealth-environment",
            action: "Shape a space that reflects financial order",
            dependencies: &[],
            timeframe: Timeframe::OneWeek,
            category: Category::Environmental,
        },
        NodeTemplate {
            id: "income-action",
            action: "Take one concrete step toward a new income stream",
            dependencies: &["financial-clarity"],
            timeframe: Timeframe::OneMonth,
            category: Category::Behavioral,
        },
        NodeTemplate {
            id: "abundance-energy",
            action: "Practice daily gratitude for money already received",
            dependencies: &["money-mindset"],
            timeframe: Timeframe::Immediate,
            category: Category::Energetic,
        },
    ],
    actions: &[
        ActionTemplate {
            id: "track-expenses",
            action: "Track every expense for seven days",
            supports: "financial-clarity",
            dependencies: &[],
            timeframe: Timeframe::OneWeek,
            category: Category::Behavioral,
            probability_shift: Decimal::from_parts(1, 0, 0, false, 1),
            resistance_shift: Decimal::from_parts(2, 0, 0, true, 1),
            dopamine_trigger: "Every logged expense is a vote for clarity",
        },
        ActionTemplate {
            id: "budget-review",
            action: "Review your budget and free up ten percent for savings",
            supports: "financial-clarity",
            dependencies: &["track-expenses"],
            timeframe: Timeframe::OneDay,
            category: Category::Cognitive,
            probability_shift: Decimal::ZERO,
            resistance_shift: Decimal::from_parts(1, 0, 0, true, 1),
            dopamine_trigger: "Watch the savings number tick upward",
        },
        ActionTemplate {
            id: "income-opportunity",
            action: "Reach out to one person about a paid opportunity",
            supports: "income-action",
            dependencies: &[],
            timeframe: Timeframe::TwoWeeks,
            category: Category::Behavioral,
            probability_shift: Decimal::from_parts(1, 0, 0, true, 1),
            resistance_shift: Decimal::from_parts(2, 0, 0, false, 1),
            dopamine_trigger: "Sending the message is the win, whatever the answer",
        },
        ActionTemplate {
            id: "invest-learning",
            action: "Spend thirty minutes learning one investment strategy",
            supports: "money-mindset",
            dependencies: &[],
            timeframe: Timeframe::OneWeek,
            category: Category::Cognitive,
            probability_shift: Decimal::ZERO,
            resistance_shift: Decimal::from_parts(1, 0, 0, false, 1),
            dopamine_trigger: "Each new concept compounds like interest",
        },
    ],
    paths: &[
        PathTemplate {
            id: "conservative",
            description: "Build stability first: track, budget, save",
            id_filter: &["track", "budget"],
            estimated_timeframe: "1 month",
            synchronicity_triggers: &[
                "Notice unexpected refunds or savings",
                "Pay attention to conversations about budgeting tools",
            ],
        },
        PathTemplate {
            id: "aggressive",
            description: "Grow income fast: new streams and investments",
            id_filter: &["income", "invest"],
            estimated_timeframe: "2 weeks",
            synchronicity_triggers: &[
                "Watch for people mentioning open roles or side projects",
                "Notice investment topics that keep coming up",
            ],
        },
        PathTemplate {
            id: "balanced",
            description: "Stabilize spending while opening one income door",
            id_filter: &["budget", "income"],
            estimated_timeframe: "3 weeks",
            synchronicity_triggers: &["Notice where money and opportunity meet in your week"],
        },
    ],
    environmental_directives: &[
        "Create a dedicated financial planning space in your home",
        "Keep a visible reminder of your savings goal where you see it daily",
        "Declutter your wallet and money apps",
    ],
    progress_indicators: &[
        "Savings balance growing week over week",
        "New income opportunities appearing",
        "Feeling calmer when checking your accounts",
    ],
    base_velocity: Decimal::from_parts(5, 0, 0, false, 1),
    signals: &[
        SignalRule {
            signal: "incomeIncrease",
            bonus: Decimal::from_parts(2, 0, 0, false, 1),
            next_action: "Direct part of the new income into savings",
            adjustment: "Add one more outreach for paid work this week",
        },
        SignalRule {
            signal: "savingsGrowth",
            bonus: Decimal::from_parts(1, 0, 0, false, 1),
            next_action: "Raise your savings target by five percent",
            adjustment: "Automate a small weekly transfer to savings",
        },
        SignalRule {
            signal: "debtReduction",
            bonus: Decimal::from_parts(1, 0, 0, false, 1),
            next_action: "Roll the freed-up payment into the next balance",
            adjustment: "List debts smallest to largest and pick one",
        },
    ],
    default_next_action: "Track today's spending before bed",
    probability,
    resistance,
};

#[cfg(test)]
mod tests {
    use manifest_types::{ExtractedData, InferredPreferences, UserProfile};
    use rust_decimal_macros::dec;

    use super::*;

    fn ctx_with_capacity(capacity: Option<CapacityLevel>) -> AgentContext {
        let mut ctx = AgentContext::from_extracted(ExtractedData::default());
        ctx.user_profile = Some(UserProfile {
            inferred_preferences: InferredPreferences {
                financial_capacity: capacity,
            },
        });
        ctx
    }

    #[test]
    fn probability_follows_capacity() {
        assert_eq!(probability(&ctx_with_capacity(None)), dec!(0.7));
        assert_eq!(probability(&ctx_with_capacity(Some(CapacityLevel::High))), dec!(0.9));
        assert_eq!(probability(&ctx_with_capacity(Some(CapacityLevel::Low))), dec!(0.6));
        assert_eq!(probability(&ctx_with_capacity(Some(CapacityLevel::Medium))), dec!(0.7));
    }

    #[test]
    fn resistance_stacks_and_clamps() {
        let mut ctx = AgentContext::from_extracted(ExtractedData::default());
        assert_eq!(resistance(&ctx), dec!(0.4));

        ctx.extracted_data.emotional_charge = "high".to_owned();
        assert_eq!(resistance(&ctx), dec!(0.6));

        ctx.extracted_data.constraints = vec!["resources".to_owned()];
        assert_eq!(resistance(&ctx), dec!(0.9));
    }

    #[test]
    fn three_strategies_are_offered() {
        let ids: Vec<&str> = PROFILE.paths.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["conservative", "aggressive", "balanced"]);
    }
}
