//! Health agent: fitness, wellness and energy.
//!
//! Modeled as inherently low-friction: probability and resistance are
//! fixed at 0.8 / 0.3 whatever the context.

use manifest_types::{AgentContext, Category, Timeframe};
use rust_decimal::Decimal;

use crate::profile::{ActionTemplate, AgentProfile, NodeTemplate, PathTemplate, SignalRule};

const PROBABILITY: Decimal = Decimal::from_parts(8, 0, 0, false, 1);
const RESISTANCE: Decimal = Decimal::from_parts(3, 0, 0, false, 1);

const fn probability(_ctx: &AgentContext) -> Decimal {
    PROBABILITY
}

const fn resistance(_ctx: &AgentContext) -> Decimal {
    RESISTANCE
}

/// Health routing and planning tables.
pub static PROFILE: AgentProfile = AgentProfile {
    desire_label: "optimal health",
    keywords: &[
        "health", "fitness", "wellness", "weight", "exercise", "energy", "sleep", "diet", "body",
    ],
    nodes: &[
        NodeTemplate {
            id: "health-intention",
            action: "Define what feeling healthy looks like for you",
            dependencies: &[],
            timeframe: Timeframe::Immediate,
            category: Category::Cognitive,
        },
        NodeTemplate {
            id: "movement-habit",
            action: "Build a daily movement habit",
            dependencies: &["health-intention"],
            timeframe: Timeframe::TwoWeeks,
            category: Category::Behavioral,
        },
        NodeTemplate {
            id: "nourishing-kitchen",
            action: "Stock your kitchen with foods that support your goal",
            dependencies: &[],
            timeframe: Timeframe::OneWeek,
            category: Category::Environmental,
        },
        NodeTemplate {
            id: "sleep-routine",
            action: "Protect a consistent sleep window",
            dependencies: &["health-intention"],
            timeframe: Timeframe::OneWeek,
            category: Category::Behavioral,
        },
        NodeTemplate {
            id: "vitality-energy",
            action: "Notice and celebrate rising energy levels",
            dependencies: &["movement-habit"],
            timeframe: Timeframe::OneMonth,
            category: Category::Energetic,
        },
    ],
    actions: &[
        ActionTemplate {
            id: "morning-walk",
            action: "Take a ten minute walk after waking",
            supports: "movement-habit",
            dependencies: &[],
            timeframe: Timeframe::OneDay,
            category: Category::Behavioral,
            probability_shift: Decimal::ZERO,
            resistance_shift: Decimal::ZERO,
            dopamine_trigger: "Check off the walk the moment you're back inside",
        },
        ActionTemplate {
            id: "water-tracking",
            action: "Drink a full glass of water right now",
            supports: "health-intention",
            dependencies: &[],
            timeframe: Timeframe::Immediate,
            category: Category::Behavioral,
            probability_shift: Decimal::ZERO,
            resistance_shift: Decimal::ZERO,
            dopamine_trigger: "One glass down, your body says thanks",
        },
        ActionTemplate {
            id: "meal-prep",
            action: "Prepare three healthy meals in advance",
            supports: "nourishing-kitchen",
            dependencies: &[],
            timeframe: Timeframe::OneWeek,
            category: Category::Environmental,
            probability_shift: Decimal::ZERO,
            resistance_shift: Decimal::ZERO,
            dopamine_trigger: "Open the fridge and see your future self cared for",
        },
        ActionTemplate {
            id: "sleep-window",
            action: "Go to bed at the same time for fourteen nights",
            supports: "sleep-routine",
            dependencies: &["morning-walk"],
            timeframe: Timeframe::TwoWeeks,
            category: Category::Behavioral,
            probability_shift: Decimal::ZERO,
            resistance_shift: Decimal::ZERO,
            dopamine_trigger: "Count the streak, not the hours",
        },
    ],
    paths: &[PathTemplate {
        id: "health-path",
        description: "Small daily wins that compound into vitality",
        id_filter: &[],
        estimated_timeframe: "1 month",
        synchronicity_triggers: &[
            "Notice invitations to move: stairs, walks, a friend's class",
            "Pay attention to foods that leave you energized",
        ],
    }],
    environmental_directives: &[
        "Keep a filled water bottle visible on your desk",
        "Set up a clear, inviting corner for movement",
    ],
    progress_indicators: &[
        "More energy in the afternoon",
        "Sleeping through the night",
        "Movement feels easier each week",
    ],
    base_velocity: Decimal::from_parts(6, 0, 0, false, 1),
    signals: &[
        SignalRule {
            signal: "energyIncrease",
            bonus: Decimal::from_parts(2, 0, 0, false, 1),
            next_action: "Add five minutes to your daily movement",
            adjustment: "Shorten sessions so they fit low-energy days",
        },
        SignalRule {
            signal: "sleepQuality",
            bonus: Decimal::from_parts(1, 0, 0, false, 1),
            next_action: "Keep the sleep window through the weekend",
            adjustment: "Move screens out of the bedroom",
        },
        SignalRule {
            signal: "consistentExercise",
            bonus: Decimal::from_parts(1, 0, 0, false, 1),
            next_action: "Try one new form of movement this week",
            adjustment: "Anchor exercise to an existing habit",
        },
    ],
    default_next_action: "Drink a glass of water and take a short walk",
    probability,
    resistance,
};
