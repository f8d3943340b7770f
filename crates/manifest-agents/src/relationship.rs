//! Relationship agent: love, partnership and connection.

use manifest_types::{AgentContext, Category, Timeframe};
use rust_decimal::Decimal;

use crate::profile::{ActionTemplate, AgentProfile, NodeTemplate, PathTemplate, SignalRule};

const PROBABILITY: Decimal = Decimal::from_parts(8, 0, 0, false, 1);
const RESISTANCE: Decimal = Decimal::from_parts(4, 0, 0, false, 1);

const fn probability(_ctx: &AgentContext) -> Decimal {
    PROBABILITY
}

const fn resistance(_ctx: &AgentContext) -> Decimal {
    RESISTANCE
}

/// Relationship routing and planning tables.
pub static PROFILE: AgentProfile = AgentProfile {
    desire_label: "harmonious relationships",
    keywords: &[
        "love", "relationship", "partner", "dating", "marriage", "friend", "romance", "soulmate",
    ],
    nodes: &[
        NodeTemplate {
            id: "self-worth",
            action: "Acknowledge what you bring to a relationship",
            dependencies: &[],
            timeframe: Timeframe::OneWeek,
            category: Category::Cognitive,
        },
        NodeTemplate {
            id: "openness-energy",
            action: "Open up to warmth from the people around you",
            dependencies: &["self-worth"],
            timeframe: Timeframe::TwoWeeks,
            category: Category::Energetic,
        },
        NodeTemplate {
            id: "welcoming-space",
            action: "Make your home ready to welcome someone in",
            dependencies: &[],
            timeframe: Timeframe::OneWeek,
            category: Category::Environmental,
        },
        NodeTemplate {
            id: "connection-action",
            action: "Create regular chances for real connection",
            dependencies: &["openness-energy"],
            timeframe: Timeframe::OneMonth,
            category: Category::Behavioral,
        },
    ],
    actions: &[
        ActionTemplate {
            id: "gratitude-note",
            action: "Send a short note of thanks to someone you care about",
            supports: "openness-energy",
            dependencies: &[],
            timeframe: Timeframe::Immediate,
            category: Category::Energetic,
            probability_shift: Decimal::ZERO,
            resistance_shift: Decimal::ZERO,
            dopamine_trigger: "Notice the warmth when they reply",
        },
        ActionTemplate {
            id: "social-plan",
            action: "Put one social plan on the calendar this week",
            supports: "connection-action",
            dependencies: &[],
            timeframe: Timeframe::OneWeek,
            category: Category::Behavioral,
            probability_shift: Decimal::ZERO,
            resistance_shift: Decimal::ZERO,
            dopamine_trigger: "Seeing it on the calendar makes it real",
        },
        ActionTemplate {
            id: "boundary-reflection",
            action: "Write down three qualities you want in a partner",
            supports: "self-worth",
            dependencies: &[],
            timeframe: Timeframe::OneDay,
            category: Category::Cognitive,
            probability_shift: Decimal::ZERO,
            resistance_shift: Decimal::ZERO,
            dopamine_trigger: "Circle the one that matters most",
        },
        ActionTemplate {
            id: "quality-time",
            action: "Spend an hour of undistracted time with someone close",
            supports: "connection-action",
            dependencies: &["social-plan"],
            timeframe: Timeframe::TwoWeeks,
            category: Category::Behavioral,
            probability_shift: Decimal::ZERO,
            resistance_shift: Decimal::ZERO,
            dopamine_trigger: "Phone away, heart open",
        },
    ],
    paths: &[PathTemplate {
        id: "relationship-path",
        description: "Grow self-worth and open the door to connection",
        id_filter: &[],
        estimated_timeframe: "1 month",
        synchronicity_triggers: &[
            "Notice people who light up when you speak",
            "Say yes to one unexpected invitation",
        ],
    }],
    environmental_directives: &[
        "Make space in your home and schedule for someone new",
        "Display something that reminds you of love you've already felt",
    ],
    progress_indicators: &[
        "Conversations feel easier and warmer",
        "More invitations arriving",
        "Feeling worthy of the love you want",
    ],
    base_velocity: Decimal::from_parts(6, 0, 0, false, 1),
    signals: &[
        SignalRule {
            signal: "meaningfulConnection",
            bonus: Decimal::from_parts(2, 0, 0, false, 1),
            next_action: "Follow up within two days of the connection",
            adjustment: "Join one group built around something you enjoy",
        },
        SignalRule {
            signal: "improvedCommunication",
            bonus: Decimal::from_parts(15, 0, 0, false, 2),
            next_action: "Share one honest feeling this week",
            adjustment: "Practice listening without planning your reply",
        },
        SignalRule {
            signal: "selfLoveProgress",
            bonus: Decimal::from_parts(1, 0, 0, false, 1),
            next_action: "Treat yourself to the date you would plan for a partner",
            adjustment: "Write one thing you like about yourself each morning",
        },
    ],
    default_next_action: "Send a note of thanks to someone you care about",
    probability,
    resistance,
};
