//! Environment agent: home and living space.

use manifest_types::{AgentContext, Category, Timeframe};
use rust_decimal::Decimal;

use crate::profile::{ActionTemplate, AgentProfile, NodeTemplate, PathTemplate, SignalRule};

const PROBABILITY: Decimal = Decimal::from_parts(75, 0, 0, false, 2);
const RESISTANCE: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

const fn probability(_ctx: &AgentContext) -> Decimal {
    PROBABILITY
}

const fn resistance(_ctx: &AgentContext) -> Decimal {
    RESISTANCE
}

/// Environment routing and planning tables.
pub static PROFILE: AgentProfile = AgentProfile {
    desire_label: "ideal living space",
    keywords: &[
        "home", "house", "apartment", "environment", "space", "room", "move", "living",
    ],
    nodes: &[
        NodeTemplate {
            id: "space-vision",
            action: "Picture the living space you want in detail",
            dependencies: &[],
            timeframe: Timeframe::OneDay,
            category: Category::Cognitive,
        },
        NodeTemplate {
            id: "declutter",
            action: "Release what no longer belongs in your space",
            dependencies: &["space-vision"],
            timeframe: Timeframe::TwoWeeks,
            category: Category::Environmental,
        },
        NodeTemplate {
            id: "layout-change",
            action: "Rearrange your current space toward the vision",
            dependencies: &["declutter"],
            timeframe: Timeframe::OneWeek,
            category: Category::Environmental,
        },
        NodeTemplate {
            id: "home-energy",
            action: "Bring light, air and plants into your home",
            dependencies: &["declutter"],
            timeframe: Timeframe::Immediate,
            category: Category::Energetic,
        },
        NodeTemplate {
            id: "housing-search",
            action: "Actively explore places that match your vision",
            dependencies: &["space-vision"],
            timeframe: Timeframe::OneMonth,
            category: Category::Behavioral,
        },
    ],
    actions: &[
        ActionTemplate {
            id: "declutter-drawer",
            action: "Empty and sort one drawer right now",
            supports: "declutter",
            dependencies: &[],
            timeframe: Timeframe::Immediate,
            category: Category::Environmental,
            probability_shift: Decimal::ZERO,
            resistance_shift: Decimal::ZERO,
            dopamine_trigger: "Take a before and after photo",
        },
        ActionTemplate {
            id: "vision-board",
            action: "Collect five images of your ideal space",
            supports: "space-vision",
            dependencies: &[],
            timeframe: Timeframe::OneDay,
            category: Category::Cognitive,
            probability_shift: Decimal::ZERO,
            resistance_shift: Decimal::ZERO,
            dopamine_trigger: "Set your favorite image as your wallpaper",
        },
        ActionTemplate {
            id: "rearrange-room",
            action: "Rearrange one room to match the feeling you want",
            supports: "layout-change",
            dependencies: &["declutter-drawer"],
            timeframe: Timeframe::OneWeek,
            category: Category::Environmental,
            probability_shift: Decimal::ZERO,
            resistance_shift: Decimal::ZERO,
            dopamine_trigger: "Sit in the new arrangement for five quiet minutes",
        },
        ActionTemplate {
            id: "listing-review",
            action: "Review listings or renovation ideas twice a week",
            supports: "housing-search",
            dependencies: &["vision-board"],
            timeframe: Timeframe::TwoWeeks,
            category: Category::Behavioral,
            probability_shift: Decimal::ZERO,
            resistance_shift: Decimal::ZERO,
            dopamine_trigger: "Save every place that makes you smile",
        },
    ],
    paths: &[PathTemplate {
        id: "environment-path",
        description: "Clear the old space and step toward the new one",
        id_filter: &[],
        estimated_timeframe: "1 month",
        synchronicity_triggers: &[
            "Notice homes and rooms that match your vision",
            "Listen for friends mentioning places that are opening up",
        ],
    }],
    environmental_directives: &[
        "Clear one surface in every room and keep it clear",
        "Open windows daily to refresh the energy of your space",
    ],
    progress_indicators: &[
        "Your space feels lighter",
        "Finding things takes less time",
        "Places matching your vision keep appearing",
    ],
    base_velocity: Decimal::from_parts(6, 0, 0, false, 1),
    signals: &[
        SignalRule {
            signal: "spaceCleared",
            bonus: Decimal::from_parts(15, 0, 0, false, 2),
            next_action: "Move on to the next room",
            adjustment: "Start with a single shelf instead of a whole room",
        },
        SignalRule {
            signal: "moveProgress",
            bonus: Decimal::from_parts(2, 0, 0, false, 1),
            next_action: "Schedule viewings for your top two options",
            adjustment: "Narrow your search to one neighborhood",
        },
        SignalRule {
            signal: "feelingAtHome",
            bonus: Decimal::from_parts(1, 0, 0, false, 1),
            next_action: "Add one object that feels like the future you",
            adjustment: "Change the lighting in the room you use most",
        },
    ],
    default_next_action: "Clear one drawer before the end of the day",
    probability,
    resistance,
};
