//! Career agent: work and professional growth.

use manifest_types::{AgentContext, Category, Timeframe};
use rust_decimal::Decimal;

use crate::profile::{ActionTemplate, AgentProfile, NodeTemplate, PathTemplate, SignalRule};

const PROBABILITY: Decimal = Decimal::from_parts(7, 0, 0, false, 1);
const RESISTANCE: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

const fn probability(_ctx: &AgentContext) -> Decimal {
    PROBABILITY
}

const fn resistance(_ctx: &AgentContext) -> Decimal {
    RESISTANCE
}

/// Career routing and planning tables.
pub static PROFILE: AgentProfile = AgentProfile {
    desire_label: "career advancement",
    keywords: &[
        "career", "job", "work", "promotion", "business", "boss", "profession", "interview",
    ],
    nodes: &[
        NodeTemplate {
            id: "career-vision",
            action: "Name the role you want a year from now",
            dependencies: &[],
            timeframe: Timeframe::OneDay,
            category: Category::Cognitive,
        },
        NodeTemplate {
            id: "skill-gap",
            action: "Identify the one skill between you and that role",
            dependencies: &["career-vision"],
            timeframe: Timeframe::OneWeek,
            category: Category::Cognitive,
        },
        NodeTemplate {
            id: "workspace-setup",
            action: "Set up a workspace that signals focus",
            dependencies: &[],
            timeframe: Timeframe::OneWeek,
            category: Category::Environmental,
        },
        NodeTemplate {
            id: "visibility-action",
            action: "Make your work visible to people who can open doors",
            dependencies: &["skill-gap"],
            timeframe: Timeframe::OneMonth,
            category: Category::Behavioral,
        },
        NodeTemplate {
            id: "confidence-energy",
            action: "Carry yourself as the professional you are becoming",
            dependencies: &[],
            timeframe: Timeframe::Immediate,
            category: Category::Energetic,
        },
    ],
    actions: &[
        ActionTemplate {
            id: "update-profile",
            action: "Update your professional profile with one recent win",
            supports: "visibility-action",
            dependencies: &[],
            timeframe: Timeframe::OneDay,
            category: Category::Behavioral,
            probability_shift: Decimal::ZERO,
            resistance_shift: Decimal::ZERO,
            dopamine_trigger: "Read your win out loud once it's posted",
        },
        ActionTemplate {
            id: "skill-session",
            action: "Block a focused hour to practice the missing skill",
            supports: "skill-gap",
            dependencies: &[],
            timeframe: Timeframe::OneWeek,
            category: Category::Cognitive,
            probability_shift: Decimal::ZERO,
            resistance_shift: Decimal::ZERO,
            dopamine_trigger: "Log what you learned in one sentence",
        },
        ActionTemplate {
            id: "network-message",
            action: "Send one message to someone in the role you want",
            supports: "visibility-action",
            dependencies: &["update-profile"],
            timeframe: Timeframe::Immediate,
            category: Category::Behavioral,
            probability_shift: Decimal::ZERO,
            resistance_shift: Decimal::ZERO,
            dopamine_trigger: "Hitting send is the whole win",
        },
        ActionTemplate {
            id: "portfolio-piece",
            action: "Finish one piece of work that shows the new skill",
            supports: "skill-gap",
            dependencies: &["skill-session"],
            timeframe: Timeframe::OneMonth,
            category: Category::Behavioral,
            probability_shift: Decimal::ZERO,
            resistance_shift: Decimal::ZERO,
            dopamine_trigger: "Share it with one person who will cheer",
        },
    ],
    paths: &[PathTemplate {
        id: "career-path",
        description: "Close the skill gap and make it visible",
        id_filter: &[],
        estimated_timeframe: "3 months",
        synchronicity_triggers: &[
            "Notice job posts or projects that match your vision",
            "Say yes to conversations with people a step ahead",
        ],
    }],
    environmental_directives: &[
        "Clear your desk of everything unrelated to your next career step",
        "Post your one-year role where you start each workday",
    ],
    progress_indicators: &[
        "Recruiters or colleagues reaching out",
        "More confidence speaking about your work",
        "New responsibilities offered",
    ],
    base_velocity: Decimal::from_parts(5, 0, 0, false, 1),
    signals: &[
        SignalRule {
            signal: "interviewOffer",
            bonus: Decimal::from_parts(2, 0, 0, false, 1),
            next_action: "Prepare three stories that show your impact",
            adjustment: "Widen outreach to two new contacts",
        },
        SignalRule {
            signal: "skillProgress",
            bonus: Decimal::from_parts(1, 0, 0, false, 1),
            next_action: "Turn the new skill into a visible deliverable",
            adjustment: "Shrink practice sessions to twenty minutes daily",
        },
        SignalRule {
            signal: "networkGrowth",
            bonus: Decimal::from_parts(1, 0, 0, false, 1),
            next_action: "Ask one new contact for an introduction",
            adjustment: "Comment thoughtfully on one industry post a day",
        },
    ],
    default_next_action: "Write down the role you want a year from now",
    probability,
    resistance,
};
