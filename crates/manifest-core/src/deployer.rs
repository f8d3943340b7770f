//! Action deployment: causal map to prioritized, time-boxed sequences.
//!
//! The full causal map is grouped by [`Category`]; each group becomes one
//! [`ActionSequence`] with a priority derived from how many of its actions
//! are easy and a duration bucket derived from summed day-equivalents.
//!
//! # Determinism
//!
//! Only the dopamine trigger text reads the random source. Difficulty,
//! priority, duration, ordering and milestones are pure functions of the
//! causal map, so two deployments of the same map differ at most in that
//! one string per action.

use rand::Rng;
use rand::seq::IndexedRandom;
use rust_decimal::Decimal;
use tracing::debug;

use manifest_types::{
    ActionSequence, CausalNode, Category, Difficulty, ExecutableAction, Milestone, Priority,
    ProgressTracker, Timeframe,
};

/// Resistance below this is easy.
const EASY_RESISTANCE: Decimal = Decimal::from_parts(3, 0, 0, false, 1);

/// Resistance below this (and not easy) is medium.
const MEDIUM_RESISTANCE: Decimal = Decimal::from_parts(6, 0, 0, false, 1);

/// Reward cues; one is drawn per action.
pub const DOPAMINE_POOL: [&str; 8] = [
    "Celebrate this step with a small victory dance",
    "Tick it off and feel the momentum build",
    "Share this win with someone who believes in you",
    "Take a deep breath and savor the progress",
    "Reward yourself with something you enjoy",
    "Notice how much lighter you feel afterwards",
    "Add a gold star to your tracker",
    "Say out loud: one step closer",
];

/// Closing directive appended after the per-node ones.
pub const ALIGNMENT_DIRECTIVE: &str =
    "Keep your surroundings aligned with the version of you who already has this";

/// Group the causal map into sequences, highest priority first.
///
/// Categories are visited in declaration order, and the sort by priority
/// is stable, so equal priorities keep that order.
pub fn deploy_action_plan(causal_map: &[CausalNode], rng: &mut impl Rng) -> Vec<ActionSequence> {
    let mut sequences: Vec<ActionSequence> = Category::ALL
        .into_iter()
        .filter_map(|category| {
            let nodes: Vec<&CausalNode> =
                causal_map.iter().filter(|n| n.category == category).collect();
            if nodes.is_empty() {
                return None;
            }

            let actions: Vec<ExecutableAction> =
                nodes.iter().map(|node| executable_action(node, rng)).collect();
            Some(ActionSequence {
                category,
                priority: sequence_priority(&actions),
                estimated_duration: estimated_duration(nodes.iter().map(|n| n.timeframe))
                    .to_owned(),
                actions,
            })
        })
        .collect();

    sequences.sort_by(|a, b| b.priority.cmp(&a.priority));

    debug!(
        nodes = causal_map.len(),
        sequences = sequences.len(),
        "action plan deployed"
    );
    sequences
}

/// Difficulty from resistance: `< 0.3` easy, `< 0.6` medium, else hard.
pub fn difficulty_for(resistance: Decimal) -> Difficulty {
    if resistance < EASY_RESISTANCE {
        Difficulty::Easy
    } else if resistance < MEDIUM_RESISTANCE {
        Difficulty::Medium
    } else {
        Difficulty::Hard
    }
}

/// Priority from the easy fraction: `> 70%` high, `> 40%` medium, else low.
pub fn sequence_priority(actions: &[ExecutableAction]) -> Priority {
    let total = actions.len();
    let easy = actions
        .iter()
        .filter(|a| a.difficulty == Difficulty::Easy)
        .count();

    // Compare easy/total against 7/10 and 4/10 without division.
    let scaled = easy.saturating_mul(10);
    if total > 0 && scaled > total.saturating_mul(7) {
        Priority::High
    } else if total > 0 && scaled > total.saturating_mul(4) {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Bucket the summed day-equivalents of `timeframes`.
pub fn estimated_duration(timeframes: impl Iterator<Item = Timeframe>) -> &'static str {
    let days = timeframes.fold(0_u32, |sum, t| sum.saturating_add(t.day_equivalent()));
    match days {
        0..=7 => "1 week",
        8..=14 => "2 weeks",
        15..=30 => "1 month",
        _ => "2 months",
    }
}

/// One directive per environmental node plus [`ALIGNMENT_DIRECTIVE`].
pub fn generate_environmental_directives(causal_map: &[CausalNode]) -> Vec<String> {
    causal_map
        .iter()
        .filter(|n| n.category == Category::Environmental)
        .map(|n| format!("Shape your space to support this: {}", n.action))
        .chain(std::iter::once(ALIGNMENT_DIRECTIVE.to_owned()))
        .collect()
}

/// Tracker with start, optional midpoint, and completion milestones.
pub fn create_progress_tracker(node: &CausalNode) -> ProgressTracker {
    ProgressTracker {
        action_id: node.id.clone(),
        milestones: generate_milestones(node.timeframe),
        completed: false,
    }
}

/// Milestones for an action; only one- and two-week actions get a midpoint.
pub fn generate_milestones(timeframe: Timeframe) -> Vec<Milestone> {
    let mut milestones = vec![Milestone {
        label: "Started".to_owned(),
        progress_pct: 0,
    }];
    if matches!(timeframe, Timeframe::OneWeek | Timeframe::TwoWeeks) {
        milestones.push(Milestone {
            label: "Halfway there".to_owned(),
            progress_pct: 50,
        });
    }
    milestones.push(Milestone {
        label: "Completed".to_owned(),
        progress_pct: 100,
    });
    milestones
}

/// One random cue from [`DOPAMINE_POOL`].
pub fn dopamine_trigger(rng: &mut impl Rng) -> String {
    DOPAMINE_POOL
        .choose(rng)
        .copied()
        .unwrap_or_default()
        .to_owned()
}

/// Fixed opportunity-noticing line per category.
pub const fn synchronicity_trigger(category: Category) -> &'static str {
    match category {
        Category::Environmental => "Notice how your space starts to invite the change",
        Category::Behavioral => "Watch for openings that make the next step easier",
        Category::Cognitive => "Pay attention to ideas that arrive right after this",
        Category::Energetic => "Notice who and what shows up when you feel this way",
    }
}

/// Category-specific instructions wrapping the node's action.
pub fn instructions_for(node: &CausalNode) -> String {
    match node.category {
        Category::Environmental => format!(
            "Change one thing in your surroundings so this becomes the easy default: {}",
            node.action
        ),
        Category::Behavioral => format!(
            "Pick a specific time and start with the smallest version: {}",
            node.action
        ),
        Category::Cognitive => format!(
            "Set aside ten quiet minutes and write your thoughts as you work through: {}",
            node.action
        ),
        Category::Energetic => format!(
            "Pause, breathe slowly, and connect with the feeling of: {}",
            node.action
        ),
    }
}

fn executable_action(node: &CausalNode, rng: &mut impl Rng) -> ExecutableAction {
    ExecutableAction {
        id: node.id.clone(),
        action: node.action.clone(),
        instructions: instructions_for(node),
        category: node.category,
        timeframe: node.timeframe,
        difficulty: difficulty_for(node.resistance),
        dopamine_trigger: dopamine_trigger(rng),
        synchronicity_trigger: synchronicity_trigger(node.category).to_owned(),
        progress: create_progress_tracker(node),
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rust_decimal_macros::dec;

    use super::*;

    fn node(id: &str, category: Category, resistance: Decimal, timeframe: Timeframe) -> CausalNode {
        CausalNode {
            id: id.to_owned(),
            action: format!("Do {id}"),
            dependencies: Vec::new(),
            probability: dec!(0.7),
            resistance,
            timeframe,
            category,
        }
    }

    // -----------------------------------------------------------------------
    // Difficulty and priority
    // -----------------------------------------------------------------------

    #[test]
    fn difficulty_thresholds() {
        assert_eq!(difficulty_for(dec!(0.0)), Difficulty::Easy);
        assert_eq!(difficulty_for(dec!(0.29)), Difficulty::Easy);
        assert_eq!(difficulty_for(dec!(0.3)), Difficulty::Medium);
        assert_eq!(difficulty_for(dec!(0.59)), Difficulty::Medium);
        assert_eq!(difficulty_for(dec!(0.6)), Difficulty::Hard);
        assert_eq!(difficulty_for(Decimal::ONE), Difficulty::Hard);
    }

    #[test]
    fn priority_thresholds_are_strict() {
        let mut rng = StdRng::seed_from_u64(1);
        let actions = |easy: usize, total: usize, rng: &mut StdRng| -> Vec<ExecutableAction> {
            (0..total)
                .map(|i| {
                    let r = if i < easy { dec!(0.1) } else { dec!(0.9) };
                    executable_action(
                        &node(&format!("n{i}"), Category::Behavioral, r, Timeframe::OneDay),
                        rng,
                    )
                })
                .collect()
        };

        assert_eq!(sequence_priority(&actions(8, 10, &mut rng)), Priority::High);
        assert_eq!(sequence_priority(&actions(7, 10, &mut rng)), Priority::Medium);
        assert_eq!(sequence_priority(&actions(5, 10, &mut rng)), Priority::Medium);
        assert_eq!(sequence_priority(&actions(4, 10, &mut rng)), Priority::Low);
        assert_eq!(sequence_priority(&[]), Priority::Low);
    }

    // -----------------------------------------------------------------------
    // Duration
    // -----------------------------------------------------------------------

    #[test]
    fn duration_buckets() {
        use Timeframe::{Immediate, OneDay, OneMonth, OneWeek, ThreeMonths, TwoWeeks};
        assert_eq!(estimated_duration([Immediate, OneWeek].into_iter()), "1 week");
        assert_eq!(estimated_duration([OneWeek, OneDay].into_iter()), "2 weeks");
        assert_eq!(estimated_duration([TwoWeeks, TwoWeeks].into_iter()), "1 month");
        assert_eq!(estimated_duration([OneMonth, OneDay].into_iter()), "2 months");
        assert_eq!(estimated_duration([ThreeMonths].into_iter()), "2 months");
        assert_eq!(estimated_duration(std::iter::empty()), "1 week");
    }

    // -----------------------------------------------------------------------
    // Directives and milestones
    // -----------------------------------------------------------------------

    #[test]
    fn directives_are_environmental_count_plus_one() {
        let map = vec![
            node("a", Category::Environmental, dec!(0.2), Timeframe::OneDay),
            node("b", Category::Behavioral, dec!(0.2), Timeframe::OneDay),
            node("c", Category::Environmental, dec!(0.2), Timeframe::OneDay),
        ];
        let directives = generate_environmental_directives(&map);
        assert_eq!(directives.len(), 3);
        assert_eq!(directives.last().map(String::as_str), Some(ALIGNMENT_DIRECTIVE));
        assert_eq!(generate_environmental_directives(&[]).len(), 1);
    }

    #[test]
    fn midpoint_only_for_one_or_two_weeks() {
        for timeframe in [
            Timeframe::Immediate,
            Timeframe::OneDay,
            Timeframe::OneMonth,
            Timeframe::ThreeMonths,
        ] {
            assert_eq!(generate_milestones(timeframe).len(), 2, "{timeframe}");
        }
        for timeframe in [Timeframe::OneWeek, Timeframe::TwoWeeks] {
            let milestones = generate_milestones(timeframe);
            let pcts: Vec<u8> = milestones.iter().map(|m| m.progress_pct).collect();
            assert_eq!(pcts, vec![0, 50, 100]);
        }
    }

    // -----------------------------------------------------------------------
    // Deployment
    // -----------------------------------------------------------------------

    #[test]
    fn groups_by_category_and_sorts_by_priority() {
        let map = vec![
            node("env-1", Category::Environmental, dec!(0.5), Timeframe::OneWeek),
            node("beh-1", Category::Behavioral, dec!(0.1), Timeframe::OneDay),
            node("env-2", Category::Environmental, dec!(0.7), Timeframe::OneDay),
            node("beh-2", Category::Behavioral, dec!(0.2), Timeframe::Immediate),
            node("beh-3", Category::Behavioral, dec!(0.25), Timeframe::OneDay),
        ];
        let sequences = deploy_action_plan(&map, &mut StdRng::seed_from_u64(7));

        assert_eq!(sequences.len(), 2);
        let first = sequences.first().map(|s| (s.category, s.priority));
        let second = sequences.get(1).map(|s| (s.category, s.priority));
        assert_eq!(first, Some((Category::Behavioral, Priority::High)));
        assert_eq!(second, Some((Category::Environmental, Priority::Low)));
    }

    #[test]
    fn randomness_only_touches_dopamine_text() {
        let map = vec![
            node("a", Category::Cognitive, dec!(0.2), Timeframe::OneWeek),
            node("b", Category::Energetic, dec!(0.4), Timeframe::OneMonth),
        ];
        let strip = |mut seqs: Vec<ActionSequence>| {
            for seq in &mut seqs {
                for action in &mut seq.actions {
                    action.dopamine_trigger.clear();
                }
            }
            seqs
        };
        let one = strip(deploy_action_plan(&map, &mut StdRng::seed_from_u64(1)));
        let two = strip(deploy_action_plan(&map, &mut StdRng::seed_from_u64(99)));
        assert_eq!(one, two);
    }

    #[test]
    fn same_seed_gives_identical_plan() {
        let map = vec![node("a", Category::Cognitive, dec!(0.2), Timeframe::OneWeek)];
        assert_eq!(
            deploy_action_plan(&map, &mut StdRng::seed_from_u64(3)),
            deploy_action_plan(&map, &mut StdRng::seed_from_u64(3))
        );
    }

    #[test]
    fn dopamine_trigger_comes_from_pool() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let cue = dopamine_trigger(&mut rng);
            assert!(DOPAMINE_POOL.contains(&cue.as_str()));
        }
    }

    #[test]
    fn empty_map_deploys_nothing() {
        assert!(deploy_action_plan(&[], &mut StdRng::seed_from_u64(0)).is_empty());
    }
}
