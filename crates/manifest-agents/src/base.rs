//! The capability contract shared by every domain agent.
//!
//! Agents are a closed set ([`AgentKind`]); each variant resolves to a
//! static [`AgentProfile`] and all behavior is implemented once here,
//! parameterised by that table. Every operation is a pure function of its
//! inputs and never fails: a context with no matching signal still yields
//! a valid graph, path and plan.

use manifest_types::{
    AgentContext, AgentKind, AgentResult, CausalNode, Evaluation, MicroAction, OutcomeSignals,
    RealityPath,
};
use rust_decimal::Decimal;
use tracing::debug;

use crate::graph::{prune_dangling, validate_graph};
use crate::profile::{AgentProfile, clamp_unit};
use crate::{career, environment, finance, health, relationship};

/// Added to resistance when ranking paths so zero resistance cannot divide by zero.
pub const PATH_RESISTANCE_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Score of an agent that matched at least one keyword.
const MATCH_BASE_SCORE: Decimal = Decimal::from_parts(5, 0, 0, false, 1);
/// Added per matched keyword.
const PER_KEYWORD_SCORE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);
/// Added when the inferred core desire belongs to the agent's domain.
const DESIRE_MATCH_BONUS: Decimal = Decimal::from_parts(2, 0, 0, false, 1);

/// The operations every domain agent supports.
///
/// Implemented for [`AgentKind`]; the default methods are the shared
/// algorithms and only [`profile`](DomainAgent::profile) differs per
/// variant.
pub trait DomainAgent: Copy {
    /// Static tables of this agent.
    fn profile(self) -> &'static AgentProfile;

    /// Identity of this agent.
    fn kind(self) -> AgentKind;

    /// Routing score in `[0, 1]`; zero means the agent does not apply.
    fn score(self, ctx: &AgentContext) -> Decimal {
        let profile = self.profile();
        let haystack = format!(
            "{} {}",
            ctx.extracted_data.core_desire, ctx.conversation_text
        )
        .to_lowercase();

        let matched = profile
            .keywords
            .iter()
            .filter(|kw| haystack.contains(**kw))
            .count();
        if matched == 0 {
            return Decimal::ZERO;
        }

        let keyword_score = PER_KEYWORD_SCORE.saturating_mul(Decimal::from(matched));
        let mut score = MATCH_BASE_SCORE.saturating_add(keyword_score);
        if ctx.extracted_data.core_desire == profile.desire_label {
            score = score.saturating_add(DESIRE_MATCH_BONUS);
        }
        clamp_unit(score)
    }

    /// Whether the agent applies to the context at all.
    fn can_handle(self, ctx: &AgentContext) -> bool {
        self.score(ctx) > Decimal::ZERO
    }

    /// Domain dependency graph with computed probability and resistance.
    fn analyze_dependencies(self, ctx: &AgentContext) -> Vec<CausalNode> {
        let profile = self.profile();
        let probability = (profile.probability)(ctx);
        let resistance = (profile.resistance)(ctx);

        let nodes: Vec<CausalNode> = profile
            .nodes
            .iter()
            .map(|t| CausalNode {
                id: t.id.to_owned(),
                action: t.action.to_owned(),
                dependencies: t.dependencies.iter().map(|d| (*d).to_owned()).collect(),
                probability,
                resistance,
                timeframe: t.timeframe,
                category: t.category,
            })
            .collect();

        debug_assert!(validate_graph(&nodes).is_ok(), "{} node catalog is malformed", self.kind());
        nodes
    }

    /// Micro-actions advancing the nodes present in `causal_map`.
    fn generate_micro_actions(
        self,
        ctx: &AgentContext,
        causal_map: &[CausalNode],
    ) -> Vec<MicroAction> {
        let profile = self.profile();
        let probability = (profile.probability)(ctx);
        let resistance = (profile.resistance)(ctx);

        let mut actions: Vec<MicroAction> = profile
            .actions
            .iter()
            .filter(|t| causal_map.iter().any(|n| n.id == t.supports))
            .map(|t| MicroAction {
                id: t.id.to_owned(),
                action: t.action.to_owned(),
                dependencies: t.dependencies.iter().map(|d| (*d).to_owned()).collect(),
                probability: clamp_unit(probability.saturating_add(t.probability_shift)),
                resistance: clamp_unit(resistance.saturating_add(t.resistance_shift)),
                timeframe: t.timeframe,
                category: t.category,
                dopamine_trigger: Some(t.dopamine_trigger.to_owned()),
            })
            .collect();

        // A node missing from the map can take a dependency target with it.
        let snapshot = actions.clone();
        for action in &mut actions {
            action.dependencies = prune_dangling(&snapshot, &action.dependencies);
        }
        actions
    }

    /// Candidate strategies over the micro-actions; always at least one.
    fn simulate_paths(self, ctx: &AgentContext, micro_actions: &[MicroAction]) -> Vec<RealityPath> {
        let profile = self.profile();
        let desire_trigger = format!(
            "Notice every mention of {} that crosses your path today",
            ctx.extracted_data.core_desire
        );

        let mut paths: Vec<RealityPath> = profile
            .paths
            .iter()
            .filter_map(|t| {
                let steps: Vec<MicroAction> = micro_actions
                    .iter()
                    .filter(|a| {
                        t.id_filter.is_empty() || t.id_filter.iter().any(|f| a.id.contains(f))
                    })
                    .cloned()
                    .collect();
                if steps.is_empty() {
                    return None;
                }
                let mut triggers: Vec<String> =
                    t.synchronicity_triggers.iter().map(|s| (*s).to_owned()).collect();
                triggers.push(desire_trigger.clone());
                Some(build_path(t.id, t.description, steps, t.estimated_timeframe, triggers))
            })
            .collect();

        if paths.is_empty() {
            paths.push(build_path(
                &format!("{}-path", self.kind()),
                "Every available action in order",
                micro_actions.to_vec(),
                "1 month",
                vec![desire_trigger],
            ));
        }
        paths
    }

    /// Causal view of the chosen path plus domain guidance.
    ///
    /// The dependency graph defaults to the path's own causal view;
    /// [`process`](DomainAgent::process) replaces it with the full graph.
    fn deploy_action_plan(self, path: &RealityPath) -> AgentResult {
        let profile = self.profile();
        let steps: Vec<MicroAction> = path
            .steps
            .iter()
            .map(|step| MicroAction {
                dependencies: prune_dangling(&path.steps, &step.dependencies),
                ..step.clone()
            })
            .collect();

        let causal_map: Vec<CausalNode> = steps.iter().map(CausalNode::from).collect();
        AgentResult {
            agent: Some(self.kind()),
            confidence: Decimal::ZERO,
            dependency_graph: causal_map.clone(),
            causal_map,
            micro_actions: steps,
            optimal_path: path.clone(),
            environmental_directives: profile
                .environmental_directives
                .iter()
                .map(|s| (*s).to_owned())
                .collect(),
            progress_indicators: profile
                .progress_indicators
                .iter()
                .map(|s| (*s).to_owned())
                .collect(),
        }
    }

    /// Updated velocity and guidance from observed outcome flags.
    fn evaluate_results(self, ctx: &AgentContext, results: &OutcomeSignals) -> Evaluation {
        let profile = self.profile();
        let mut velocity = profile.base_velocity;
        let mut adjustments = Vec::new();
        let mut next_actions = Vec::new();

        for rule in profile.signals {
            if results.get(rule.signal).copied().unwrap_or(false) {
                velocity = velocity.saturating_add(rule.bonus);
                next_actions.push(rule.next_action.to_owned());
            } else {
                adjustments.push(rule.adjustment.to_owned());
            }
        }

        if ctx.extracted_data.emotional_charge == "high" {
            adjustments.push("Ground the strong emotion before adding new actions".to_owned());
        }
        if next_actions.is_empty() {
            next_actions.push(profile.default_next_action.to_owned());
        }

        Evaluation {
            progress_velocity: velocity.min(Decimal::ONE),
            adjustments,
            next_actions,
        }
    }

    /// Full pipeline: graph, actions, paths, optimal path, deployment.
    fn process(self, ctx: &AgentContext) -> AgentResult {
        let causal_map = self.analyze_dependencies(ctx);
        let micro_actions = self.generate_micro_actions(ctx, &causal_map);
        let paths = self.simulate_paths(ctx, &micro_actions);
        let confidence = self.score(ctx);

        let result = select_optimal_path(&paths).map_or_else(
            || self.deploy_action_plan(&build_path("empty", "", Vec::new(), "1 month", Vec::new())),
            |optimal| self.deploy_action_plan(optimal),
        );

        debug!(
            agent = %self.kind(),
            paths = paths.len(),
            chosen = %result.optimal_path.id,
            confidence = %confidence,
            "agent processed context"
        );

        AgentResult {
            confidence,
            dependency_graph: causal_map,
            ..result
        }
    }
}

impl DomainAgent for AgentKind {
    fn profile(self) -> &'static AgentProfile {
        match self {
            Self::Finance => &finance::PROFILE,
            Self::Health => &health::PROFILE,
            Self::Career => &career::PROFILE,
            Self::Relationship => &relationship::PROFILE,
            Self::Environment => &environment::PROFILE,
        }
    }

    fn kind(self) -> AgentKind {
        self
    }
}

/// `total_probability / (total_resistance + epsilon)`.
pub fn path_ratio(path: &RealityPath) -> Decimal {
    path.total_probability
        .checked_div(path.total_resistance.saturating_add(PATH_RESISTANCE_EPSILON))
        .unwrap_or(Decimal::ZERO)
}

/// The path with the best probability-to-resistance ratio; first wins ties.
pub fn select_optimal_path(paths: &[RealityPath]) -> Option<&RealityPath> {
    let mut best: Option<(&RealityPath, Decimal)> = None;
    for path in paths {
        let ratio = path_ratio(path);
        match best {
            Some((_, best_ratio)) if ratio <= best_ratio => {}
            _ => best = Some((path, ratio)),
        }
    }
    best.map(|(path, _)| path)
}

/// Assemble a path, aggregating step scores as plain means.
pub fn build_path(
    id: &str,
    description: &str,
    steps: Vec<MicroAction>,
    estimated_timeframe: &str,
    synchronicity_triggers: Vec<String>,
) -> RealityPath {
    let total_probability = mean(steps.iter().map(|s| s.probability));
    let total_resistance = mean(steps.iter().map(|s| s.resistance));
    RealityPath {
        id: id.to_owned(),
        description: description.to_owned(),
        steps,
        total_probability,
        total_resistance,
        estimated_timeframe: estimated_timeframe.to_owned(),
        synchronicity_triggers,
    }
}

/// Arithmetic mean; zero for no values.
fn mean(values: impl Iterator<Item = Decimal>) -> Decimal {
    let (sum, count) = values.fold((Decimal::ZERO, 0_u32), |(sum, count), v| {
        (sum.saturating_add(v), count.saturating_add(1))
    });
    if count == 0 {
        return Decimal::ZERO;
    }
    sum.checked_div(Decimal::from(count)).unwrap_or(Decimal::ZERO)
}
