//! Routing a manifestation context to the best-fitting agents.
//!
//! Every agent is scored; the highest scorer becomes the primary result and
//! any other applicable agent scoring above the secondary threshold is
//! processed as well. When nothing applies, a fixed general result is
//! synthesized so callers never receive an empty plan.

use manifest_types::{
    AgentContext, AgentKind, AgentResult, CausalNode, Category, MicroAction, Timeframe,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::base::{DomainAgent, build_path};

/// Default score an agent must exceed to be included as secondary.
pub const DEFAULT_SECONDARY_THRESHOLD: Decimal = Decimal::from_parts(6, 0, 0, false, 1);

/// An applicable agent with its routing score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentConfidence {
    /// The agent.
    pub agent: AgentKind,
    /// Its score for the context.
    pub confidence: Decimal,
}

/// Primary and secondary results flattened into one plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedPlan {
    /// Results in routing order; the first is the primary.
    pub results: Vec<AgentResult>,
    /// Every result's causal map, in routing order.
    pub causal_map: Vec<CausalNode>,
    /// Every result's full dependency graph, in routing order.
    pub dependency_graph: Vec<CausalNode>,
    /// Every result's micro-actions, in routing order.
    pub micro_actions: Vec<MicroAction>,
    /// Every result's directives, deduplicated, in routing order.
    pub environmental_directives: Vec<String>,
}

impl CombinedPlan {
    /// The primary result.
    pub fn primary(&self) -> Option<&AgentResult> {
        self.results.first()
    }
}

/// Routes contexts to domain agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentCoordinator {
    secondary_threshold: Decimal,
}

impl Default for AgentCoordinator {
    fn default() -> Self {
        Self::new(DEFAULT_SECONDARY_THRESHOLD)
    }
}

impl AgentCoordinator {
    /// Coordinator including secondaries that score above `secondary_threshold`.
    pub const fn new(secondary_threshold: Decimal) -> Self {
        Self {
            secondary_threshold,
        }
    }

    /// Agents that apply to the context, in declaration order.
    pub fn applicable_agents(&self, ctx: &AgentContext) -> Vec<AgentKind> {
        AgentKind::ALL
            .into_iter()
            .filter(|kind| kind.can_handle(ctx))
            .collect()
    }

    /// Applicable agents sorted by descending score.
    ///
    /// The sort is stable, so equal scores keep declaration order.
    pub fn agent_confidences(&self, ctx: &AgentContext) -> Vec<AgentConfidence> {
        let mut scored: Vec<AgentConfidence> = AgentKind::ALL
            .into_iter()
            .map(|agent| AgentConfidence {
                agent,
                confidence: agent.score(ctx),
            })
            .filter(|c| c.confidence > Decimal::ZERO)
            .collect();
        scored.sort_by(|a, b| b.confidence.cmp(&a.confidence));
        scored
    }

    /// Primary result plus qualifying secondaries, or the general result.
    pub fn route_manifestation(&self, ctx: &AgentContext) -> Vec<AgentResult> {
        let confidences = self.agent_confidences(ctx);

        let Some((primary, rest)) = confidences.split_first() else {
            info!(
                core_desire = %ctx.extracted_data.core_desire,
                "no agent applies, using general result"
            );
            return vec![general_result(ctx)];
        };

        let mut results = vec![primary.agent.process(ctx)];
        for candidate in rest {
            if candidate.confidence > self.secondary_threshold {
                results.push(candidate.agent.process(ctx));
            }
        }

        debug!(
            primary = %primary.agent,
            primary_confidence = %primary.confidence,
            secondaries = results.len().saturating_sub(1),
            "manifestation routed"
        );
        results
    }

    /// Route and flatten every result into one plan.
    pub fn process_with_multiple_agents(&self, ctx: &AgentContext) -> CombinedPlan {
        let results = self.route_manifestation(ctx);

        let causal_map = results
            .iter()
            .flat_map(|r| r.causal_map.iter().cloned())
            .collect();
        let dependency_graph = results
            .iter()
            .flat_map(|r| r.dependency_graph.iter().cloned())
            .collect();
        let micro_actions = results
            .iter()
            .flat_map(|r| r.micro_actions.iter().cloned())
            .collect();

        let mut environmental_directives: Vec<String> = Vec::new();
        for directive in results.iter().flat_map(|r| r.environmental_directives.iter()) {
            if !environmental_directives.contains(directive) {
                environmental_directives.push(directive.clone());
            }
        }

        CombinedPlan {
            results,
            causal_map,
            dependency_graph,
            micro_actions,
            environmental_directives,
        }
    }
}

/// The fixed, domain-free result used when no agent applies.
fn general_result(ctx: &AgentContext) -> AgentResult {
    let action = MicroAction {
        id: "general-clarity".to_owned(),
        action: "Clarify what you truly want to manifest".to_owned(),
        dependencies: Vec::new(),
        probability: Decimal::from_parts(7, 0, 0, false, 1),
        resistance: Decimal::from_parts(3, 0, 0, false, 1),
        timeframe: Timeframe::Immediate,
        category: Category::Cognitive,
        dopamine_trigger: Some("Naming it is the first step of having it".to_owned()),
    };
    let path = build_path(
        "general-path",
        "Clarify the desire before planning",
        vec![action.clone()],
        "1 week",
        vec![format!(
            "Notice what draws your attention as you think about {}",
            ctx.extracted_data.core_desire
        )],
    );

    let causal_map = vec![CausalNode::from(&action)];
    AgentResult {
        agent: None,
        confidence: Decimal::ZERO,
        dependency_graph: causal_map.clone(),
        causal_map,
        micro_actions: vec![action],
        optimal_path: path,
        environmental_directives: vec![
            "Create a calm, clutter-free space for daily reflection".to_owned(),
        ],
        progress_indicators: vec!["A clearer sense of what you want".to_owned()],
    }
}
