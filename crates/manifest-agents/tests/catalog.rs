//! Invariants over the hand-authored agent catalogs and routing.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use std::collections::BTreeSet;

use manifest_agents::{AgentCoordinator, DomainAgent, validate_graph};
use manifest_types::{
    AgentContext, AgentKind, CapacityLevel, ExtractedData, InferredPreferences, UserProfile,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn context(core_desire: &str, text: &str) -> AgentContext {
    let mut ctx = AgentContext::from_extracted(ExtractedData {
        core_desire: core_desire.to_owned(),
        ..ExtractedData::default()
    });
    ctx.conversation_text = text.to_lowercase();
    ctx
}

#[test]
fn every_catalog_is_a_valid_dag() {
    let ctx = context("personal fulfillment", "");
    for kind in AgentKind::ALL {
        let map = kind.analyze_dependencies(&ctx);
        validate_graph(&map).unwrap_or_else(|e| panic!("{kind} nodes: {e}"));

        let actions = kind.generate_micro_actions(&ctx, &map);
        validate_graph(&actions).unwrap_or_else(|e| panic!("{kind} actions: {e}"));
    }
}

#[test]
fn every_deployed_plan_is_a_valid_dag() {
    let ctx = context("personal fulfillment", "");
    for kind in AgentKind::ALL {
        let result = kind.process(&ctx);
        validate_graph(&result.causal_map).unwrap_or_else(|e| panic!("{kind} plan: {e}"));
        validate_graph(&result.dependency_graph)
            .unwrap_or_else(|e| panic!("{kind} graph: {e}"));
        assert!(!result.causal_map.is_empty(), "{kind} deployed an empty plan");
        assert!(!result.environmental_directives.is_empty());
        assert!(!result.progress_indicators.is_empty());
    }
}

#[test]
fn ids_are_unique_across_catalogs() {
    let ctx = context("personal fulfillment", "");
    let mut seen = BTreeSet::new();
    for kind in AgentKind::ALL {
        let map = kind.analyze_dependencies(&ctx);
        let actions = kind.generate_micro_actions(&ctx, &map);
        for id in map.iter().map(|n| &n.id).chain(actions.iter().map(|a| &a.id)) {
            assert!(seen.insert(id.clone()), "{id} appears twice");
        }
    }
}

#[test]
fn probabilities_and_resistances_stay_in_unit_range() {
    let mut ctx = context("financial abundance", "money");
    ctx.extracted_data.emotional_charge = "high".to_owned();
    ctx.extracted_data.constraints = vec!["resources".to_owned()];
    ctx.user_profile = Some(UserProfile {
        inferred_preferences: InferredPreferences {
            financial_capacity: Some(CapacityLevel::High),
        },
    });

    for kind in AgentKind::ALL {
        let map = kind.analyze_dependencies(&ctx);
        for action in kind.generate_micro_actions(&ctx, &map) {
            assert!((Decimal::ZERO..=Decimal::ONE).contains(&action.probability));
            assert!((Decimal::ZERO..=Decimal::ONE).contains(&action.resistance));
        }
    }
}

#[test]
fn money_desire_routes_to_finance() {
    let ctx = context(
        "financial abundance",
        "I want to attract more money and feel more abundant",
    );
    let plan = AgentCoordinator::default().process_with_multiple_agents(&ctx);

    let primary = plan.primary().expect("a primary result");
    assert_eq!(primary.agent, Some(AgentKind::Finance));
    assert!(primary.confidence > dec!(0.6));
    assert!(
        plan.environmental_directives
            .contains(&"Create a dedicated financial planning space in your home".to_owned())
    );
    validate_graph(&plan.causal_map).unwrap();
    validate_graph(&plan.dependency_graph).unwrap();
    assert_eq!(plan.dependency_graph.len(), 5);
}

#[test]
fn empty_context_routes_to_general_result() {
    let ctx = context("personal fulfillment", "");
    let plan = AgentCoordinator::default().process_with_multiple_agents(&ctx);

    assert_eq!(plan.results.len(), 1);
    let general = &plan.results[0];
    assert_eq!(general.agent, None);
    assert_eq!(general.confidence, Decimal::ZERO);
    assert_eq!(general.causal_map[0].id, "general-clarity");
    assert_eq!(plan.micro_actions.len(), 1);
}

#[test]
fn routing_is_deterministic() {
    let ctx = context("career advancement", "my boss keeps blocking my promotion at work");
    let coordinator = AgentCoordinator::default();
    assert_eq!(
        coordinator.process_with_multiple_agents(&ctx),
        coordinator.process_with_multiple_agents(&ctx)
    );
}
