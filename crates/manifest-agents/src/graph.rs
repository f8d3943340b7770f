//! Structural checks for causal graphs.
//!
//! Every graph an agent emits must have unique ids, only resolvable
//! dependency edges, and no cycles. The catalogs are static, so these checks
//! run in tests and debug builds rather than as runtime recovery.

use std::collections::{BTreeMap, BTreeSet};

use manifest_types::{CausalNode, MicroAction};

use crate::error::GraphError;

/// Anything with an id and dependency edges.
pub trait GraphNode {
    /// Node id.
    fn node_id(&self) -> &str;
    /// Ids this node depends on.
    fn node_dependencies(&self) -> &[String];
}

impl GraphNode for CausalNode {
    fn node_id(&self) -> &str {
        &self.id
    }

    fn node_dependencies(&self) -> &[String] {
        &self.dependencies
    }
}

impl GraphNode for MicroAction {
    fn node_id(&self) -> &str {
        &self.id
    }

    fn node_dependencies(&self) -> &[String] {
        &self.dependencies
    }
}

/// Check ids, edges and acyclicity of a graph.
pub fn validate_graph<N: GraphNode>(nodes: &[N]) -> Result<(), GraphError> {
    let mut edges: BTreeMap<&str, &[String]> = BTreeMap::new();
    for node in nodes {
        if edges.insert(node.node_id(), node.node_dependencies()).is_some() {
            return Err(GraphError::DuplicateId(node.node_id().to_owned()));
        }
    }

    for node in nodes {
        for dep in node.node_dependencies() {
            if !edges.contains_key(dep.as_str()) {
                return Err(GraphError::UnknownDependency {
                    node: node.node_id().to_owned(),
                    dependency: dep.clone(),
                });
            }
        }
    }

    let mut done: BTreeSet<&str> = BTreeSet::new();
    for node in nodes {
        let mut on_stack = BTreeSet::new();
        visit(node.node_id(), &edges, &mut on_stack, &mut done)?;
    }
    Ok(())
}

/// Depth-first walk; a node met again while still on the stack closes a cycle.
fn visit<'a>(
    id: &'a str,
    edges: &BTreeMap<&'a str, &'a [String]>,
    on_stack: &mut BTreeSet<&'a str>,
    done: &mut BTreeSet<&'a str>,
) -> Result<(), GraphError> {
    if done.contains(id) {
        return Ok(());
    }
    if !on_stack.insert(id) {
        return Err(GraphError::Cycle(id.to_owned()));
    }
    if let Some(deps) = edges.get(id) {
        for dep in *deps {
            visit(dep.as_str(), edges, on_stack, done)?;
        }
    }
    on_stack.remove(id);
    done.insert(id);
    Ok(())
}

/// Drop dependency edges that point outside `nodes`.
///
/// Used when a path keeps only a subset of an agent's actions.
pub fn prune_dangling<N: GraphNode>(nodes: &[N], dependencies: &[String]) -> Vec<String> {
    dependencies
        .iter()
        .filter(|dep| nodes.iter().any(|n| n.node_id() == dep.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use manifest_types::{Category, Timeframe};
    use rust_decimal::Decimal;

    use super::*;

    fn node(id: &str, deps: &[&str]) -> CausalNode {
        CausalNode {
            id: id.to_owned(),
            action: format!("do {id}"),
            dependencies: deps.iter().map(|d| (*d).to_owned()).collect(),
            probability: Decimal::ONE,
            resistance: Decimal::ZERO,
            timeframe: Timeframe::Immediate,
            category: Category::Cognitive,
        }
    }

    #[test]
    fn accepts_a_diamond() {
        let graph = vec![
            node("a", &[]),
            node("b", &["a"]),
            node("c", &["a"]),
            node("d", &["b", "c"]),
        ];
        assert_eq!(validate_graph(&graph), Ok(()));
    }

    #[test]
    fn rejects_unknown_dependency() {
        let graph = vec![node("a", &["ghost"])];
        assert_eq!(
            validate_graph(&graph),
            Err(GraphError::UnknownDependency {
                node: "a".to_owned(),
                dependency: "ghost".to_owned(),
            })
        );
    }

    #[test]
    fn rejects_self_loop() {
        let graph = vec![node("a", &["a"])];
        assert!(matches!(validate_graph(&graph), Err(GraphError::Cycle(_))));
    }

    #[test]
    fn rejects_transitive_cycle() {
        let graph = vec![node("a", &["c"]), node("b", &["a"]), node("c", &["b"])];
        assert!(matches!(validate_graph(&graph), Err(GraphError::Cycle(_))));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let graph = vec![node("a", &[]), node("a", &[])];
        assert_eq!(validate_graph(&graph), Err(GraphError::DuplicateId("a".to_owned())));
    }

    #[test]
    fn prune_keeps_only_present_edges() {
        let graph = vec![node("a", &[]), node("b", &[])];
        let pruned = prune_dangling(&graph, &["a".to_owned(), "zzz".to_owned()]);
        assert_eq!(pruned, vec!["a".to_owned()]);
    }
}
