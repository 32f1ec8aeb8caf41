//! Structural and hyperparameter validation for pipelines.

use petgraph::algo::{connected_components, kosaraju_scc};
use petgraph::graph::DiGraph;
use rustc_hash::FxHashMap;
use serde::Serialize;

use super::types::{Edge, Node};
use crate::registry::{Component, ParamKind, Registry};

/// Outcome of validating a pipeline.
///
/// Errors are fatal, warnings are advisory. Both lists preserve the order
/// in which the checks run: emptiness, cycles, connectivity, then
/// per-node hyperparameters in pipeline node order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// Fatal problems; a caller gating on validation must refuse to
    /// compile when any are present.
    pub errors: Vec<String>,
    /// Advisory problems; compilation may proceed.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// True when no fatal error was recorded.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a pipeline against the registry.
///
/// Never raises on malformed graph input: dangling edges are dropped and
/// every problem is surfaced through the returned lists.
pub fn validate(nodes: &[Node], edges: &[Edge], registry: &Registry) -> ValidationResult {
    let mut result = ValidationResult::default();

    if nodes.is_empty() {
        result.errors.push("Pipeline is empty".to_string());
        return result;
    }

    // Graph restricted to edges whose endpoints both exist.
    let mut graph: DiGraph<&str, ()> = DiGraph::new();
    let mut indices = FxHashMap::default();
    for node in nodes {
        indices.insert(node.id.as_str(), graph.add_node(node.id.as_str()));
    }
    for edge in edges {
        if let (Some(&source), Some(&target)) = (
            indices.get(edge.source.as_str()),
            indices.get(edge.target.as_str()),
        ) {
            graph.add_edge(source, target, ());
        }
    }

    // An SCC with more than one node is a cycle; a self-edge is a
    // single-node cycle the SCC size does not reveal.
    let has_self_edge = graph
        .edge_indices()
        .any(|e| graph.edge_endpoints(e).is_some_and(|(a, b)| a == b));
    if has_self_edge || kosaraju_scc(&graph).iter().any(|scc| scc.len() > 1) {
        result
            .errors
            .push("Pipeline contains cycles, which are not allowed.".to_string());
    }

    // Weak connectivity. A single isolated node is not warned about.
    if nodes.len() > 1 && connected_components(&graph) > 1 {
        result
            .warnings
            .push("Pipeline has disconnected components.".to_string());
    }

    for node in nodes {
        if let Some(component) = registry.resolve_node(node) {
            validate_hyperparameters(node, component, &mut result.errors);
        }
    }

    result
}

/// Check one node's parameter values against its component's declared
/// specs, in declaration order.
fn validate_hyperparameters(node: &Node, component: &Component, errors: &mut Vec<String>) {
    for spec in &component.parameter_specs {
        let Some(value) = node.parameters.get(&spec.name) else {
            if spec.required {
                errors.push(format!("Missing required parameter: {}", spec.label));
            }
            continue;
        };

        // String and boolean specs accept any present value as-is.
        if spec.kind != ParamKind::Number {
            continue;
        }

        match value.as_number() {
            None => errors.push(format!("{} must be a number", spec.label)),
            Some(number) => {
                if let Some(min) = spec.min {
                    if number < min {
                        errors.push(format!("{} must be >= {min}", spec.label));
                    }
                }
                if let Some(max) = spec.max {
                    if number > max {
                        errors.push(format!("{} must be <= {max}", spec.label));
                    }
                }
            }
        }
    }
}
