//! Topological ordering of pipeline nodes.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use super::types::{Edge, Node};

/// Order nodes so that every edge points from an earlier to a later node.
///
/// Kahn's algorithm with strict FIFO tie-breaking: the queue is seeded in
/// pipeline node order and neighbors enqueue in edge-declaration order,
/// so identical input always yields the identical sequence.
///
/// Edges whose endpoints are not both present are ignored. If the graph
/// contains a cycle, the cyclic nodes never reach in-degree zero and are
/// omitted from the result; callers that need a hard guarantee run the
/// validator first and refuse to proceed on fatal errors.
pub fn topological_sort(nodes: &[Node], edges: &[Edge]) -> Vec<Node> {
    let index_of: FxHashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(index, node)| (node.id.as_str(), index))
        .collect();

    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    let mut in_degree: Vec<usize> = vec![0; nodes.len()];

    for edge in edges {
        let (Some(&source), Some(&target)) = (
            index_of.get(edge.source.as_str()),
            index_of.get(edge.target.as_str()),
        ) else {
            continue;
        };
        adjacency[source].push(target);
        in_degree[target] += 1;
    }

    let mut queue: VecDeque<usize> = (0..nodes.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut result = Vec::with_capacity(nodes.len());

    while let Some(current) = queue.pop_front() {
        result.push(nodes[current].clone());
        for &next in &adjacency[current] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                queue.push_back(next);
            }
        }
    }

    result
}
