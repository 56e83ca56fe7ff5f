use super::PathNode;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Directed dependency graph over path nodes.
///
/// Node insertion order follows the input slice, so traversals seeded from
/// `node_indices()` are deterministic. Edges referencing unknown ids are
/// skipped rather than rejected; the inference heuristics can hand us edges
/// for projects that were filtered out upstream.
pub struct ActivityDag {
    pub graph: DiGraph<String, ()>,
    pub id_to_index: HashMap<String, NodeIndex>,
    pub durations: HashMap<String, i64>,
}

impl ActivityDag {
    pub fn build(nodes: &[PathNode], edges: &[(String, String)]) -> Self {
        let mut graph: DiGraph<String, ()> = DiGraph::new();
        let mut id_to_index: HashMap<String, NodeIndex> = HashMap::new();
        let mut durations: HashMap<String, i64> = HashMap::new();

        for node in nodes {
            let node_ix = graph.add_node(node.id.clone());
            id_to_index.insert(node.id.clone(), node_ix);
            durations.insert(node.id.clone(), node.duration_days);
        }

        for (source, target) in edges {
            if let (Some(&u), Some(&v)) = (id_to_index.get(source), id_to_index.get(target)) {
                graph.add_edge(u, v, ());
            }
        }

        Self {
            graph,
            id_to_index,
            durations,
        }
    }

    pub fn duration_of(&self, ix: NodeIndex) -> i64 {
        self.durations.get(&self.graph[ix]).copied().unwrap_or(0)
    }
}
