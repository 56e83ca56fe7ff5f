//! Longest weighted path and slack over a dependency graph.
//!
//! Works on anything reducible to [`PathNode`]s: a project's tasks (explicit
//! dependency pairs, or a start-date chain when none exist) or a portfolio of
//! projects joined by inferred edges. Cyclic input degrades rather than
//! fails: nodes trapped in a cycle never reach zero in-degree, drop out of
//! the topological order, and simply have no entries in the result maps.

use crate::dependency::DependencyEdge;
use crate::graph::{ActivityDag, PathNode};
use crate::project::Project;
use crate::task::Task;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Outcome of a critical path computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalPathResult {
    /// Node ids forming the longest path, source first.
    pub path: Vec<String>,
    /// Length of the longest path in duration days.
    pub total_duration: i64,
    /// Earliest completion distance per resolved node, inclusive of the
    /// node's own duration.
    pub accumulated: HashMap<String, i64>,
    /// Immediate predecessor on the longest path into each node, where one
    /// exists.
    pub predecessors: HashMap<String, String>,
    /// Days each resolved node can shift without moving the terminal node.
    /// Zero for every node on `path`.
    pub slack: HashMap<String, i64>,
}

impl CriticalPathResult {
    fn empty() -> Self {
        Self {
            path: Vec::new(),
            total_duration: 0,
            accumulated: HashMap::new(),
            predecessors: HashMap::new(),
            slack: HashMap::new(),
        }
    }

    /// Whether `id` sits on the reported longest path.
    pub fn on_critical_path(&self, id: &str) -> bool {
        self.path.iter().any(|node| node == id)
    }
}

/// Computes the longest duration-weighted path through `nodes` under the
/// given directed `edges`, plus per-node slack.
///
/// Empty input yields an empty result, not an error. Edges referencing ids
/// absent from `nodes` are ignored.
pub fn compute_critical_path(
    nodes: &[PathNode],
    edges: &[(String, String)],
) -> CriticalPathResult {
    if nodes.is_empty() {
        return CriticalPathResult::empty();
    }

    let dag = ActivityDag::build(nodes, edges);
    let graph = &dag.graph;

    // Successor lists and in-degrees in edge insertion order, so processing
    // is deterministic for a given input.
    let mut successors: HashMap<NodeIndex, Vec<NodeIndex>> = graph
        .node_indices()
        .map(|ix| (ix, Vec::new()))
        .collect();
    let mut in_degree: HashMap<NodeIndex, usize> =
        graph.node_indices().map(|ix| (ix, 0)).collect();
    for edge in graph.edge_references() {
        successors.get_mut(&edge.source()).unwrap().push(edge.target());
        *in_degree.get_mut(&edge.target()).unwrap() += 1;
    }

    // Seed with every zero in-degree node, in input order.
    let mut queue: VecDeque<NodeIndex> = graph
        .node_indices()
        .filter(|ix| in_degree[ix] == 0)
        .collect();

    let mut earliest_start: HashMap<NodeIndex, i64> =
        graph.node_indices().map(|ix| (ix, 0)).collect();
    let mut predecessor: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut order: Vec<NodeIndex> = Vec::with_capacity(graph.node_count());

    while let Some(u) = queue.pop_front() {
        order.push(u);
        let reach = earliest_start[&u] + dag.duration_of(u);
        for &v in &successors[&u] {
            // Strict improvement keeps the first predecessor found on ties.
            if reach > earliest_start[&v] {
                earliest_start.insert(v, reach);
                predecessor.insert(v, u);
            }
            let degree = in_degree.get_mut(&v).unwrap();
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(v);
            }
        }
    }

    // Terminal node: maximum completion distance, first in topological
    // order on ties.
    let mut terminal: Option<NodeIndex> = None;
    let mut total_duration = i64::MIN;
    for &ix in &order {
        let completion = earliest_start[&ix] + dag.duration_of(ix);
        if completion > total_duration {
            total_duration = completion;
            terminal = Some(ix);
        }
    }
    let Some(terminal) = terminal else {
        // Every node was trapped in a cycle.
        return CriticalPathResult::empty();
    };

    let mut accumulated: HashMap<String, i64> = HashMap::with_capacity(order.len());
    for &ix in &order {
        accumulated.insert(graph[ix].clone(), earliest_start[&ix] + dag.duration_of(ix));
    }

    // Longest continuation below each resolved node. Successors come later
    // in the order, so a reverse sweep sees them first; unresolved
    // successors have no entry and are skipped.
    let mut tail: HashMap<NodeIndex, i64> = HashMap::with_capacity(order.len());
    for &ix in order.iter().rev() {
        let mut longest = 0;
        for &v in &successors[&ix] {
            if let Some(&below) = tail.get(&v) {
                longest = longest.max(dag.duration_of(v) + below);
            }
        }
        tail.insert(ix, longest);
    }

    let mut slack: HashMap<String, i64> = HashMap::with_capacity(order.len());
    for &ix in &order {
        let through = earliest_start[&ix] + dag.duration_of(ix) + tail[&ix];
        slack.insert(graph[ix].clone(), total_duration - through);
    }

    let mut path: Vec<String> = Vec::new();
    let mut cursor = terminal;
    loop {
        path.push(graph[cursor].clone());
        match predecessor.get(&cursor) {
            Some(&previous) => cursor = previous,
            None => break,
        }
    }
    path.reverse();

    let predecessors: HashMap<String, String> = predecessor
        .iter()
        .map(|(v, u)| (graph[*v].clone(), graph[*u].clone()))
        .collect();

    CriticalPathResult {
        path,
        total_duration,
        accumulated,
        predecessors,
        slack,
    }
}

/// Path nodes and edges for a task set.
///
/// Explicit dependency pairs are used as-is when present. Otherwise tasks
/// are chained in start-date order, a stand-in total order for schedules
/// ingested without precedence data.
pub fn task_graph(
    tasks: &[Task],
    dependencies: &[(String, String)],
) -> (Vec<PathNode>, Vec<(String, String)>) {
    let nodes = tasks
        .iter()
        .map(|task| PathNode::new(task.id.clone(), task.duration_days()))
        .collect();

    if !dependencies.is_empty() {
        return (nodes, dependencies.to_vec());
    }

    let mut by_start: Vec<&Task> = tasks.iter().collect();
    by_start.sort_by_key(|task| task.start_date);
    let edges = by_start
        .windows(2)
        .map(|pair| (pair[0].id.clone(), pair[1].id.clone()))
        .collect();
    (nodes, edges)
}

/// Path nodes and edges for a portfolio of projects and its inferred
/// dependency edges.
pub fn project_graph(
    projects: &[Project],
    edges: &[DependencyEdge],
) -> (Vec<PathNode>, Vec<(String, String)>) {
    let nodes = projects
        .iter()
        .map(|project| PathNode::new(project.id.clone(), project.duration_days()))
        .collect();
    let pairs = edges
        .iter()
        .map(|edge| (edge.source_id.clone(), edge.target_id.clone()))
        .collect();
    (nodes, pairs)
}
