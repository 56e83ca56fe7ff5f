//! Delay propagation across the inferred dependency graph.

use std::collections::{HashMap, HashSet, VecDeque};

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::dependency::DependencyEdge;
use crate::project::Project;

/// One downstream project pushed out by an upstream delay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactEntry {
    pub project_id: String,
    pub project_name: String,
    pub original_end_date: NaiveDate,
    pub new_end_date: NaiveDate,
    pub delay_days: i64,
}

/// Reports every project pushed out when `project_id` slips by `delay_days`.
///
/// Breadth-first walk over the edge set from the starting project. The delay
/// does not compound per hop: every reachable project is reported with the
/// same absolute slip, on the reasoning that a five-day slip upstream delays
/// each successor's hand-off by five days, not five per link. A visited set
/// bounds the walk on cyclic input; the starting project itself is never
/// reported. Successor ids missing from `projects` are traversed so their
/// own successors still get entries, but produce none themselves.
pub fn propagate_delay(
    project_id: &str,
    delay_days: i64,
    projects: &[Project],
    edges: &[DependencyEdge],
) -> Vec<ImpactEntry> {
    let by_id: HashMap<&str, &Project> = projects
        .iter()
        .map(|project| (project.id.as_str(), project))
        .collect();

    let mut successors: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in edges {
        successors
            .entry(edge.source_id.as_str())
            .or_default()
            .push(edge.target_id.as_str());
    }

    let mut impacts = Vec::new();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    visited.insert(project_id);
    queue.push_back((project_id, delay_days));

    while let Some((current, delay)) = queue.pop_front() {
        if current != project_id {
            if let Some(project) = by_id.get(current) {
                let new_end = project
                    .end_date
                    .checked_add_signed(Duration::days(delay))
                    .unwrap_or(project.end_date);
                impacts.push(ImpactEntry {
                    project_id: project.id.clone(),
                    project_name: project.name.clone(),
                    original_end_date: project.end_date,
                    new_end_date: new_end,
                    delay_days: delay,
                });
            }
        }
        if let Some(targets) = successors.get(current) {
            for &target in targets {
                if visited.insert(target) {
                    queue.push_back((target, delay));
                }
            }
        }
    }

    impacts
}
