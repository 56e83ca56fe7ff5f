//! Inter-project dependency inference.
//!
//! Projects never declare dependencies on each other directly; this module
//! infers them pairwise from two weak signals: shared resource requirements
//! and date adjacency within a seven-day window. The resulting edge set
//! feeds the delay propagator and the statistics aggregator, and may contain
//! cycles (two overlapping projects can point at each other), so consumers
//! must tolerate cyclic input.

use std::collections::HashSet;

use rayon::prelude::*;

use crate::dependency::{DependencyEdge, DependencyType};
use crate::project::{Project, ProjectStatus};

/// Days within which two projects' dates count as related.
const PROXIMITY_WINDOW_DAYS: i64 = 7;

/// Infers the dependency edge set for a portfolio.
///
/// Only `active` and `planning` projects are considered. Every unordered
/// pair is evaluated independently on rayon's thread pool; pairs are
/// generated in index order and collected order-preservingly, so the output
/// matches a sequential evaluation regardless of thread scheduling. At most
/// one edge is emitted per pair.
pub fn build_dependency_graph(projects: &[Project]) -> Vec<DependencyEdge> {
    let candidates: Vec<&Project> = projects
        .iter()
        .filter(|project| {
            matches!(
                project.status,
                ProjectStatus::Active | ProjectStatus::Planning
            )
        })
        .collect();

    let mut pairs = Vec::new();
    for i in 0..candidates.len() {
        for j in (i + 1)..candidates.len() {
            pairs.push((i, j));
        }
    }

    pairs
        .par_iter()
        .map(|&(i, j)| evaluate_pair(candidates[i], candidates[j]))
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}

/// Evaluates one project pair against both inference signals.
fn evaluate_pair(a: &Project, b: &Project) -> Option<DependencyEdge> {
    let shared = shared_resources(a, b);
    let temporal = temporal_relationship(a, b);

    if shared.is_empty() && temporal.is_none() {
        return None;
    }

    // Finish-to-start carries an inherent direction; everything else points
    // from the first project of the pair to the second.
    let (source, target, dependency_type) = match temporal {
        Some((DependencyType::FinishToStart, true)) => (b, a, DependencyType::FinishToStart),
        Some((kind, _)) => (a, b, kind),
        None => (a, b, DependencyType::FinishToStart),
    };

    let description = if shared.is_empty() {
        "Temporal dependency".to_string()
    } else {
        format!("Shared resources: {}", shared.join(", "))
    };

    let mut edge = DependencyEdge::new(&source.id, &target.id, dependency_type, description);
    edge.is_critical = !shared.is_empty() && temporal.is_some();
    Some(edge)
}

/// Resource ids required by both projects, in `a`'s declaration order.
fn shared_resources(a: &Project, b: &Project) -> Vec<String> {
    let b_ids: HashSet<&str> = b.required_resource_ids().into_iter().collect();
    a.required_resource_ids()
        .into_iter()
        .filter(|id| b_ids.contains(id))
        .map(str::to_string)
        .collect()
}

/// Classifies the date relationship between two projects, if any.
///
/// The second tuple field is set when the finish-to-start direction runs
/// from `b` to `a`.
fn temporal_relationship(a: &Project, b: &Project) -> Option<(DependencyType, bool)> {
    let gap_ab = (b.start_date - a.end_date).num_days();
    if gap_ab > 0 && gap_ab <= PROXIMITY_WINDOW_DAYS {
        return Some((DependencyType::FinishToStart, false));
    }
    let gap_ba = (a.start_date - b.end_date).num_days();
    if gap_ba > 0 && gap_ba <= PROXIMITY_WINDOW_DAYS {
        return Some((DependencyType::FinishToStart, true));
    }
    if (a.start_date - b.start_date).num_days().abs() <= PROXIMITY_WINDOW_DAYS {
        return Some((DependencyType::StartToStart, false));
    }
    if (a.end_date - b.end_date).num_days().abs() <= PROXIMITY_WINDOW_DAYS {
        return Some((DependencyType::FinishToFinish, false));
    }
    None
}
