//! Aggregate statistics over the inferred dependency graph.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::dependency::DependencyEdge;
use crate::project::Project;

/// A degree winner: the project plus how many edges it holds the title with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegreeEntry {
    pub project_id: String,
    pub project_name: String,
    pub count: usize,
}

/// Headline numbers for a portfolio's dependency graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyStats {
    pub total_dependencies: usize,
    pub critical_dependencies: usize,
    /// Highest in-degree: the project most other projects feed into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub most_dependent: Option<DegreeEntry>,
    /// Highest out-degree: the project blocking the most others.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub most_blocking: Option<DegreeEntry>,
}

/// Counts edges and finds the degree winners.
///
/// Ties are broken deterministically in favor of the id appearing first in
/// the edge list, scanning each edge's source before its target. Names are
/// resolved from `projects`, falling back to the raw id for edges that
/// reference projects outside the list.
pub fn aggregate_dependency_stats(
    projects: &[Project],
    edges: &[DependencyEdge],
) -> DependencyStats {
    let critical_dependencies = edges.iter().filter(|edge| edge.is_critical).count();

    let mut in_degree: HashMap<&str, usize> = HashMap::new();
    let mut out_degree: HashMap<&str, usize> = HashMap::new();
    let mut appearance: Vec<&str> = Vec::new();
    for edge in edges {
        for id in [edge.source_id.as_str(), edge.target_id.as_str()] {
            if !appearance.contains(&id) {
                appearance.push(id);
            }
        }
        *out_degree.entry(edge.source_id.as_str()).or_insert(0) += 1;
        *in_degree.entry(edge.target_id.as_str()).or_insert(0) += 1;
    }

    DependencyStats {
        total_dependencies: edges.len(),
        critical_dependencies,
        most_dependent: top_entry(&appearance, &in_degree, projects),
        most_blocking: top_entry(&appearance, &out_degree, projects),
    }
}

fn top_entry(
    appearance: &[&str],
    degrees: &HashMap<&str, usize>,
    projects: &[Project],
) -> Option<DegreeEntry> {
    let mut best: Option<(&str, usize)> = None;
    for &id in appearance {
        let count = degrees.get(id).copied().unwrap_or(0);
        if count == 0 {
            continue;
        }
        match best {
            Some((_, best_count)) if best_count >= count => {}
            _ => best = Some((id, count)),
        }
    }
    best.map(|(id, count)| DegreeEntry {
        project_id: id.to_string(),
        project_name: projects
            .iter()
            .find(|project| project.id == id)
            .map(|project| project.name.clone())
            .unwrap_or_else(|| id.to_string()),
        count,
    })
}
