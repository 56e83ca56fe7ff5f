use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scheduling relationship carried by an inferred edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyType {
    FinishToStart,
    StartToStart,
    FinishToFinish,
}

impl DependencyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyType::FinishToStart => "finish-to-start",
            DependencyType::StartToStart => "start-to-start",
            DependencyType::FinishToFinish => "finish-to-finish",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyStatus {
    Active,
    Resolved,
    Broken,
}

impl DependencyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyStatus::Active => "active",
            DependencyStatus::Resolved => "resolved",
            DependencyStatus::Broken => "broken",
        }
    }
}

/// A directed project-to-project dependency.
///
/// Edges are computed, never persisted by hand; the full set is regenerated
/// every time the dependency graph builder runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub source_id: String,
    pub target_id: String,
    pub dependency_type: DependencyType,
    /// Human-readable rationale: the shared resources, or a note that only
    /// the date heuristic fired.
    pub description: String,
    /// Set when both inference signals agree (shared resources plus a
    /// temporal window).
    pub is_critical: bool,
    pub status: DependencyStatus,
    pub created_at: DateTime<Utc>,
}

impl DependencyEdge {
    pub fn new(
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        dependency_type: DependencyType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            dependency_type,
            description: description.into(),
            is_critical: false,
            status: DependencyStatus::Active,
            created_at: Utc::now(),
        }
    }
}
