use crate::task::Task;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a project. Only `Planning` and `Active` projects
/// take part in dependency inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Planning,
    Active,
    OnHold,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "planning",
            ProjectStatus::Active => "active",
            ProjectStatus::OnHold => "on-hold",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Cancelled => "cancelled",
        }
    }
}

/// How much of one pooled resource a project claims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRequirement {
    pub resource_id: String,
    pub required_count: i64,
}

impl ResourceRequirement {
    pub fn new(resource_id: impl Into<String>, required_count: i64) -> Self {
        Self {
            resource_id: resource_id.into(),
            required_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    /// Inclusive end date; delay impacts are reported against it.
    pub end_date: NaiveDate,
    pub status: ProjectStatus,
    pub budget: f64,
    pub actual_cost: f64,
    #[serde(default)]
    pub resource_requirements: Vec<ResourceRequirement>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Project {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        status: ProjectStatus,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start_date,
            end_date,
            status,
            budget: 0.0,
            actual_cost: 0.0,
            resource_requirements: Vec::new(),
            tasks: Vec::new(),
        }
    }

    /// Duration in days, end minus start.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// Resource identifiers this project requires, in declaration order.
    pub fn required_resource_ids(&self) -> Vec<&str> {
        self.resource_requirements
            .iter()
            .map(|req| req.resource_id.as_str())
            .collect()
    }
}
