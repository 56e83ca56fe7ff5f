use serde::{Deserialize, Serialize};

/// A node fed to the critical path analyzer: anything with an identity and a
/// duration. Tasks and projects both reduce to this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathNode {
    pub id: String,
    pub duration_days: i64,
}

impl PathNode {
    pub fn new(id: impl Into<String>, duration_days: i64) -> Self {
        Self {
            id: id.into(),
            duration_days,
        }
    }
}

pub mod activity_dag;

pub use activity_dag::ActivityDag;
