use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Priority band for a task, highest to lowest: P0, P1, P2.
///
/// The optimizer prefers to reschedule low-priority work first, so P2 tasks
/// move before P1, and P1 before P0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskPriority {
    P0,
    P1,
    P2,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::P0 => "P0",
            TaskPriority::P1 => "P1",
            TaskPriority::P2 => "P2",
        }
    }

    /// Urgency rank, 0 = most urgent. Useful as a sort key.
    pub fn rank(&self) -> u8 {
        match self {
            TaskPriority::P0 => 0,
            TaskPriority::P1 => 1,
            TaskPriority::P2 => 2,
        }
    }
}

/// A scheduled unit of work with an inclusive calendar-day date range and a
/// single assigned resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Resource identifier this task occupies for every day of its range.
    pub assignee: String,
    pub priority: TaskPriority,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        assignee: impl Into<String>,
        priority: TaskPriority,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start_date,
            end_date,
            assignee: assignee.into(),
            priority,
        }
    }

    /// Duration in days, end minus start. A single-day task has duration 0.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// Whether `date` falls inside the task's inclusive date range.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Translates the task forward by whole days, preserving its duration.
    pub fn shift(&mut self, days: i64) {
        self.start_date += Duration::days(days);
        self.end_date += Duration::days(days);
    }
}
