//! Resource-conflict optimization over a project's task set.
//!
//! The optimizer replays the schedule one calendar day at a time, scans each
//! pooled resource for days where more tasks are active than the pool covers,
//! and shifts tasks forward to spread the load. `smoothing` spends only the
//! float a task has before the project end date, so the end date never moves.
//! `leveling` keeps shifting regardless of float and lets the end date grow.
//!
//! The simulation is deliberately greedy and local: criticality and float are
//! computed once from the initial schedule and never recomputed mid-run.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculations::critical_path::{compute_critical_path, task_graph};
use crate::project::Project;
use crate::resource::ResourcePoolItem;
use crate::task::Task;
use crate::{log_changes, log_checks, log_debug};

/// Conflict-resolution strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptimizeStrategy {
    /// Shift tasks only within their float; the project end date is preserved.
    Smoothing,
    /// Shift tasks as far as contention demands; the project end date may grow.
    Leveling,
}

impl OptimizeStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptimizeStrategy::Smoothing => "smoothing",
            OptimizeStrategy::Leveling => "leveling",
        }
    }
}

/// Tuning knobs for a single optimizer run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Diagnostic verbosity, 0 (silent) through 3 (debug). See the logging
    /// module for level meanings.
    pub verbosity: u8,
}

/// One task repositioned by the optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskChange {
    pub task_id: String,
    pub task_name: String,
    pub original_start: NaiveDate,
    pub new_start: NaiveDate,
    pub delay_days: i64,
    pub reason: String,
}

/// Before/after summary of an optimizer run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationMetrics {
    /// Task-set span before optimization, latest end minus earliest start.
    pub original_duration_days: i64,
    /// Span after optimization, measured from the original earliest start so
    /// a forward shift of the first task cannot shrink the reported value.
    pub new_duration_days: i64,
    /// Net overload eliminated, in unit-days: total overload across the pool
    /// before the run minus after. Shifts that only push an overlap along
    /// the calendar count for nothing, and the value runs negative when
    /// shifting packed tasks more densely than the original layout.
    pub conflicts_resolved: i64,
    /// Peak overload before minus peak overload after.
    pub peak_overload_reduced: i64,
}

/// Adjusted schedule plus the record of what moved and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub tasks: Vec<Task>,
    pub changes: Vec<TaskChange>,
    pub metrics: OptimizationMetrics,
}

/// Per-resource active-task counts over the task-set span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceUsage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span_start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span_end: Option<NaiveDate>,
    /// Resource id to active-task count for each day of the span, in order.
    pub counts: HashMap<String, Vec<i64>>,
}

/// Day-by-day greedy simulation over one project's tasks.
///
/// The caller's task slice is cloned up front; inputs are never mutated.
pub struct ScheduleOptimizer<'a> {
    project: &'a Project,
    tasks: &'a [Task],
    edges: &'a [(String, String)],
    resource_pool: &'a [ResourcePoolItem],
    strategy: OptimizeStrategy,
    config: OptimizerConfig,
}

impl<'a> ScheduleOptimizer<'a> {
    /// Optimizer over a task set with no explicit dependency data. Tasks are
    /// treated as chained in start-date order for criticality purposes.
    pub fn new(
        project: &'a Project,
        tasks: &'a [Task],
        resource_pool: &'a [ResourcePoolItem],
        strategy: OptimizeStrategy,
    ) -> Self {
        Self {
            project,
            tasks,
            edges: &[],
            resource_pool,
            strategy,
            config: OptimizerConfig::default(),
        }
    }

    /// Optimizer with an explicit task dependency edge list. Edges cap each
    /// task's float so a shifted task never overlaps a successor's start.
    pub fn with_dependencies(
        project: &'a Project,
        tasks: &'a [Task],
        edges: &'a [(String, String)],
        resource_pool: &'a [ResourcePoolItem],
        strategy: OptimizeStrategy,
        config: OptimizerConfig,
    ) -> Self {
        Self {
            project,
            tasks,
            edges,
            resource_pool,
            strategy,
            config,
        }
    }

    /// Runs the simulation and returns the adjusted schedule.
    ///
    /// Walks one day at a time from the earliest task start. For every pooled
    /// resource with more active tasks than capacity on the current day, up to
    /// `active - capacity` tasks are shifted forward by one day, preferring
    /// non-critical tasks and lower priorities. Under `smoothing` the walk
    /// stops at the original project end date; under `leveling` it continues
    /// until every task has been seen and the (possibly extended) end date is
    /// passed. A hard ceiling bounds the walk on any input.
    pub fn execute(&self) -> OptimizationResult {
        let verbosity = self.config.verbosity;
        let mut adjusted: Vec<Task> = self.tasks.to_vec();

        let Some((window_start, window_end)) = task_window(self.tasks) else {
            return OptimizationResult {
                tasks: adjusted,
                changes: Vec::new(),
                metrics: OptimizationMetrics {
                    original_duration_days: 0,
                    new_duration_days: 0,
                    conflicts_resolved: 0,
                    peak_overload_reduced: 0,
                },
            };
        };
        let original_duration = (window_end - window_start).num_days();

        log_changes!(
            verbosity,
            "Optimizing {} with {} ({} tasks, {} to {})",
            self.project.name,
            self.strategy.as_str(),
            adjusted.len(),
            window_start,
            window_end
        );

        let critical = self.critical_ids();
        let mut float = self.shiftable_float(window_end);

        let mut tracked_end = window_end;
        let mut visited = vec![false; adjusted.len()];
        let mut shifts = 0usize;
        let mut cursor = window_start;
        let ceiling = 2 * original_duration + 365;

        for _day in 0..ceiling {
            let finished = match self.strategy {
                OptimizeStrategy::Smoothing => cursor > window_end,
                OptimizeStrategy::Leveling => {
                    cursor > tracked_end && visited.iter().all(|seen| *seen)
                }
            };
            if finished {
                break;
            }
            log_debug!(verbosity, "Day {}", cursor);

            for (ix, task) in adjusted.iter().enumerate() {
                if task.covers(cursor) {
                    visited[ix] = true;
                }
            }

            for item in self.resource_pool {
                let active: Vec<usize> = adjusted
                    .iter()
                    .enumerate()
                    .filter(|(_, task)| task.assignee == item.id && task.covers(cursor))
                    .map(|(ix, _)| ix)
                    .collect();
                let overload = active.len() as i64 - item.total_quantity;
                if overload <= 0 {
                    continue;
                }
                log_checks!(
                    verbosity,
                    "  {} overloaded on {}: {} active, capacity {}",
                    item.id,
                    cursor,
                    active.len(),
                    item.total_quantity
                );

                // Non-critical tasks move before critical ones, lower
                // priorities before higher. Stable, so ties keep task order.
                let mut candidates = active;
                candidates.sort_by_key(|&ix| {
                    (
                        critical.contains(&adjusted[ix].id),
                        Reverse(adjusted[ix].priority.rank()),
                    )
                });

                let mut remaining = overload;
                for &ix in &candidates {
                    if remaining == 0 {
                        break;
                    }
                    match self.strategy {
                        OptimizeStrategy::Smoothing => {
                            if float[ix] > 0 {
                                adjusted[ix].shift(1);
                                float[ix] -= 1;
                                remaining -= 1;
                                shifts += 1;
                                log_changes!(
                                    verbosity,
                                    "  Shifted {} to start {} ({} float day(s) left)",
                                    adjusted[ix].id,
                                    adjusted[ix].start_date,
                                    float[ix]
                                );
                            } else {
                                log_checks!(
                                    verbosity,
                                    "  {} kept in place, no float remaining",
                                    adjusted[ix].id
                                );
                            }
                        }
                        OptimizeStrategy::Leveling => {
                            adjusted[ix].shift(1);
                            remaining -= 1;
                            shifts += 1;
                            if adjusted[ix].end_date > tracked_end {
                                tracked_end = adjusted[ix].end_date;
                                log_changes!(
                                    verbosity,
                                    "  Shifted {} to start {}, project end now {}",
                                    adjusted[ix].id,
                                    adjusted[ix].start_date,
                                    tracked_end
                                );
                            } else {
                                log_changes!(
                                    verbosity,
                                    "  Shifted {} to start {}",
                                    adjusted[ix].id,
                                    adjusted[ix].start_date
                                );
                            }
                        }
                    }
                }
                if remaining > 0 {
                    log_checks!(
                        verbosity,
                        "  Overload on {} persists, {} unit(s) unresolved",
                        item.id,
                        remaining
                    );
                }
            }

            let Some(next) = cursor.succ_opt() else {
                break;
            };
            cursor = next;
        }

        let mut changes = Vec::new();
        for (original, task) in self.tasks.iter().zip(&adjusted) {
            if task.start_date == original.start_date {
                continue;
            }
            let delay = (task.start_date - original.start_date).num_days();
            changes.push(TaskChange {
                task_id: task.id.clone(),
                task_name: task.name.clone(),
                original_start: original.start_date,
                new_start: task.start_date,
                delay_days: delay,
                reason: self.change_reason(delay, &task.assignee),
            });
        }

        let new_end = adjusted
            .iter()
            .map(|task| task.end_date)
            .max()
            .unwrap_or(window_end);
        let metrics = OptimizationMetrics {
            original_duration_days: original_duration,
            new_duration_days: (new_end - window_start).num_days(),
            conflicts_resolved: total_overload(self.tasks, self.resource_pool)
                - total_overload(&adjusted, self.resource_pool),
            peak_overload_reduced: peak_overload(self.tasks, self.resource_pool)
                - peak_overload(&adjusted, self.resource_pool),
        };

        log_changes!(
            verbosity,
            "Done: {} task(s) moved, {} shift(s), end {}",
            changes.len(),
            shifts,
            new_end
        );

        OptimizationResult {
            tasks: adjusted,
            changes,
            metrics,
        }
    }

    /// Task ids on the initial critical path, used to order shift candidates.
    fn critical_ids(&self) -> HashSet<String> {
        let (nodes, edges) = task_graph(self.tasks, self.edges);
        compute_critical_path(&nodes, &edges)
            .path
            .into_iter()
            .collect()
    }

    /// Days each task can shift forward, indexed like the task slice.
    ///
    /// Anchored to the latest end date in the original set, so a task with
    /// exhausted float can never push its end past the project end. When
    /// explicit edges exist, also capped so the task's end stays strictly
    /// before each successor's original start.
    fn shiftable_float(&self, window_end: NaiveDate) -> Vec<i64> {
        self.tasks
            .iter()
            .map(|task| {
                let mut float = (window_end - task.end_date).num_days().max(0);
                for (source, target) in self.edges {
                    if source != &task.id {
                        continue;
                    }
                    if let Some(successor) =
                        self.tasks.iter().find(|candidate| &candidate.id == target)
                    {
                        let gap = (successor.start_date - task.end_date).num_days() - 1;
                        float = float.min(gap.max(0));
                    }
                }
                float
            })
            .collect()
    }

    fn change_reason(&self, delay: i64, assignee: &str) -> String {
        match self.strategy {
            OptimizeStrategy::Smoothing => format!(
                "Delayed {} day(s) within available float to relieve overallocation of {}",
                delay, assignee
            ),
            OptimizeStrategy::Leveling => {
                format!("Delayed {} day(s) to level demand on {}", delay, assignee)
            }
        }
    }
}

/// Optimizes a project's task set against the shared resource pool.
///
/// Criticality falls back to start-date-order chaining since no dependency
/// data is supplied, and diagnostics are silent.
pub fn optimize_schedule(
    project: &Project,
    tasks: &[Task],
    resource_pool: &[ResourcePoolItem],
    strategy: OptimizeStrategy,
) -> OptimizationResult {
    ScheduleOptimizer::new(project, tasks, resource_pool, strategy).execute()
}

/// Optimizes with an explicit task dependency edge list and configuration.
pub fn optimize_schedule_with_dependencies(
    project: &Project,
    tasks: &[Task],
    edges: &[(String, String)],
    resource_pool: &[ResourcePoolItem],
    strategy: OptimizeStrategy,
    config: OptimizerConfig,
) -> OptimizationResult {
    ScheduleOptimizer::with_dependencies(project, tasks, edges, resource_pool, strategy, config)
        .execute()
}

/// Per-resource daily active-task counts over the task-set span.
pub fn daily_usage(tasks: &[Task], resource_pool: &[ResourcePoolItem]) -> ResourceUsage {
    let Some((start, end)) = task_window(tasks) else {
        return ResourceUsage {
            span_start: None,
            span_end: None,
            counts: HashMap::new(),
        };
    };
    let mut counts = HashMap::new();
    for item in resource_pool {
        let per_day = start
            .iter_days()
            .take_while(|day| *day <= end)
            .map(|day| {
                tasks
                    .iter()
                    .filter(|task| task.assignee == item.id && task.covers(day))
                    .count() as i64
            })
            .collect();
        counts.insert(item.id.clone(), per_day);
    }
    ResourceUsage {
        span_start: Some(start),
        span_end: Some(end),
        counts,
    }
}

/// Worst single-day overload across all pooled resources, floored at zero.
pub fn peak_overload(tasks: &[Task], resource_pool: &[ResourcePoolItem]) -> i64 {
    let usage = daily_usage(tasks, resource_pool);
    let mut peak = 0;
    for item in resource_pool {
        if let Some(per_day) = usage.counts.get(&item.id) {
            for &active in per_day {
                peak = peak.max(active - item.total_quantity);
            }
        }
    }
    peak
}

/// Overload unit-days across all pooled resources: for every resource and
/// day, `active - capacity` where positive, summed over the task-set span.
pub fn total_overload(tasks: &[Task], resource_pool: &[ResourcePoolItem]) -> i64 {
    let usage = daily_usage(tasks, resource_pool);
    let mut total = 0;
    for item in resource_pool {
        if let Some(per_day) = usage.counts.get(&item.id) {
            for &active in per_day {
                total += (active - item.total_quantity).max(0);
            }
        }
    }
    total
}

fn task_window(tasks: &[Task]) -> Option<(NaiveDate, NaiveDate)> {
    let start = tasks.iter().map(|task| task.start_date).min()?;
    let end = tasks.iter().map(|task| task.end_date).max()?;
    Some((start, end))
}
