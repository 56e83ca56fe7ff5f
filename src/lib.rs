pub mod calculations;
pub mod dependency;
pub mod graph;
pub mod logging;
pub mod optimizer;
pub mod portfolio;
pub mod project;
pub mod resource;
pub mod task;
pub mod validation;

pub use calculations::critical_path::{
    CriticalPathResult, compute_critical_path, project_graph, task_graph,
};
pub use dependency::{DependencyEdge, DependencyStatus, DependencyType};
pub use graph::PathNode;
pub use optimizer::{
    OptimizationMetrics, OptimizationResult, OptimizeStrategy, OptimizerConfig, ResourceUsage,
    ScheduleOptimizer, TaskChange, daily_usage, optimize_schedule,
    optimize_schedule_with_dependencies, peak_overload, total_overload,
};
pub use portfolio::{
    DegreeEntry, DependencyStats, ImpactEntry, aggregate_dependency_stats, build_dependency_graph,
    propagate_delay,
};
pub use project::{Project, ProjectStatus, ResourceRequirement};
pub use resource::ResourcePoolItem;
pub use task::{Task, TaskPriority};
pub use validation::{
    ValidationError, ValidationResult, validate_project, validate_project_collection,
    validate_resource_pool, validate_task, validate_task_collection,
};
