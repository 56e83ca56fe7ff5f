//! Cross-project analysis over inferred dependencies.
//!
//! Everything in here operates on the portfolio level. Single-project
//! scheduling concerns live in the calculations and optimizer modules.

pub mod delay;
pub mod dependency_graph;
pub mod stats;

pub use delay::{ImpactEntry, propagate_delay};
pub use dependency_graph::build_dependency_graph;
pub use stats::{DegreeEntry, DependencyStats, aggregate_dependency_stats};
