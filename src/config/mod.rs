//! Configuration types for the planner.

mod defaults;
mod plan;

pub use plan::PlanConfig;
