// src/plan/mod.rs

//! Plan resolution and memoization.
//!
//! - [`types`] defines the immutable [`Plan`] / [`Layer`] types.
//! - [`resolver`] computes a deduplicated, dependency-ordered sequence of
//!   layers for a target node, with cycle detection.
//! - [`cache`] bounds and time-expires memoized plans.

pub mod cache;
pub mod resolver;
pub mod types;

pub use cache::PlanCache;
pub use types::{Layer, Plan, PlannedUnit};
