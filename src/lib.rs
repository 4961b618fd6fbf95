// src/lib.rs

//! `layerdag` — a dependency-graph resolver and layered concurrent executor.
//!
//! Callers register opaque named units of work and declare dependency edges
//! between them; the engine computes an execution plan that groups units
//! into ordered layers — each layer runnable in parallel, each layer's
//! prerequisites fully contained in earlier layers — and runs that plan on
//! tokio, invoking every unit of a layer concurrently before advancing.
//! Resolved plans are memoized in a bounded, time-expiring cache.
//!
//! This is a single-process, in-memory coordination primitive: no
//! distributed scheduling, no persistence, no priorities.

pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod graph;
pub mod logging;
pub mod plan;
pub mod unit;

pub use config::EngineConfig;
pub use engine::Engine;
pub use errors::{LayerdagError, Result};
pub use graph::{GraphStore, NodeId, NodeSpec};
pub use plan::{Layer, Plan, PlanCache, PlannedUnit};
pub use unit::{Unit, UnitFuture, UnitHandle, UnitKey};
