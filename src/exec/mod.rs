// src/exec/mod.rs

//! Layer-by-layer concurrent plan execution.

pub mod executor;

pub use executor::run_plan;
