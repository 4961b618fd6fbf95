// src/engine/mod.rs

//! The [`Engine`] facade wiring the graph store, the plan cache and the
//! executor behind the four external operations: graph construction
//! (`add_dependency` / `track`), `plan` and `run`.

pub mod runtime;

pub use runtime::Engine;
