// src/graph/mod.rs

//! Dependency graph storage.
//!
//! - [`node`] defines the arena types: dense [`NodeId`] indices, node data
//!   and the [`NodeSpec`] declaration used by `track`.
//! - [`store`] owns all graph mutation (register, redefine, link) and the
//!   two lookup indexes (name and unit identity).

pub mod node;
pub mod store;

pub use node::{NodeId, NodeSpec};
pub use store::GraphStore;
