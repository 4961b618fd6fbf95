// src/errors.rs

//! Crate-wide error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayerdagError {
    /// A handle was looked up for resolution but no node is registered
    /// under that name or unit identity.
    #[error("Unknown dependency: no node registered for '{0}'")]
    UnknownDependency(String),

    /// Auto-registration collided with an existing, differently-identified
    /// node of the same derived name. Indicates a wiring bug.
    #[error("Duplicate node: a different unit is already registered as '{0}'")]
    DuplicateNode(String),

    /// The argument is neither a known handle nor a registrable unit; a bare
    /// name with no prior registration cannot be auto-created.
    #[error("Unregistrable unit: '{0}' is not a known handle or a named unit")]
    UnregistrableUnit(String),

    /// The dependency graph loops back on itself; members are listed in
    /// traversal order.
    #[error("Cycle detected in dependency graph: {}", .0.join(" -> "))]
    Cycle(Vec<String>),

    /// A unit invocation failed (or panicked) during plan execution.
    #[error("Unit '{unit}' failed during execution")]
    UnitFailed {
        unit: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, LayerdagError>;
