// src/plan/resolver.rs

//! Layered plan resolution.
//!
//! A plan is computed by recursively resolving each dependency's sub-plan
//! and merging sub-plans positionally, by distance from the requested
//! target. A single `visited` set is threaded through the whole call tree,
//! so a unit shared by several paths (a diamond) is emitted exactly once —
//! at the position the first traversal path gave it.

use std::collections::HashSet;

use tracing::debug;

use crate::errors::{LayerdagError, Result};
use crate::graph::node::{NodeData, NodeId};
use crate::graph::GraphStore;
use crate::plan::types::{Layer, Plan, PlannedUnit};
use crate::unit::{UnitHandle, UnitKey};

/// Resolve the execution plan for `handle`.
///
/// Fails with [`LayerdagError::UnknownDependency`] if the handle has no
/// registered node, and with [`LayerdagError::Cycle`] if the dependency
/// chain loops back on itself.
pub fn solve<C, A>(store: &GraphStore<C, A>, handle: &UnitHandle<C, A>) -> Result<Plan<C, A>> {
    let id = store
        .lookup(handle)
        .ok_or_else(|| LayerdagError::UnknownDependency(handle.describe()))?;

    let mut visited: HashSet<UnitKey> = HashSet::new();
    let mut in_progress: Vec<NodeId> = Vec::new();
    let layers = solve_node(store, id, &mut visited, &mut in_progress)?;

    debug!(
        target = %store.node(id).name,
        depth = layers.len(),
        "plan resolved"
    );
    Ok(Plan::new(layers))
}

/// Resolve one node into layers, deepest dependencies first, the node's own
/// unit as the final layer.
fn solve_node<C, A>(
    store: &GraphStore<C, A>,
    id: NodeId,
    visited: &mut HashSet<UnitKey>,
    in_progress: &mut Vec<NodeId>,
) -> Result<Vec<Layer<C, A>>> {
    let node = store.node(id);
    visited.insert(node.key());

    if node.depends_on.is_empty() {
        return Ok(vec![Layer::single(planned(node))]);
    }

    in_progress.push(id);

    // Accumulator is ordered nearest-to-target first: index 0 holds direct
    // dependencies, index 1 their dependencies, and so on. Dependencies with
    // shallower sub-plans simply stop contributing at their own depth.
    let mut acc: Vec<Layer<C, A>> = Vec::new();

    for dep_key in &node.depends_on {
        let dep_id = store.lookup_key(dep_key).ok_or_else(|| {
            LayerdagError::UnknownDependency(format!("dependency of '{}'", node.name))
        })?;

        // The in-progress check must come before the visited skip: a back
        // edge always points at a visited node.
        if in_progress.contains(&dep_id) {
            return Err(cycle_error(store, in_progress, dep_id));
        }
        if visited.contains(dep_key) {
            continue;
        }

        let sub = solve_node(store, dep_id, visited, in_progress)?;
        for (depth, layer) in sub.into_iter().rev().enumerate() {
            if acc.len() <= depth {
                acc.push(Layer::new());
            }
            acc[depth].merge(layer);
        }
    }

    in_progress.pop();

    let mut layers: Vec<Layer<C, A>> = acc.into_iter().rev().collect();
    layers.push(Layer::single(planned(node)));
    Ok(layers)
}

fn planned<C, A>(node: &NodeData<C, A>) -> PlannedUnit<C, A> {
    PlannedUnit {
        name: node.name.clone(),
        key: node.key(),
        unit: std::sync::Arc::clone(&node.unit),
    }
}

/// Cycle members in traversal order, from the offending node's first
/// appearance on the stack through the top.
fn cycle_error<C, A>(
    store: &GraphStore<C, A>,
    in_progress: &[NodeId],
    offender: NodeId,
) -> LayerdagError {
    let start = in_progress
        .iter()
        .position(|id| *id == offender)
        .unwrap_or(0);
    let names = in_progress[start..]
        .iter()
        .map(|id| store.node(*id).name.clone())
        .collect();
    LayerdagError::Cycle(names)
}
