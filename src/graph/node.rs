// src/graph/node.rs

use std::sync::Arc;

use crate::unit::{Unit, UnitHandle, UnitKey};

/// Dense index into the graph arena. Nodes are never deleted, so an id
/// stays valid for the lifetime of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Arena-owned node data. All other structures hold [`NodeId`]s or
/// [`UnitKey`]s, never references into the arena.
pub(crate) struct NodeData<C, A = ()> {
    pub(crate) name: String,
    pub(crate) unit: Arc<dyn Unit<C, A>>,
    /// Direct dependencies as unit identities, in declaration order,
    /// deduplicated on insert.
    pub(crate) depends_on: Vec<UnitKey>,
}

impl<C, A> NodeData<C, A> {
    pub(crate) fn key(&self) -> UnitKey {
        UnitKey::of(&self.unit)
    }
}

/// Declaration of a node for [`GraphStore::track`]: an explicit name, the
/// unit itself, and the handles it depends on.
///
/// [`GraphStore::track`]: crate::graph::GraphStore::track
pub struct NodeSpec<C, A = ()> {
    pub name: String,
    pub unit: Arc<dyn Unit<C, A>>,
    pub depends_on: Vec<UnitHandle<C, A>>,
}

impl<C, A> NodeSpec<C, A> {
    pub fn new(name: &str, unit: Arc<dyn Unit<C, A>>) -> Self {
        Self {
            name: name.to_string(),
            unit,
            depends_on: Vec::new(),
        }
    }

    pub fn depends_on(mut self, handle: impl Into<UnitHandle<C, A>>) -> Self {
        self.depends_on.push(handle.into());
        self
    }
}
