// src/graph/store.rs

use std::collections::HashMap;
use std::sync::Arc;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::errors::{LayerdagError, Result};
use crate::graph::node::{NodeData, NodeId, NodeSpec};
use crate::unit::{UnitHandle, UnitKey};

/// In-memory dependency graph keyed two ways: by registered name and by
/// unit identity.
///
/// Node data lives in an arena; both indexes hold [`NodeId`]s only. The
/// store is single-writer by construction: every mutation takes `&mut self`,
/// so concurrent redefinition is ruled out statically.
pub struct GraphStore<C, A = ()> {
    nodes: Vec<NodeData<C, A>>,
    by_name: HashMap<String, NodeId>,
    by_unit: HashMap<UnitKey, NodeId>,
}

impl<C, A> Default for GraphStore<C, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, A> GraphStore<C, A> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            by_name: HashMap::new(),
            by_unit: HashMap::new(),
        }
    }

    /// Resolve a handle to a node, name index first, then unit identity.
    /// Returns `None` on miss so callers can decide whether to auto-register.
    pub fn lookup(&self, handle: &UnitHandle<C, A>) -> Option<NodeId> {
        match handle {
            UnitHandle::Name(name) => self.by_name.get(name).copied(),
            UnitHandle::Unit(unit) => self.by_unit.get(&UnitKey::of(unit)).copied(),
        }
    }

    /// Return the node for `handle`, creating it if the handle carries the
    /// unit itself.
    ///
    /// - An already-registered handle is returned as-is.
    /// - A unit handle creates a node named by the unit's declared name,
    ///   with an empty dependency set.
    /// - [`LayerdagError::DuplicateNode`] if a different node already claims
    ///   that derived name.
    /// - [`LayerdagError::UnregistrableUnit`] for a bare unknown name, or a
    ///   unit whose declared name is empty.
    pub fn auto_register(&mut self, handle: &UnitHandle<C, A>) -> Result<NodeId> {
        if let Some(id) = self.lookup(handle) {
            return Ok(id);
        }

        match handle {
            UnitHandle::Name(name) => Err(LayerdagError::UnregistrableUnit(name.clone())),
            UnitHandle::Unit(unit) => {
                let name = unit.name().to_string();
                if name.is_empty() {
                    return Err(LayerdagError::UnregistrableUnit(
                        "<unit with empty name>".to_string(),
                    ));
                }
                if self.by_name.contains_key(&name) {
                    return Err(LayerdagError::DuplicateNode(name));
                }
                Ok(self.install(name, Arc::clone(unit)))
            }
        }
    }

    /// Idempotent upsert of a node declaration.
    ///
    /// Prefers an existing node found under the declared name or the unit's
    /// identity, so re-declaring a node does not fork it. The dependency set
    /// is cleared and rebuilt by auto-registering every declared dependency,
    /// and the node is re-installed under both indexes. Previously
    /// independent names can end up aliased to one node when the declaration
    /// overlaps them.
    pub fn track(&mut self, spec: NodeSpec<C, A>) -> Result<NodeId> {
        let key = UnitKey::of(&spec.unit);
        let existing = self
            .by_name
            .get(&spec.name)
            .copied()
            .or_else(|| self.by_unit.get(&key).copied());

        let id = match existing {
            Some(id) => {
                debug!(node = %spec.name, id = id.0, "redefining tracked node");
                let node = &mut self.nodes[id.0];
                node.name = spec.name.clone();
                node.unit = Arc::clone(&spec.unit);
                node.depends_on.clear();
                id
            }
            None => self.install(spec.name.clone(), Arc::clone(&spec.unit)),
        };

        for dep in &spec.depends_on {
            // May grow the arena, so the node borrow is re-taken afterwards.
            let dep_id = self.auto_register(dep)?;
            let dep_key = self.nodes[dep_id.0].key();
            let node = &mut self.nodes[id.0];
            if !node.depends_on.contains(&dep_key) {
                node.depends_on.push(dep_key);
            }
        }

        // Re-install under both indexes; stale aliases keep pointing here.
        self.by_name.insert(spec.name, id);
        self.by_unit.insert(key, id);
        Ok(id)
    }

    /// Primary edge-creation entry point: auto-registers both sides, then
    /// records that `handle` depends on `depends_on`.
    pub fn add_dependency(
        &mut self,
        handle: &UnitHandle<C, A>,
        depends_on: &UnitHandle<C, A>,
    ) -> Result<()> {
        let id = self.auto_register(handle)?;
        let dep_id = self.auto_register(depends_on)?;
        let dep_key = self.nodes[dep_id.0].key();

        let node = &mut self.nodes[id.0];
        if !node.depends_on.contains(&dep_key) {
            debug!(node = %node.name, dep = dep_id.0, "dependency added");
            node.depends_on.push(dep_key);
        }
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn name_of(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id.0).map(|n| n.name.as_str())
    }

    /// Direct dependencies of a node, as unit identities.
    pub fn dependencies_of(&self, id: NodeId) -> &[UnitKey] {
        self.nodes
            .get(id.0)
            .map(|n| n.depends_on.as_slice())
            .unwrap_or(&[])
    }

    /// Check the whole graph for cycles up front with a topological sort.
    ///
    /// The resolver detects cycles on its own during `solve`; this is a
    /// cheaper way to reject a bad graph before any plan is requested.
    pub fn validate_acyclic(&self) -> Result<()> {
        // Edge direction: dependency -> dependent.
        let mut graph: DiGraphMap<usize, ()> = DiGraphMap::new();

        for id in 0..self.nodes.len() {
            graph.add_node(id);
        }
        for (id, node) in self.nodes.iter().enumerate() {
            for dep_key in &node.depends_on {
                if let Some(dep_id) = self.by_unit.get(dep_key) {
                    graph.add_edge(dep_id.0, id, ());
                }
            }
        }

        match toposort(&graph, None) {
            Ok(_order) => Ok(()),
            Err(cycle) => {
                let name = self.nodes[cycle.node_id()].name.clone();
                Err(LayerdagError::Cycle(vec![name]))
            }
        }
    }

    pub(crate) fn node(&self, id: NodeId) -> &NodeData<C, A> {
        &self.nodes[id.0]
    }

    pub(crate) fn lookup_key(&self, key: &UnitKey) -> Option<NodeId> {
        self.by_unit.get(key).copied()
    }

    fn install(&mut self, name: String, unit: Arc<dyn crate::unit::Unit<C, A>>) -> NodeId {
        let id = NodeId(self.nodes.len());
        let key = UnitKey::of(&unit);
        debug!(node = %name, id = id.0, "registering node");
        self.nodes.push(NodeData {
            name: name.clone(),
            unit,
            depends_on: Vec::new(),
        });
        self.by_name.insert(name, id);
        self.by_unit.insert(key, id);
        id
    }
}
