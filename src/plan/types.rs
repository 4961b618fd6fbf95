// src/plan/types.rs

use std::fmt;
use std::sync::Arc;

use crate::unit::{Unit, UnitKey};

/// A unit as it appears in a resolved plan: the registered name, the unit's
/// identity, and the unit itself ready for invocation.
pub struct PlannedUnit<C, A = ()> {
    pub name: String,
    pub key: UnitKey,
    pub unit: Arc<dyn Unit<C, A>>,
}

impl<C, A> Clone for PlannedUnit<C, A> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            key: self.key,
            unit: Arc::clone(&self.unit),
        }
    }
}

impl<C, A> fmt::Debug for PlannedUnit<C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlannedUnit")
            .field("name", &self.name)
            .field("key", &self.key)
            .finish()
    }
}

/// A set of units eligible to run concurrently. Order within a layer
/// carries no meaning; equality compares identities as a set.
pub struct Layer<C, A = ()> {
    units: Vec<PlannedUnit<C, A>>,
}

impl<C, A> Layer<C, A> {
    pub(crate) fn new() -> Self {
        Self { units: Vec::new() }
    }

    pub(crate) fn single(unit: PlannedUnit<C, A>) -> Self {
        Self { units: vec![unit] }
    }

    pub(crate) fn merge(&mut self, other: Layer<C, A>) {
        self.units.extend(other.units);
    }

    pub fn units(&self) -> &[PlannedUnit<C, A>] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.units.iter().map(|u| u.name.as_str()).collect()
    }

    fn sorted_keys(&self) -> Vec<UnitKey> {
        let mut keys: Vec<UnitKey> = self.units.iter().map(|u| u.key).collect();
        keys.sort();
        keys
    }
}

impl<C, A> Clone for Layer<C, A> {
    fn clone(&self) -> Self {
        Self {
            units: self.units.clone(),
        }
    }
}

impl<C, A> fmt::Debug for Layer<C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl<C, A> PartialEq for Layer<C, A> {
    fn eq(&self, other: &Self) -> bool {
        self.sorted_keys() == other.sorted_keys()
    }
}

impl<C, A> Eq for Layer<C, A> {}

/// An ordered sequence of layers for one target node.
///
/// For every unit in layer `i`, everything it transitively depends on sits
/// in layers `0..i`; no unit appears twice; the final layer holds exactly
/// the requested unit. Plans are immutable once resolved and shared as
/// `Arc<Plan>`.
pub struct Plan<C, A = ()> {
    layers: Vec<Layer<C, A>>,
}

impl<C, A> Plan<C, A> {
    pub(crate) fn new(layers: Vec<Layer<C, A>>) -> Self {
        Self { layers }
    }

    pub fn layers(&self) -> &[Layer<C, A>] {
        &self.layers
    }

    /// Number of layers.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Total number of planned units across all layers.
    pub fn unit_count(&self) -> usize {
        self.layers.iter().map(Layer::len).sum()
    }

    /// Names per layer, for inspection and assertions.
    pub fn layer_names(&self) -> Vec<Vec<String>> {
        self.layers
            .iter()
            .map(|l| l.names().iter().map(|n| n.to_string()).collect())
            .collect()
    }
}

impl<C, A> Clone for Plan<C, A> {
    fn clone(&self) -> Self {
        Self {
            layers: self.layers.clone(),
        }
    }
}

impl<C, A> fmt::Debug for Plan<C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.layers).finish()
    }
}

impl<C, A> PartialEq for Plan<C, A> {
    fn eq(&self, other: &Self) -> bool {
        self.layers == other.layers
    }
}

impl<C, A> Eq for Plan<C, A> {}
