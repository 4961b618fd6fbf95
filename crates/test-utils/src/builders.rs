#![allow(dead_code)]

use layerdag::{Engine, EngineConfig};

use crate::units::{FailingUnit, Probe, RecordingUnit};

/// Builder for an [`Engine`] of recording units, to simplify test setup.
///
/// Units are registered under their declared names; edges are declared by
/// name after the fact, matching how embedders wire graphs up.
pub struct EngineBuilder {
    engine: Engine<Probe>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            engine: Engine::new(),
        }
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            engine: Engine::with_config(config).expect("valid engine config"),
        }
    }

    /// Register a unit that records its start into the shared probe.
    pub fn unit(mut self, name: &str) -> Self {
        self.engine
            .register(RecordingUnit::new(name))
            .expect("register recording unit");
        self
    }

    /// Register a unit that records its start and then fails.
    pub fn failing_unit(mut self, name: &str, message: &str) -> Self {
        self.engine
            .register(FailingUnit::new(name, message))
            .expect("register failing unit");
        self
    }

    /// Declare that `name` depends on `dep` (both must be registered).
    pub fn edge(mut self, name: &str, dep: &str) -> Self {
        self.engine
            .add_dependency(name, dep)
            .expect("add dependency edge");
        self
    }

    pub fn build(self) -> Engine<Probe> {
        self.engine
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
