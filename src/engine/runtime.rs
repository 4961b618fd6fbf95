// src/engine/runtime.rs

use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::errors::{LayerdagError, Result};
use crate::exec;
use crate::graph::{GraphStore, NodeId, NodeSpec};
use crate::plan::{resolver, Plan, PlanCache};
use crate::unit::{Unit, UnitHandle};

/// In-process coordinator: owns the dependency graph and a memoizing plan
/// cache, and drives layered concurrent execution.
///
/// Graph mutation takes `&mut self`, so the multi-step read-modify-write of
/// node redefinition is serialized by the borrow checker. `plan` and `run`
/// take `&self`; the cache behind its mutex is the only interior mutability,
/// and the lock is held only across individual get/put calls. Two racing
/// misses for the same target may both compute and both store — benign,
/// since plans are deterministic to recompute.
pub struct Engine<C, A = ()> {
    store: GraphStore<C, A>,
    cache: Mutex<PlanCache<C, A>>,
}

impl<C, A> Default for Engine<C, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, A> Engine<C, A> {
    pub fn new() -> Self {
        let config = EngineConfig::default();
        Self {
            store: GraphStore::new(),
            cache: Mutex::new(PlanCache::new(config.cache_capacity(), config.cache_ttl())),
        }
    }

    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store: GraphStore::new(),
            cache: Mutex::new(PlanCache::new(config.cache_capacity(), config.cache_ttl())),
        })
    }

    /// Explicitly register a unit under its declared name, with no
    /// dependencies. Registering the same unit again returns its node.
    pub fn register(&mut self, unit: Arc<dyn Unit<C, A>>) -> Result<NodeId> {
        self.store.auto_register(&UnitHandle::Unit(unit))
    }

    /// Upsert a full node declaration (name, unit, dependency set).
    pub fn track(&mut self, spec: NodeSpec<C, A>) -> Result<NodeId> {
        self.store.track(spec)
    }

    /// Record that `handle` depends on `depends_on`, auto-registering both.
    pub fn add_dependency(
        &mut self,
        handle: impl Into<UnitHandle<C, A>>,
        depends_on: impl Into<UnitHandle<C, A>>,
    ) -> Result<()> {
        self.store.add_dependency(&handle.into(), &depends_on.into())
    }

    /// Read access to the underlying graph, for inspection and tests.
    pub fn graph(&self) -> &GraphStore<C, A> {
        &self.store
    }

    /// Resolve (or serve from cache) the execution plan for `handle`.
    ///
    /// Side-effect-free apart from cache population; usable for inspection.
    pub fn plan(&self, handle: impl Into<UnitHandle<C, A>>) -> Result<Arc<Plan<C, A>>> {
        let handle = handle.into();
        let id = self
            .store
            .lookup(&handle)
            .ok_or_else(|| LayerdagError::UnknownDependency(handle.describe()))?;
        let key = self.store.node(id).key();

        if let Some(plan) = self.lock_cache().get(&key) {
            debug!(target = %self.store.node(id).name, "plan cache hit");
            return Ok(plan);
        }

        // Miss: compute outside the lock, then store.
        let plan = Arc::new(resolver::solve(&self.store, &handle)?);
        self.lock_cache().put(key, Arc::clone(&plan));
        Ok(plan)
    }

    /// Plan `handle` and run it: every unit of a layer is invoked
    /// concurrently with the same `ctx` and `args`, and a layer must fully
    /// settle before the next one starts. Returns the context unchanged;
    /// the operation's value is its side effects plus completion ordering.
    pub async fn run(
        &self,
        handle: impl Into<UnitHandle<C, A>>,
        ctx: Arc<C>,
        args: Arc<A>,
    ) -> Result<Arc<C>>
    where
        C: Send + Sync + 'static,
        A: Send + Sync + 'static,
    {
        let handle = handle.into();
        let plan = self.plan(handle.clone())?;
        info!(
            target = %handle.describe(),
            layers = plan.depth(),
            units = plan.unit_count(),
            "running plan"
        );
        exec::run_plan(&plan, Arc::clone(&ctx), args).await?;
        Ok(ctx)
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, PlanCache<C, A>> {
        self.cache.lock().expect("plan cache lock poisoned")
    }
}
