// src/config.rs

//! Engine configuration.
//!
//! Embedders typically construct [`EngineConfig`] in code, but it derives
//! `Deserialize` so it can also live inside a host application's own config
//! file.

use std::num::NonZeroUsize;
use std::time::Duration;

use serde::Deserialize;

use crate::errors::{LayerdagError, Result};

/// Default number of memoized plans kept by the plan cache.
pub const DEFAULT_PLAN_CACHE_CAPACITY: usize = 64;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of cached plans; least-recently-used entries are
    /// evicted on overflow. Must be >= 1.
    pub plan_cache_capacity: usize,

    /// Maximum age of a cache entry in milliseconds, measured from insertion
    /// (a hit does not extend it). `None` means entries only die by capacity
    /// pressure.
    pub plan_cache_ttl_ms: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            plan_cache_capacity: DEFAULT_PLAN_CACHE_CAPACITY,
            plan_cache_ttl_ms: None,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.plan_cache_capacity == 0 {
            return Err(LayerdagError::Config(
                "plan_cache_capacity must be >= 1 (got 0)".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn cache_capacity(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.plan_cache_capacity).unwrap_or(NonZeroUsize::MIN)
    }

    pub(crate) fn cache_ttl(&self) -> Option<Duration> {
        self.plan_cache_ttl_ms.map(Duration::from_millis)
    }
}
