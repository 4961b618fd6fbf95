// src/exec/executor.rs

//! Drives a resolved plan: every unit of a layer runs as its own tokio
//! task with the same shared context and arguments, and the next layer only
//! starts once the whole layer has settled.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::errors::{LayerdagError, Result};
use crate::plan::types::Plan;

/// Execute `plan` layer by layer.
///
/// Failure semantics: the failing layer is fully drained before the first
/// failure is returned, and later layers never start. A panicking unit is
/// reported the same way, with the join error as the source.
pub async fn run_plan<C, A>(plan: &Plan<C, A>, ctx: Arc<C>, args: Arc<A>) -> Result<()>
where
    C: Send + Sync + 'static,
    A: Send + Sync + 'static,
{
    for (depth, layer) in plan.layers().iter().enumerate() {
        debug!(depth, units = layer.len(), "starting layer");

        let mut tasks = JoinSet::new();
        for planned in layer.units() {
            let name = planned.name.clone();
            let unit = Arc::clone(&planned.unit);
            let ctx = Arc::clone(&ctx);
            let args = Arc::clone(&args);
            tasks.spawn(async move { unit.invoke(ctx, args).await.map_err(|err| (name, err)) });
        }

        let mut first_failure: Option<LayerdagError> = None;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err((unit, source))) => {
                    warn!(unit = %unit, depth, error = %source, "unit failed");
                    if first_failure.is_none() {
                        first_failure = Some(LayerdagError::UnitFailed { unit, source });
                    }
                }
                Err(join_err) => {
                    warn!(depth, error = %join_err, "unit task aborted");
                    if first_failure.is_none() {
                        first_failure = Some(LayerdagError::UnitFailed {
                            unit: "<aborted unit>".to_string(),
                            source: anyhow::Error::from(join_err),
                        });
                    }
                }
            }
        }

        if let Some(err) = first_failure {
            return Err(err);
        }
    }

    Ok(())
}
