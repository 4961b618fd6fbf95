#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use layerdag::{Unit, UnitFuture};

/// Shared run context that records unit starts in invocation order.
///
/// Because the executor only starts a layer once the previous one has fully
/// settled, the recorded order is a faithful witness of layer progression:
/// every start from layer `i` appears before any start from layer `i + 1`.
#[derive(Default)]
pub struct Probe {
    started: Mutex<Vec<String>>,
}

impl Probe {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn record(&self, event: &str) {
        self.started.lock().unwrap().push(event.to_string());
    }

    pub fn started(&self) -> Vec<String> {
        self.started.lock().unwrap().clone()
    }

    /// Position of `event` in the recorded order, if it was recorded.
    pub fn position(&self, event: &str) -> Option<usize> {
        self.started().iter().position(|e| e == event)
    }

    pub fn count(&self, event: &str) -> usize {
        self.started().iter().filter(|e| *e == event).count()
    }
}

/// Unit that records its own start into the shared [`Probe`] and succeeds.
pub struct RecordingUnit {
    name: String,
}

impl RecordingUnit {
    pub fn new(name: &str) -> Arc<dyn Unit<Probe>> {
        Arc::new(Self {
            name: name.to_string(),
        })
    }
}

impl Unit<Probe> for RecordingUnit {
    fn name(&self) -> &str {
        &self.name
    }

    fn invoke(&self, ctx: Arc<Probe>, _args: Arc<()>) -> UnitFuture {
        let name = self.name.clone();
        Box::pin(async move {
            ctx.record(&name);
            Ok(())
        })
    }
}

/// Unit that records its start, then fails with the given message.
pub struct FailingUnit {
    name: String,
    message: String,
}

impl FailingUnit {
    pub fn new(name: &str, message: &str) -> Arc<dyn Unit<Probe>> {
        Arc::new(Self {
            name: name.to_string(),
            message: message.to_string(),
        })
    }
}

impl Unit<Probe> for FailingUnit {
    fn name(&self) -> &str {
        &self.name
    }

    fn invoke(&self, ctx: Arc<Probe>, _args: Arc<()>) -> UnitFuture {
        let name = self.name.clone();
        let message = self.message.clone();
        Box::pin(async move {
            ctx.record(&name);
            Err(anyhow::anyhow!(message))
        })
    }
}

/// Unit whose declared name is empty, so the graph must refuse to register it.
pub struct UnnamedUnit;

impl UnnamedUnit {
    pub fn new() -> Arc<dyn Unit<Probe>> {
        Arc::new(Self)
    }
}

impl Unit<Probe> for UnnamedUnit {
    fn name(&self) -> &str {
        ""
    }

    fn invoke(&self, _ctx: Arc<Probe>, _args: Arc<()>) -> UnitFuture {
        Box::pin(async { Ok(()) })
    }
}

/// Unit that records its name together with the positional args it received,
/// as `name(arg1,arg2,...)`.
pub struct ArgRecordingUnit {
    name: String,
}

impl ArgRecordingUnit {
    pub fn new(name: &str) -> Arc<dyn Unit<Probe, Vec<String>>> {
        Arc::new(Self {
            name: name.to_string(),
        })
    }
}

impl Unit<Probe, Vec<String>> for ArgRecordingUnit {
    fn name(&self) -> &str {
        &self.name
    }

    fn invoke(&self, ctx: Arc<Probe>, args: Arc<Vec<String>>) -> UnitFuture {
        let name = self.name.clone();
        Box::pin(async move {
            ctx.record(&format!("{name}({})", args.join(",")));
            Ok(())
        })
    }
}
