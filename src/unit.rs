// src/unit.rs

//! The opaque unit of work and the handles used to refer to it.
//!
//! The engine never inspects what a unit does; it only needs a stable,
//! non-empty declared name (for registration and diagnostics) and a way to
//! invoke it. Invocation returns a boxed future so the trait stays
//! object-safe and units can be stored behind `Arc<dyn Unit>`.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future returned by [`Unit::invoke`].
pub type UnitFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'static>>;

/// A schedulable unit of work.
///
/// `C` is the shared call context, `A` the positional arguments; the same
/// `Arc`s are handed to every unit of a layer when a plan runs.
pub trait Unit<C, A = ()>: Send + Sync {
    /// Stable declared name of this unit. Must be non-empty; the graph
    /// derives the node name from it on auto-registration.
    fn name(&self) -> &str;

    /// Perform the work. The operation's value is its side effects; errors
    /// propagate out of the run that invoked this unit.
    fn invoke(&self, ctx: Arc<C>, args: Arc<A>) -> UnitFuture;
}

/// Identity of a work item, independent of the name it is registered under.
///
/// Derived from the `Arc`'s data pointer: clones of one registered `Arc`
/// share a key, distinct allocations are distinct units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitKey(usize);

impl UnitKey {
    pub fn of<C, A>(unit: &Arc<dyn Unit<C, A>>) -> Self {
        Self(Arc::as_ptr(unit) as *const () as usize)
    }
}

/// A reference to a node: either a registered name or the unit itself.
pub enum UnitHandle<C, A = ()> {
    Name(String),
    Unit(Arc<dyn Unit<C, A>>),
}

impl<C, A> UnitHandle<C, A> {
    /// Human-readable form for diagnostics and error messages.
    pub fn describe(&self) -> String {
        match self {
            UnitHandle::Name(name) => name.clone(),
            UnitHandle::Unit(unit) => unit.name().to_string(),
        }
    }
}

impl<C, A> Clone for UnitHandle<C, A> {
    fn clone(&self) -> Self {
        match self {
            UnitHandle::Name(name) => UnitHandle::Name(name.clone()),
            UnitHandle::Unit(unit) => UnitHandle::Unit(Arc::clone(unit)),
        }
    }
}

impl<C, A> fmt::Debug for UnitHandle<C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitHandle::Name(name) => f.debug_tuple("Name").field(name).finish(),
            UnitHandle::Unit(unit) => f.debug_tuple("Unit").field(&unit.name()).finish(),
        }
    }
}

impl<C, A> From<&str> for UnitHandle<C, A> {
    fn from(name: &str) -> Self {
        UnitHandle::Name(name.to_string())
    }
}

impl<C, A> From<String> for UnitHandle<C, A> {
    fn from(name: String) -> Self {
        UnitHandle::Name(name)
    }
}

impl<C, A> From<Arc<dyn Unit<C, A>>> for UnitHandle<C, A> {
    fn from(unit: Arc<dyn Unit<C, A>>) -> Self {
        UnitHandle::Unit(unit)
    }
}
