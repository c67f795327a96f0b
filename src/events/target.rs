//! # Targets: event origins and listener contexts.
//!
//! A [`Target`] stands for "some object" in two places:
//! - the **origin** an [`Event`](crate::Event) reports once dispatched;
//! - the **context** a listener is invoked with (its explicit binding, or the
//!   dispatcher itself).
//!
//! It is either a [`Dispatcher`] handle or an arbitrary shared object that callers
//! recover with [`Target::downcast_ref`].

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::dispatch::Dispatcher;

/// Shared, type-erased object.
pub type Object = Arc<dyn Any + Send + Sync>;

/// An event origin or a listener binding context.
#[derive(Clone)]
pub enum Target {
    /// A dispatcher (the default origin and the default context).
    Dispatcher(Dispatcher),
    /// Any other shared object.
    Object(Object),
}

impl Target {
    /// Wraps a value into a new shared object target.
    pub fn object<T: Any + Send + Sync>(value: T) -> Self {
        Target::Object(Arc::new(value))
    }

    /// Wraps an existing shared value, keeping its identity.
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Target::Object(value)
    }

    /// Returns the dispatcher, if this target is one.
    pub fn as_dispatcher(&self) -> Option<&Dispatcher> {
        match self {
            Target::Dispatcher(d) => Some(d),
            Target::Object(_) => None,
        }
    }

    /// Downcasts an object target to a concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Target::Object(obj) => obj.downcast_ref::<T>(),
            Target::Dispatcher(_) => None,
        }
    }

    /// Identity comparison: same dispatcher or same shared allocation.
    pub fn is(&self, other: &Target) -> bool {
        match (self, other) {
            (Target::Dispatcher(a), Target::Dispatcher(b)) => a.ptr_eq(b),
            (Target::Object(a), Target::Object(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            _ => false,
        }
    }

    /// Returns `true` if this target is exactly `dispatcher`.
    pub fn is_dispatcher(&self, dispatcher: &Dispatcher) -> bool {
        self.as_dispatcher().is_some_and(|d| d.ptr_eq(dispatcher))
    }

    /// Returns `true` if this target is the object behind `value`.
    pub fn is_object<T: Any + Send + Sync>(&self, value: &Arc<T>) -> bool {
        match self {
            Target::Object(obj) => std::ptr::addr_eq(Arc::as_ptr(obj), Arc::as_ptr(value)),
            Target::Dispatcher(_) => false,
        }
    }
}

impl From<Dispatcher> for Target {
    fn from(d: Dispatcher) -> Self {
        Target::Dispatcher(d)
    }
}

impl From<&Dispatcher> for Target {
    fn from(d: &Dispatcher) -> Self {
        Target::Dispatcher(d.clone())
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Dispatcher(d) => write!(f, "Target::Dispatcher({})", d.label()),
            Target::Object(obj) => write!(f, "Target::Object({:p})", Arc::as_ptr(obj)),
        }
    }
}
