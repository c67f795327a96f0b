//! # Events carried through dispatchers and the hub.
//!
//! An [`Event`] has three parts:
//! - **category**: fixed at construction;
//! - **payload**: optional shared data, never mutated by the dispatch machinery;
//! - **origin**: unset at construction, resolved by the first dispatcher (or hub
//!   `send` override) that handles the event.
//!
//! ## Origin rules
//! - A dispatcher sets the origin only if it is still unset; re-dispatching the
//!   same instance through another dispatcher keeps the first origin.
//! - [`Hub::send`](crate::Hub::send) with an explicit origin overwrites it.
//! - [`Clone`] yields a fresh event with the origin unset.
//!
//! ## Example
//! ```rust
//! use eventhub::{Category, Event};
//!
//! #[derive(Debug, PartialEq)]
//! struct Loaded { path: &'static str, size: u32 }
//!
//! let ev = Event::new(Category::COMPLETE).with_payload(Loaded { path: "a.jpg", size: 10 });
//!
//! assert_eq!(ev.category(), Category::COMPLETE);
//! assert_eq!(ev.payload::<Loaded>(), Some(&Loaded { path: "a.jpg", size: 10 }));
//! assert!(ev.origin().is_none());
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use super::{Category, Target};

/// Type-erased payload that stays printable for diagnostics.
trait PayloadValue: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + fmt::Debug + Send + Sync> PayloadValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Event dispatched to listeners.
pub struct Event {
    category: Category,
    payload: Option<Arc<dyn PayloadValue>>,
    origin: RwLock<Option<Target>>,
}

impl Event {
    /// Creates an event of the given category without payload.
    pub fn new(category: Category) -> Self {
        Self {
            category,
            payload: None,
            origin: RwLock::new(None),
        }
    }

    /// Attaches a payload.
    #[inline]
    pub fn with_payload<T: Any + fmt::Debug + Send + Sync>(mut self, value: T) -> Self {
        let value: Arc<dyn PayloadValue> = Arc::new(value);
        self.payload = Some(value);
        self
    }

    /// Attaches an already shared payload.
    #[inline]
    pub fn with_shared_payload<T: Any + fmt::Debug + Send + Sync>(mut self, value: Arc<T>) -> Self {
        let value: Arc<dyn PayloadValue> = value;
        self.payload = Some(value);
        self
    }

    /// Category fixed at construction.
    #[inline]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Returns the payload if present and of type `T`.
    pub fn payload<T: Any>(&self) -> Option<&T> {
        self.payload.as_deref().and_then(|p| p.as_any().downcast_ref::<T>())
    }

    /// Returns `true` if a payload of any type is attached.
    #[inline]
    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }

    /// Returns the origin, or `None` if the event was never dispatched.
    pub fn origin(&self) -> Option<Target> {
        self.origin.read().clone()
    }

    /// Sets the origin unless one is already set. Returns `true` if it was set here.
    pub(crate) fn resolve_origin(&self, origin: impl FnOnce() -> Target) -> bool {
        let mut slot = self.origin.write();
        if slot.is_some() {
            return false;
        }
        *slot = Some(origin());
        true
    }

    /// Overwrites the origin unconditionally.
    pub(crate) fn force_origin(&self, origin: Target) {
        *self.origin.write() = Some(origin);
    }
}

impl Clone for Event {
    /// Same category and payload; the origin is reset.
    fn clone(&self) -> Self {
        Self {
            category: self.category,
            payload: self.payload.clone(),
            origin: RwLock::new(None),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            Some(p) => write!(f, "Event(category={}, payload={:?})", self.category, p),
            None => write!(f, "Event(category={}, payload=None)", self.category),
        }
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("category", &self.category)
            .field("payload", &self.payload)
            .field("origin", &*self.origin.read())
            .finish()
    }
}
