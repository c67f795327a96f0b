//! # Listener callbacks (`Callback`)
//!
//! [`Callback`] wraps a closure `Fn(&Target, &Event) -> Result<(), ListenerError>`
//! behind an `Arc`. The `Arc` is the callback's **identity**: registering a clone of
//! the same `Callback` twice deduplicates, and removal needs a clone of the handle
//! that was registered. Two callbacks built from identical closures are different
//! listeners.
//!
//! ## Bound methods
//! [`Callback::method`] binds a method to a receiver held by `Weak`. Once the receiver
//! is dropped the callback is no longer invocable: registering it fails with
//! [`DispatchError::InvalidListener`](crate::DispatchError::InvalidListener), and an
//! already registered one is dropped from the registry by the next dispatch or
//! `has_listener` query.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use eventhub::{Callback, Category, Event, ListenerError, Target};
//!
//! struct Counter { hits: AtomicUsize }
//!
//! impl Counter {
//!     fn on_open(&self, _ctx: &Target, _ev: &Event) -> Result<(), ListenerError> {
//!         self.hits.fetch_add(1, Ordering::Relaxed);
//!         Ok(())
//!     }
//! }
//!
//! let counter = Arc::new(Counter { hits: AtomicUsize::new(0) });
//! let cb = Callback::method(&counter, Counter::on_open);
//! assert!(cb.is_invocable());
//!
//! drop(counter);
//! assert!(!cb.is_invocable());
//! ```

use std::any::Any;
use std::fmt;
use std::sync::{Arc, Weak};

use tracing::debug;

use crate::error::ListenerError;
use crate::events::{Event, Target};

/// Listener function signature: binding context, then the event.
pub type ListenerFn = dyn Fn(&Target, &Event) -> Result<(), ListenerError> + Send + Sync;

/// Shared listener handle; identity is the shared allocation.
#[derive(Clone)]
pub struct Callback {
    func: Arc<ListenerFn>,
    receiver: Option<Weak<dyn Any + Send + Sync>>,
}

impl Callback {
    /// Creates a callback from a fallible closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Target, &Event) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(f),
            receiver: None,
        }
    }

    /// Creates a callback from a closure that cannot fail.
    pub fn infallible<F>(f: F) -> Self
    where
        F: Fn(&Target, &Event) + Send + Sync + 'static,
    {
        Self::new(move |ctx, ev| {
            f(ctx, ev);
            Ok(())
        })
    }

    /// Binds `method` to a weakly held `receiver`.
    pub fn method<T>(
        receiver: &Arc<T>,
        method: fn(&T, &Target, &Event) -> Result<(), ListenerError>,
    ) -> Self
    where
        T: Any + Send + Sync,
    {
        let weak = Arc::downgrade(receiver);
        let erased: Weak<dyn Any + Send + Sync> = weak.clone();
        let func = move |ctx: &Target, ev: &Event| match weak.upgrade() {
            Some(this) => method(&this, ctx, ev),
            None => {
                debug!(category = %ev.category(), "receiver dropped; listener skipped");
                Ok(())
            }
        };
        Self {
            func: Arc::new(func),
            receiver: Some(erased),
        }
    }

    /// Returns `false` once a bound receiver has been dropped.
    pub fn is_invocable(&self) -> bool {
        self.receiver
            .as_ref()
            .is_none_or(|weak| weak.strong_count() > 0)
    }

    /// Identity comparison.
    #[inline]
    pub fn ptr_eq(&self, other: &Callback) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }

    #[inline]
    pub(crate) fn invoke(&self, context: &Target, event: &Event) -> Result<(), ListenerError> {
        (self.func)(context, event)
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Callback {}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("ptr", &Arc::as_ptr(&self.func).cast::<()>())
            .field("bound", &self.receiver.is_some())
            .finish()
    }
}
