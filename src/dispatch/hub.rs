//! # Broadcast hub - the process-wide dispatcher.
//!
//! [`Hub`] wraps a single [`Dispatcher`] created on first access and kept for the
//! rest of the process. Components that never see each other meet here: one side
//! registers by category, the other sends with itself as origin.
//!
//! ## Architecture
//! ```text
//! component A                         component B
//!   Hub::register(CHANGE, cbA, ..)      Hub::send(&Event::new(CHANGE), Some(b))
//!            │                                   │ origin := b (overwrites)
//!            ▼                                   ▼
//!        ┌─────────────────── HUB (Lazy) ──────────────────┐
//!        │            Dispatcher { label: "hub" }          │
//!        └────────────────────────┬────────────────────────┘
//!                                 ▼
//!                           cbA(ctx, &event)   event.origin() is b
//! ```
//!
//! ## Rules
//! - Exactly one hub exists; [`Hub::new`] always fails with
//!   [`DispatchError::IllegalConstruction`].
//! - No teardown: listeners stay registered until unregistered.
//! - Use private categories ([`Category::new`]) to keep unrelated subsystems apart.
//!
//! ## Example
//! ```rust
//! use eventhub::{Callback, Category, Event, Hub, Target};
//!
//! let ready = Category::new("READY");
//! let cb = Callback::infallible(|_, ev| {
//!     assert_eq!(ev.origin().unwrap().downcast_ref::<&str>(), Some(&"component-b"));
//! });
//!
//! Hub::register(ready, &cb, None, 0).unwrap();
//! let delivery = Hub::send(&Event::new(ready), Some(Target::object("component-b"))).unwrap();
//! assert_eq!(delivery.invoked, 1);
//! assert!(Hub::unregister(ready, &cb));
//! ```

use once_cell::sync::Lazy;
use tracing::debug;

use crate::error::DispatchError;
use crate::events::{Category, Event, Target};
use crate::listeners::Callback;

use super::config::DispatcherConfig;
use super::dispatcher::{Delivery, Dispatcher};

static HUB: Lazy<Hub> = Lazy::new(|| {
    debug!("broadcast hub initialized");
    Hub {
        dispatcher: Dispatcher::with_config(DispatcherConfig::labeled("hub")),
    }
});

/// Process-wide broadcast hub.
#[derive(Debug)]
pub struct Hub {
    dispatcher: Dispatcher,
}

impl Hub {
    /// Direct construction is not allowed; use [`Hub::global`].
    ///
    /// # Errors
    /// Always returns [`DispatchError::IllegalConstruction`].
    ///
    /// ```
    /// use eventhub::{DispatchError, Hub};
    ///
    /// assert!(matches!(Hub::new(), Err(DispatchError::IllegalConstruction)));
    /// ```
    pub fn new() -> Result<Self, DispatchError> {
        Err(DispatchError::IllegalConstruction)
    }

    /// Returns the singleton, creating it on first access.
    #[inline]
    pub fn global() -> &'static Hub {
        &HUB
    }

    /// The shared dispatcher.
    #[inline]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Registers `callback` on the shared dispatcher.
    ///
    /// # Errors
    /// [`DispatchError::InvalidListener`] if the callback is not invocable.
    pub fn register(
        category: Category,
        callback: &Callback,
        context: Option<Target>,
        priority: i32,
    ) -> Result<(), DispatchError> {
        Self::global()
            .dispatcher
            .add_listener(category, callback, context, priority)
    }

    /// Registers a one-shot `callback` on the shared dispatcher.
    ///
    /// # Errors
    /// [`DispatchError::InvalidListener`] if the callback is not invocable.
    pub fn register_once(
        category: Category,
        callback: &Callback,
        context: Option<Target>,
        priority: i32,
    ) -> Result<(), DispatchError> {
        Self::global()
            .dispatcher
            .add_once_listener(category, callback, context, priority)
    }

    /// Removes `callback` from the shared dispatcher. Returns `false` if absent.
    pub fn unregister(category: Category, callback: &Callback) -> bool {
        Self::global().dispatcher.remove_listener(category, callback)
    }

    /// Returns `true` if the shared dispatcher has a listener for `category`.
    pub fn has_listener(category: Category) -> bool {
        Self::global().dispatcher.has_listener(category)
    }

    /// Dispatches `event` through the shared dispatcher.
    ///
    /// With `Some(origin)` the event's origin is overwritten first, even if it was
    /// already set. With `None` the usual rule applies: an unset origin becomes the
    /// hub's dispatcher.
    ///
    /// # Errors
    /// Same as [`Dispatcher::dispatch`].
    pub fn send(event: &Event, origin: Option<Target>) -> Result<Delivery, DispatchError> {
        if let Some(origin) = origin {
            event.force_origin(origin);
        }
        Self::global().dispatcher.dispatch(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn direct_construction_is_rejected() {
        let err = Hub::new().unwrap_err();
        assert!(matches!(err, DispatchError::IllegalConstruction));
        assert_eq!(err.as_label(), "hub_illegal_construction");
    }

    #[test]
    fn global_is_a_singleton() {
        assert!(std::ptr::eq(Hub::global(), Hub::global()));
        assert!(Hub::global().dispatcher().ptr_eq(Hub::global().dispatcher()));
        assert_eq!(Hub::global().dispatcher().label(), "hub");
    }

    #[test]
    fn send_overrides_existing_origin() {
        let change = Category::new("CHANGE");
        let receiver = Arc::new("component-b");
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let r = receiver.clone();
        let cb = Callback::infallible(move |_, ev| {
            assert!(ev.origin().unwrap().is_object(&r));
            h.fetch_add(1, Ordering::SeqCst);
        });
        Hub::register(change, &cb, None, 0).unwrap();

        let ev = Event::new(change);
        ev.force_origin(Target::object("stale"));
        Hub::send(&ev, Some(Target::from_arc(receiver.clone()))).unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(ev.origin().unwrap().is_object(&receiver));
        assert!(Hub::unregister(change, &cb));
        assert!(!Hub::has_listener(change));
    }

    #[test]
    fn send_without_override_reports_hub() {
        let ping = Category::new("PING");
        let cb = Callback::infallible(|_, _| {});
        Hub::register(ping, &cb, None, 0).unwrap();

        let ev = Event::new(ping);
        Hub::send(&ev, None).unwrap();
        assert!(ev.origin().unwrap().is_dispatcher(Hub::global().dispatcher()));
        Hub::unregister(ping, &cb);
    }

    #[test]
    fn send_to_unregistered_category_is_noop() {
        let nobody = Category::new("NOBODY");
        let ev = Event::new(nobody);
        let delivery = Hub::send(&ev, None).unwrap();
        assert_eq!(delivery.invoked, 0);
        assert!(ev.origin().is_none());
        assert!(!Hub::unregister(nobody, &Callback::infallible(|_, _| {})));
    }

    #[test]
    fn register_once_fires_once() {
        let tick = Category::new("TICK");
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let cb = Callback::infallible(move |_, _| {
            h.fetch_add(1, Ordering::SeqCst);
        });
        Hub::register_once(tick, &cb, None, 0).unwrap();

        Hub::send(&Event::new(tick), None).unwrap();
        Hub::send(&Event::new(tick), None).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(!Hub::has_listener(tick));
    }
}
