//! # Dispatcher - listener registry plus synchronous fan-out.
//!
//! [`Dispatcher`] owns a [`Registry`] of listeners per [`Category`] and invokes them
//! in priority order when an [`Event`] of that category is dispatched.
//!
//! ## Dispatch pass
//! ```text
//! dispatch(&event)
//!   ├─► drop registrations whose bound receiver is gone
//!   ├─► no listeners for event.category ─► return (no side effect)
//!   ├─► origin unset? ─► origin = proxy (if alive) or this dispatcher
//!   ├─► snapshot = copy of the ordered list        (lock held only here)
//!   └─► for reg in snapshot:
//!         ├─ receiver gone? ─► remove from live registry, skip
//!         ├─ one-shot? ─► claim + remove from live registry first
//!         ├─ context  = reg.context or this dispatcher
//!         └─ callback(context, event)
//!              └─ Err ─► ErrorPolicy::Propagate: abort pass, return Err
//!                        ErrorPolicy::Isolate:   log, collect, continue
//! ```
//!
//! ## Rules
//! - Listeners may add/remove listeners or dispatch again (re-entrant); the current
//!   pass keeps its snapshot, the changes apply to later passes.
//! - A one-shot listener runs at most once, even across nested passes.
//! - The registry lock is never held while a callback runs.
//! - Unbounded re-entrant dispatch recurses without limit; listeners must not
//!   re-dispatch unconditionally.
//!
//! ## Composition
//! A facade that owns a dispatcher can report itself as origin:
//! ```rust
//! use std::sync::Arc;
//! use eventhub::{Category, Dispatcher, Event};
//!
//! struct Loader {
//!     events: Dispatcher,
//! }
//!
//! let loader = Arc::new_cyclic(|me| Loader {
//!     events: Dispatcher::with_origin(me.clone()),
//! });
//!
//! let cb = eventhub::Callback::infallible(|_, _| {});
//! loader.events.add_listener(Category::COMPLETE, &cb, None, 0).unwrap();
//!
//! let ev = Event::new(Category::COMPLETE);
//! loader.events.dispatch(&ev).unwrap();
//! assert!(ev.origin().unwrap().is_object(&loader));
//! ```

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::error::{DispatchError, ListenerError};
use crate::events::{Category, Event, Target};
use crate::listeners::{Added, Callback, Registration, Registry};

use super::config::{DispatcherConfig, ErrorPolicy};

/// Outcome of a dispatch pass that did not abort.
#[derive(Debug, Default)]
pub struct Delivery {
    /// Number of listeners invoked.
    pub invoked: usize,
    /// Failures collected under [`ErrorPolicy::Isolate`]; always empty otherwise.
    pub failures: Vec<ListenerError>,
}

impl Delivery {
    /// Returns `true` if no listener failed.
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

struct Inner {
    registry: Mutex<Registry>,
    origin: Option<Weak<dyn Any + Send + Sync>>,
    config: DispatcherConfig,
}

/// Event dispatcher.
///
/// Cheap to clone: clones are handles to the same registry and compare equal
/// under [`Dispatcher::ptr_eq`].
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<Inner>,
}

impl Dispatcher {
    /// Creates a dispatcher with default configuration that reports itself as origin.
    pub fn new() -> Self {
        Self::build(None, DispatcherConfig::default())
    }

    /// Creates a dispatcher with the given configuration.
    pub fn with_config(config: DispatcherConfig) -> Self {
        Self::build(None, config)
    }

    /// Creates a dispatcher that reports `proxy` as the origin of dispatched events.
    ///
    /// The proxy is held weakly; once it is dropped the dispatcher reports itself.
    /// Events already dispatched hold their origin strongly, so they keep the proxy
    /// alive for as long as they exist.
    pub fn with_origin<T: Any + Send + Sync>(proxy: Weak<T>) -> Self {
        Self::with_origin_and_config(proxy, DispatcherConfig::default())
    }

    /// [`Dispatcher::with_origin`] with an explicit configuration.
    pub fn with_origin_and_config<T: Any + Send + Sync>(
        proxy: Weak<T>,
        config: DispatcherConfig,
    ) -> Self {
        let proxy: Weak<dyn Any + Send + Sync> = proxy;
        Self::build(Some(proxy), config)
    }

    fn build(origin: Option<Weak<dyn Any + Send + Sync>>, config: DispatcherConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                registry: Mutex::new(Registry::default()),
                origin,
                config,
            }),
        }
    }

    /// Label used in log records.
    #[inline]
    pub fn label(&self) -> &str {
        &self.inner.config.label
    }

    /// Configuration this dispatcher was built with.
    #[inline]
    pub fn config(&self) -> &DispatcherConfig {
        &self.inner.config
    }

    /// Identity comparison.
    #[inline]
    pub fn ptr_eq(&self, other: &Dispatcher) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Registers `callback` for `category`.
    ///
    /// - `context`: passed to the callback; `None` means this dispatcher.
    /// - `priority`: higher runs first; equal priorities run in registration order.
    ///
    /// Re-registering the same callback updates only its priority (when different).
    ///
    /// # Errors
    /// [`DispatchError::InvalidListener`] if the callback is not invocable; the
    /// registry is left untouched.
    pub fn add_listener(
        &self,
        category: Category,
        callback: &Callback,
        context: Option<Target>,
        priority: i32,
    ) -> Result<(), DispatchError> {
        self.register(category, callback, context, priority, false)
    }

    /// Like [`Dispatcher::add_listener`], but the registration is removed right
    /// before its first invocation.
    ///
    /// # Errors
    /// [`DispatchError::InvalidListener`] if the callback is not invocable.
    pub fn add_once_listener(
        &self,
        category: Category,
        callback: &Callback,
        context: Option<Target>,
        priority: i32,
    ) -> Result<(), DispatchError> {
        self.register(category, callback, context, priority, true)
    }

    fn register(
        &self,
        category: Category,
        callback: &Callback,
        context: Option<Target>,
        priority: i32,
        once: bool,
    ) -> Result<(), DispatchError> {
        if !callback.is_invocable() {
            return Err(DispatchError::InvalidListener { category });
        }
        let added = self
            .inner
            .registry
            .lock()
            .add(category, callback, context, priority, once);

        match added {
            Added::Inserted => {
                trace!(dispatcher = %self.label(), %category, priority, once, "listener added");
            }
            Added::Reprioritized { from } => {
                trace!(dispatcher = %self.label(), %category, from, to = priority, "listener reprioritized");
            }
            Added::Unchanged => {
                trace!(dispatcher = %self.label(), %category, "listener already registered");
            }
        }
        Ok(())
    }

    /// Removes `callback` from `category`. Returns `false` if it was not registered.
    pub fn remove_listener(&self, category: Category, callback: &Callback) -> bool {
        let removed = self.inner.registry.lock().remove(category, callback);
        if removed {
            trace!(dispatcher = %self.label(), %category, "listener removed");
        }
        removed
    }

    /// Removes every registration of every category.
    pub fn remove_all_listeners(&self) {
        self.inner.registry.lock().clear();
        trace!(dispatcher = %self.label(), "all listeners removed");
    }

    /// Returns `true` if at least one listener is registered for `category`.
    pub fn has_listener(&self, category: Category) -> bool {
        let mut registry = self.inner.registry.lock();
        registry.prune(category);
        registry.contains(category)
    }

    /// Number of listeners registered for `category`.
    pub fn listener_count(&self, category: Category) -> usize {
        let mut registry = self.inner.registry.lock();
        registry.prune(category);
        registry.len(category)
    }

    /// Categories that currently have listeners (unordered).
    pub fn categories(&self) -> Vec<Category> {
        self.inner.registry.lock().categories()
    }

    /// Invokes every listener registered for the event's category.
    ///
    /// # Errors
    /// Under [`ErrorPolicy::Propagate`], the first listener error aborts the pass and
    /// is returned as [`DispatchError::Listener`].
    pub fn dispatch(&self, event: &Event) -> Result<Delivery, DispatchError> {
        let category = event.category();
        let snapshot = {
            let mut registry = self.inner.registry.lock();
            let pruned = registry.prune(category);
            if pruned > 0 {
                debug!(dispatcher = %self.label(), %category, pruned, "dropped listeners with dead receivers");
            }
            registry.snapshot(category)
        };
        let Some(snapshot) = snapshot else {
            debug!(dispatcher = %self.label(), %category, "no listeners; dispatch skipped");
            return Ok(Delivery::default());
        };

        event.resolve_origin(|| self.origin());
        trace!(dispatcher = %self.label(), %category, listeners = snapshot.len(), "dispatching");

        let this = Target::Dispatcher(self.clone());
        let mut delivery = Delivery::default();

        for reg in &snapshot {
            if !reg.callback.is_invocable() {
                self.inner.registry.lock().remove_exact(category, reg.seq());
                debug!(dispatcher = %self.label(), %category, "receiver dropped mid-pass; listener removed");
                continue;
            }
            if reg.is_once() {
                if !reg.claim() {
                    continue;
                }
                self.inner.registry.lock().remove_exact(category, reg.seq());
            }

            let context = reg.context.as_ref().unwrap_or(&this);
            delivery.invoked += 1;

            match self.inner.config.error_policy {
                ErrorPolicy::Propagate => {
                    reg.callback
                        .invoke(context, event)
                        .map_err(|source| DispatchError::Listener { category, source })?;
                }
                ErrorPolicy::Isolate => {
                    if let Err(err) = invoke_isolated(reg, context, event) {
                        warn!(
                            dispatcher = %self.label(),
                            %category,
                            error = %err,
                            label = err.as_label(),
                            "listener failed; continuing"
                        );
                        delivery.failures.push(err);
                    }
                }
            }
        }

        Ok(delivery)
    }

    /// Origin reported for events dispatched here.
    fn origin(&self) -> Target {
        match self.inner.origin.as_ref().map(Weak::upgrade) {
            Some(Some(proxy)) => Target::Object(proxy),
            Some(None) => {
                debug!(dispatcher = %self.label(), "origin proxy dropped; reporting dispatcher");
                Target::Dispatcher(self.clone())
            }
            None => Target::Dispatcher(self.clone()),
        }
    }
}

fn invoke_isolated(reg: &Registration, context: &Target, event: &Event) -> Result<(), ListenerError> {
    panic::catch_unwind(AssertUnwindSafe(|| reg.callback.invoke(context, event)))
        .unwrap_or_else(|payload| Err(ListenerError::from_panic(payload)))
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("label", &self.label())
            .field("categories", &self.categories().len())
            .field("proxy", &self.inner.origin.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    type Log = Arc<Mutex<Vec<&'static str>>>;

    fn recorder(log: &Log, name: &'static str) -> Callback {
        let log = log.clone();
        Callback::infallible(move |_, _| log.lock().push(name))
    }

    fn counter() -> (Callback, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let cb = Callback::infallible(move |_, _| {
            h.fetch_add(1, Ordering::SeqCst);
        });
        (cb, hits)
    }

    #[test]
    fn dispatch_sets_origin_to_dispatcher_and_invokes_once() {
        let d = Dispatcher::new();
        let seen = Arc::new(Mutex::new(None::<Target>));
        let s = seen.clone();
        let cb = Callback::infallible(move |_, ev| *s.lock() = ev.origin());

        d.add_listener(Category::OPEN, &cb, None, 0).unwrap();
        let ev = Event::new(Category::OPEN);
        let delivery = d.dispatch(&ev).unwrap();

        assert_eq!(delivery.invoked, 1);
        assert!(seen.lock().as_ref().unwrap().is_dispatcher(&d));
        assert!(ev.origin().unwrap().is_dispatcher(&d));

        assert!(d.remove_listener(Category::OPEN, &cb));
        assert!(!d.has_listener(Category::OPEN));
        assert_eq!(d.dispatch(&Event::new(Category::OPEN)).unwrap().invoked, 0);
    }

    #[test]
    fn dispatch_without_listeners_leaves_origin_unset() {
        let d = Dispatcher::new();
        let ev = Event::new(Category::CLOSE);
        assert_eq!(d.dispatch(&ev).unwrap().invoked, 0);
        assert!(ev.origin().is_none());
    }

    #[test]
    fn duplicate_registration_is_idempotent() {
        let d = Dispatcher::new();
        let (cb, hits) = counter();
        d.add_listener(Category::OPEN, &cb, None, 0).unwrap();
        d.add_listener(Category::OPEN, &cb, None, 0).unwrap();
        assert_eq!(d.listener_count(Category::OPEN), 1);

        d.dispatch(&Event::new(Category::OPEN)).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn equal_priority_runs_in_registration_order() {
        let d = Dispatcher::new();
        let log: Log = Arc::default();
        d.add_listener(Category::OPEN, &recorder(&log, "A"), None, 0).unwrap();
        d.add_listener(Category::OPEN, &recorder(&log, "B"), None, 0).unwrap();

        d.dispatch(&Event::new(Category::OPEN)).unwrap();
        assert_eq!(*log.lock(), vec!["A", "B"]);
    }

    #[test]
    fn raising_priority_moves_listener_first() {
        let d = Dispatcher::new();
        let log: Log = Arc::default();
        let a = recorder(&log, "A");
        let b = recorder(&log, "B");
        let c = recorder(&log, "C");
        d.add_listener(Category::COMPLETE, &a, None, 0).unwrap();
        d.add_listener(Category::COMPLETE, &b, None, 0).unwrap();
        d.add_listener(Category::COMPLETE, &c, None, 0).unwrap();
        d.add_listener(Category::COMPLETE, &c, None, 100).unwrap();

        d.dispatch(&Event::new(Category::COMPLETE)).unwrap();
        assert_eq!(*log.lock(), vec!["C", "A", "B"]);
    }

    #[test]
    fn once_listener_runs_exactly_once() {
        let d = Dispatcher::new();
        let (cb, hits) = counter();
        d.add_once_listener(Category::COMPLETE, &cb, Some(Target::object("ctx")), 0)
            .unwrap();

        d.dispatch(&Event::new(Category::COMPLETE)).unwrap();
        assert!(!d.has_listener(Category::COMPLETE));
        d.dispatch(&Event::new(Category::COMPLETE)).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn once_listener_is_removed_before_its_body_runs() {
        let d = Dispatcher::new();
        let present = Arc::new(Mutex::new(None));
        let p = present.clone();
        let cb = Callback::infallible(move |ctx, ev| {
            let d = ctx.as_dispatcher().expect("bound to dispatcher");
            *p.lock() = Some(d.has_listener(ev.category()));
        });

        d.add_once_listener(Category::OPEN, &cb, None, 0).unwrap();
        d.dispatch(&Event::new(Category::OPEN)).unwrap();
        assert_eq!(*present.lock(), Some(false));
    }

    #[test]
    fn once_listener_does_not_refire_in_nested_pass() {
        let d = Dispatcher::new();
        let (once, hits) = counter();
        let depth = Arc::new(AtomicUsize::new(0));
        let dd = depth.clone();
        let reentrant = Callback::infallible(move |ctx, ev| {
            if dd.fetch_add(1, Ordering::SeqCst) == 0 {
                ctx.as_dispatcher()
                    .unwrap()
                    .dispatch(&Event::new(ev.category()))
                    .unwrap();
            }
        });

        d.add_listener(Category::CHANGE, &reentrant, None, 10).unwrap();
        d.add_once_listener(Category::CHANGE, &once, None, 0).unwrap();
        d.dispatch(&Event::new(Category::CHANGE)).unwrap();

        assert_eq!(depth.load(Ordering::SeqCst), 2);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn removal_during_dispatch_applies_to_next_pass() {
        let d = Dispatcher::new();
        let (victim, hits) = counter();
        let v = victim.clone();
        let remover = Callback::infallible(move |ctx, ev| {
            ctx.as_dispatcher().unwrap().remove_listener(ev.category(), &v);
        });

        d.add_listener(Category::SELECT, &remover, None, 1).unwrap();
        d.add_listener(Category::SELECT, &victim, None, 0).unwrap();

        d.dispatch(&Event::new(Category::SELECT)).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        d.dispatch(&Event::new(Category::SELECT)).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn listener_added_during_dispatch_waits_for_next_pass() {
        let d = Dispatcher::new();
        let (late, hits) = counter();
        let l = late.clone();
        let adder = Callback::infallible(move |ctx, ev| {
            ctx.as_dispatcher()
                .unwrap()
                .add_listener(ev.category(), &l, None, 0)
                .unwrap();
        });

        d.add_listener(Category::ADDED, &adder, None, 0).unwrap();
        d.dispatch(&Event::new(Category::ADDED)).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        d.dispatch(&Event::new(Category::ADDED)).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn explicit_context_is_passed() {
        let d = Dispatcher::new();
        let ctx = Arc::new(7_u64);
        let seen = Arc::new(AtomicUsize::new(0));
        let s = seen.clone();
        let cb = Callback::infallible(move |ctx, _| {
            s.store(*ctx.downcast_ref::<u64>().unwrap() as usize, Ordering::SeqCst);
        });

        d.add_listener(Category::CONNECT, &cb, Some(Target::from_arc(ctx)), 0)
            .unwrap();
        d.dispatch(&Event::new(Category::CONNECT)).unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn redispatch_keeps_first_origin() {
        let first = Dispatcher::new();
        let second = Dispatcher::new();
        let (cb, _) = counter();
        first.add_listener(Category::CLEAR, &cb, None, 0).unwrap();
        second.add_listener(Category::CLEAR, &cb, None, 0).unwrap();

        let ev = Event::new(Category::CLEAR);
        first.dispatch(&ev).unwrap();
        second.dispatch(&ev).unwrap();
        assert!(ev.origin().unwrap().is_dispatcher(&first));
    }

    #[test]
    fn origin_proxy_falls_back_when_dropped() {
        let proxy = Arc::new("facade");
        let d = Dispatcher::with_origin(Arc::downgrade(&proxy));
        let (cb, _) = counter();
        d.add_listener(Category::OPEN, &cb, None, 0).unwrap();

        {
            // The dispatched event holds the proxy strongly until it goes away.
            let ev = Event::new(Category::OPEN);
            d.dispatch(&ev).unwrap();
            assert!(ev.origin().unwrap().is_object(&proxy));
        }

        drop(proxy);
        let ev = Event::new(Category::OPEN);
        d.dispatch(&ev).unwrap();
        assert!(ev.origin().unwrap().is_dispatcher(&d));
    }

    #[test]
    fn dead_method_receiver_is_rejected() {
        struct Owner;
        impl Owner {
            fn on_open(&self, _: &Target, _: &Event) -> Result<(), ListenerError> {
                Ok(())
            }
        }
        let owner = Arc::new(Owner);
        let cb = Callback::method(&owner, Owner::on_open);
        drop(owner);

        let d = Dispatcher::new();
        let err = d.add_listener(Category::OPEN, &cb, None, 0).unwrap_err();
        assert!(matches!(err, DispatchError::InvalidListener { category } if category == Category::OPEN));
        assert!(!d.has_listener(Category::OPEN));
        assert!(d.add_once_listener(Category::OPEN, &cb, None, 0).is_err());
        assert!(d.categories().is_empty());
    }

    #[test]
    fn dead_receiver_registration_is_dropped_at_dispatch() {
        struct Owner;
        impl Owner {
            fn on_open(&self, _: &Target, _: &Event) -> Result<(), ListenerError> {
                Ok(())
            }
        }
        let owner = Arc::new(Owner);
        let cb = Callback::method(&owner, Owner::on_open);

        let d = Dispatcher::new();
        d.add_listener(Category::OPEN, &cb, None, 0).unwrap();
        assert_eq!(d.listener_count(Category::OPEN), 1);
        drop(owner);

        let ev = Event::new(Category::OPEN);
        let delivery = d.dispatch(&ev).unwrap();
        assert_eq!(delivery.invoked, 0);
        assert!(ev.origin().is_none());
        assert!(!d.has_listener(Category::OPEN));
        assert_eq!(d.listener_count(Category::OPEN), 0);
        assert!(d.categories().is_empty());
    }

    #[test]
    fn has_listener_ignores_dead_receivers() {
        struct Owner;
        impl Owner {
            fn on_close(&self, _: &Target, _: &Event) -> Result<(), ListenerError> {
                Ok(())
            }
        }
        let owner = Arc::new(Owner);
        let d = Dispatcher::new();
        d.add_listener(Category::CLOSE, &Callback::method(&owner, Owner::on_close), None, 0)
            .unwrap();
        assert!(d.has_listener(Category::CLOSE));

        drop(owner);
        assert!(!d.has_listener(Category::CLOSE));
    }

    #[test]
    fn receiver_dropped_mid_pass_is_not_counted() {
        struct Owner {
            hits: AtomicUsize,
        }
        impl Owner {
            fn on_change(&self, _: &Target, _: &Event) -> Result<(), ListenerError> {
                self.hits.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }
        let owner = Arc::new(Owner {
            hits: AtomicUsize::new(0),
        });
        let bound = Callback::method(&owner, Owner::on_change);
        let slot = Arc::new(Mutex::new(Some(owner)));
        let s = slot.clone();
        let release = Callback::infallible(move |_, _| {
            s.lock().take();
        });

        let d = Dispatcher::new();
        d.add_listener(Category::CHANGE, &release, None, 10).unwrap();
        d.add_listener(Category::CHANGE, &bound, None, 0).unwrap();

        let delivery = d.dispatch(&Event::new(Category::CHANGE)).unwrap();
        assert_eq!(delivery.invoked, 1);
        assert_eq!(d.listener_count(Category::CHANGE), 1);
        assert!(slot.lock().is_none());
    }

    #[test]
    fn propagate_aborts_remaining_listeners() {
        let d = Dispatcher::new();
        let failing = Callback::new(|_, _| Err(ListenerError::fail("boom")));
        let (after, hits) = counter();
        d.add_listener(Category::CANCEL, &failing, None, 1).unwrap();
        d.add_listener(Category::CANCEL, &after, None, 0).unwrap();

        let err = d.dispatch(&Event::new(Category::CANCEL)).unwrap_err();
        match err {
            DispatchError::Listener { category, source } => {
                assert_eq!(category, Category::CANCEL);
                assert_eq!(source, ListenerError::fail("boom"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn isolate_runs_everyone_and_collects_failures() {
        let d = Dispatcher::with_config(
            DispatcherConfig::labeled("isolated").with_error_policy(ErrorPolicy::Isolate),
        );
        let failing = Callback::new(|_, _| Err(ListenerError::fail("boom")));
        let panicking = Callback::infallible(|_, _| panic!("kaboom"));
        let (after, hits) = counter();
        d.add_listener(Category::CANCEL, &failing, None, 2).unwrap();
        d.add_listener(Category::CANCEL, &panicking, None, 1).unwrap();
        d.add_listener(Category::CANCEL, &after, None, 0).unwrap();

        let delivery = d.dispatch(&Event::new(Category::CANCEL)).unwrap();
        assert_eq!(delivery.invoked, 3);
        assert!(!delivery.is_clean());
        assert_eq!(
            delivery.failures,
            vec![
                ListenerError::fail("boom"),
                ListenerError::Panicked {
                    info: "kaboom".into()
                }
            ]
        );
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(d.has_listener(Category::CANCEL));
    }

    #[test]
    fn remove_all_clears_every_category() {
        let d = Dispatcher::new();
        let (cb, hits) = counter();
        d.add_listener(Category::OPEN, &cb, None, 0).unwrap();
        d.add_listener(Category::CLOSE, &cb, None, 0).unwrap();
        d.remove_all_listeners();

        assert!(!d.has_listener(Category::OPEN));
        assert!(!d.has_listener(Category::CLOSE));
        d.dispatch(&Event::new(Category::OPEN)).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn clones_share_registry() {
        let d = Dispatcher::new();
        let handle = d.clone();
        let (cb, _) = counter();
        handle.add_listener(Category::SELECT_ALL, &cb, None, 0).unwrap();
        assert!(d.has_listener(Category::SELECT_ALL));
        assert!(d.ptr_eq(&handle));
        assert!(!d.ptr_eq(&Dispatcher::new()));
    }
}
