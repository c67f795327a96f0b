//! # eventhub
//!
//! **eventhub** is a synchronous publish/subscribe primitive for Rust.
//!
//! Components register callbacks against event [`Category`]s on a [`Dispatcher`];
//! other code dispatches [`Event`]s that invoke every matching callback, in priority
//! order, on the caller's thread. A process-wide [`Hub`] wraps one shared dispatcher
//! so components can broadcast without holding references to each other.
//!
//! ## Architecture
//! ```text
//!   producer                               consumers
//!   ────────                               ─────────
//!   Event::new(cat)                        add_listener(cat, cb, ctx, prio)
//!        │                                 add_once_listener(..)
//!        ▼                                        │
//! ┌──────────────────────────────────────────────▼──────────────┐
//! │ Dispatcher                                                  │
//! │  Registry: Category ─► [Registration; priority desc, FIFO]  │
//! │  dispatch(&event):                                          │
//! │    origin ◄─ proxy | self (only if unset)                   │
//! │    snapshot ─► cb(ctx | self, &event) ─► cb ─► ...          │
//! └──────────────────────────────────────────────▲──────────────┘
//!                                                │ same mechanism
//! ┌──────────────────────────────────────────────┴──────────────┐
//! │ Hub (lazy singleton)                                        │
//! │  register / register_once / unregister                      │
//! │  send(&event, Some(origin)) ─► origin overwritten ─► dispatch│
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Features
//! | Area            | Description                                                    | Key types                              |
//! |-----------------|----------------------------------------------------------------|----------------------------------------|
//! | **Events**      | Opaque categories, payloads, once-resolved origins.            | [`Category`], [`Event`], [`Target`]    |
//! | **Listeners**   | Shared callbacks with handle identity; weakly bound methods.   | [`Callback`]                           |
//! | **Dispatch**    | Priority-ordered, snapshot-based, re-entrant synchronous fan-out. | [`Dispatcher`], [`Delivery`]        |
//! | **Broadcast**   | Process-wide hub with explicit sender origin.                  | [`Hub`]                                |
//! | **Errors**      | Typed registration and listener errors, configurable policy.  | [`DispatchError`], [`ErrorPolicy`]     |
//! | **Configuration** | Per-dispatcher label and error policy.                       | [`DispatcherConfig`]                   |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in `LogWriter` listener _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use eventhub::{Callback, Category, Dispatcher, Event};
//!
//! let dispatcher = Dispatcher::new();
//! let calls = Arc::new(AtomicUsize::new(0));
//!
//! let c = calls.clone();
//! let on_open = Callback::infallible(move |_ctx, ev| {
//!     assert_eq!(ev.category(), Category::OPEN);
//!     c.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! dispatcher.add_listener(Category::OPEN, &on_open, None, 0)?;
//!
//! let ev = Event::new(Category::OPEN);
//! dispatcher.dispatch(&ev)?;
//! assert!(ev.origin().unwrap().is_dispatcher(&dispatcher));
//! assert_eq!(calls.load(Ordering::SeqCst), 1);
//!
//! dispatcher.remove_listener(Category::OPEN, &on_open);
//! assert!(!dispatcher.has_listener(Category::OPEN));
//! # Ok::<(), eventhub::DispatchError>(())
//! ```

mod dispatch;
mod error;
mod events;
mod listeners;

// ---- Public re-exports ----

pub use dispatch::{Delivery, Dispatcher, DispatcherConfig, ErrorPolicy, Hub};
pub use error::{DispatchError, ListenerError};
pub use events::{Category, Event, Object, Target};
pub use listeners::{Callback, ListenerFn};

// Optional: expose a simple built-in logging listener (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use listeners::LogWriter;
