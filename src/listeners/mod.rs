//! # Listeners: callbacks and the per-dispatcher registry.
//!
//! ## Contents
//! - [`Callback`] shared listener handle (identity = the handle)
//! - `Registry` ordered registrations per category (owned by a dispatcher)
//! - `LogWriter` ready-made logging listener (feature `logging`)

mod callback;
#[cfg(feature = "logging")]
mod log;
mod registry;

pub use callback::{Callback, ListenerFn};
#[cfg(feature = "logging")]
pub use log::LogWriter;
pub(crate) use registry::{Added, Registration, Registry};
