//! Dispatch core: per-object dispatchers and the process-wide hub.
//!
//! Internal modules:
//! - [`config`]: dispatcher settings and listener error policy;
//! - [`dispatcher`]: registration, removal, queries and the dispatch pass;
//! - [`hub`]: lazily created singleton wrapping one dispatcher.

mod config;
mod dispatcher;
mod hub;

pub use config::{DispatcherConfig, ErrorPolicy};
pub use dispatcher::{Delivery, Dispatcher};
pub use hub::Hub;
