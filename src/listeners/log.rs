//! # LogWriter — simple event logger
//!
//! A ready-made listener that writes every event it receives to the `tracing`
//! facade at `info` level. Use it for tests or demos; install a subscriber
//! (e.g. `tracing-subscriber`) to see the output.
//!
//! ## Example output
//! ```text
//! [open] origin=dispatcher event=Event(category=OPEN, payload=None)
//! [complete] origin=object event=Event(category=COMPLETE, payload="10KB")
//! ```

use tracing::info;

use crate::dispatch::Dispatcher;
use crate::error::DispatchError;
use crate::events::{Category, Event, Target};

use super::Callback;

/// Event writer listener.
///
/// Keeps one [`Callback`] so the same writer can be attached to and detached from
/// any number of categories.
#[derive(Clone, Debug)]
pub struct LogWriter {
    callback: Callback,
}

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            callback: Callback::infallible(write),
        }
    }

    /// The underlying callback, for manual registration.
    pub fn callback(&self) -> &Callback {
        &self.callback
    }

    /// Registers this writer for `category` at the lowest priority, so it logs
    /// after every other listener.
    ///
    /// # Errors
    /// Propagates [`Dispatcher::add_listener`] errors.
    pub fn attach(&self, dispatcher: &Dispatcher, category: Category) -> Result<(), DispatchError> {
        dispatcher.add_listener(category, &self.callback, None, i32::MIN)
    }

    /// Unregisters this writer from `category`.
    pub fn detach(&self, dispatcher: &Dispatcher, category: Category) -> bool {
        dispatcher.remove_listener(category, &self.callback)
    }
}

impl Default for LogWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn write(_ctx: &Target, e: &Event) {
    let origin = match e.origin() {
        Some(Target::Dispatcher(d)) => d.label().to_string(),
        Some(Target::Object(_)) => "object".to_string(),
        None => "none".to_string(),
    };
    info!(
        "[{}] origin={} event={}",
        e.category().name().to_ascii_lowercase(),
        origin,
        e
    );
}
