//! Error types used by dispatchers, the broadcast hub and listeners.
//!
//! This module defines two main error enums:
//!
//! - [`DispatchError`] — errors raised by registration, hub construction and dispatch.
//! - [`ListenerError`] — errors returned (or panics caught) from listener callbacks.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.

use thiserror::Error;

use crate::events::Category;

/// # Errors produced by the dispatch machinery.
///
/// Registration errors are raised synchronously at the offending call and never
/// mutate the registry. Listener failures surface here only under
/// [`ErrorPolicy::Propagate`](crate::ErrorPolicy::Propagate).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The callback cannot be invoked (its bound receiver no longer exists).
    #[error("listener for {category} is not invocable")]
    InvalidListener {
        /// Category the registration was attempted for.
        category: Category,
    },

    /// The broadcast hub was constructed directly instead of through [`Hub::global`](crate::Hub::global).
    #[error("the broadcast hub is a singleton; use Hub::global()")]
    IllegalConstruction,

    /// A listener failed and aborted the dispatch pass.
    #[error("listener for {category} failed: {source}")]
    Listener {
        /// Category being dispatched.
        category: Category,
        /// The listener's error.
        #[source]
        source: ListenerError,
    },
}

impl DispatchError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventhub::DispatchError;
    ///
    /// assert_eq!(DispatchError::IllegalConstruction.as_label(), "hub_illegal_construction");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            DispatchError::InvalidListener { .. } => "dispatch_invalid_listener",
            DispatchError::IllegalConstruction => "hub_illegal_construction",
            DispatchError::Listener { .. } => "dispatch_listener_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            DispatchError::InvalidListener { category } => {
                format!("invalid listener: category={category}")
            }
            DispatchError::IllegalConstruction => "illegal hub construction".to_string(),
            DispatchError::Listener { category, source } => {
                format!("category={category} {}", source.as_message())
            }
        }
    }
}

/// # Errors produced by listener callbacks.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListenerError {
    /// Listener returned an error.
    #[error("listener failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Listener panicked; only produced under [`ErrorPolicy::Isolate`](crate::ErrorPolicy::Isolate).
    #[error("listener panicked: {info}")]
    Panicked {
        /// Panic payload rendered as text.
        info: String,
    },
}

impl ListenerError {
    /// Shorthand for [`ListenerError::Fail`].
    pub fn fail(error: impl Into<String>) -> Self {
        ListenerError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventhub::ListenerError;
    ///
    /// assert_eq!(ListenerError::fail("boom").as_label(), "listener_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ListenerError::Fail { .. } => "listener_failed",
            ListenerError::Panicked { .. } => "listener_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ListenerError::Fail { error } => format!("error: {error}"),
            ListenerError::Panicked { info } => format!("panic: {info}"),
        }
    }

    pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let info = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        ListenerError::Panicked { info }
    }
}
