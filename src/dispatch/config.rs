//! # Dispatcher configuration.
//!
//! Provides [`DispatcherConfig`] settings applied by one [`Dispatcher`](crate::Dispatcher)
//! and [`ErrorPolicy`], what a dispatch pass does when a listener fails.

use std::borrow::Cow;

/// What a dispatch pass does when a listener returns an error or panics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// The first failing listener aborts the pass; its error is returned to the
    /// caller as [`DispatchError::Listener`](crate::DispatchError::Listener).
    /// Panics unwind through `dispatch` unchanged.
    #[default]
    Propagate,

    /// Every snapshotted listener runs. Errors and panics are logged and collected
    /// in [`Delivery::failures`](crate::Delivery::failures).
    Isolate,
}

/// Configuration for a dispatcher.
///
/// ## Field semantics
/// - `label`: name attached to every log record of this dispatcher
/// - `error_policy`: listener failure handling (see [`ErrorPolicy`])
#[derive(Clone, Debug)]
pub struct DispatcherConfig {
    /// Diagnostic name.
    pub label: Cow<'static, str>,

    /// Listener failure handling.
    pub error_policy: ErrorPolicy,
}

impl DispatcherConfig {
    /// Default configuration with a custom label.
    pub fn labeled(label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Sets the error policy.
    #[inline]
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Returns `true` if listener failures are isolated instead of propagated.
    #[inline]
    pub fn isolates_failures(&self) -> bool {
        self.error_policy == ErrorPolicy::Isolate
    }
}

impl Default for DispatcherConfig {
    /// Default configuration:
    ///
    /// - `label = "dispatcher"`
    /// - `error_policy = ErrorPolicy::Propagate` (fail fast)
    fn default() -> Self {
        Self {
            label: Cow::Borrowed("dispatcher"),
            error_policy: ErrorPolicy::Propagate,
        }
    }
}
