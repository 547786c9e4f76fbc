//! Progress notification port
//!
//! Lets the presentation layer show a loading indicator for the span of an
//! exchange without polling the session.

use mog_domain::Mode;

/// Callback for exchange progress
///
/// Implementations live in the presentation layer. Calls happen in order
/// start → (complete | failed) for every exchange that passed the submit guard.
pub trait ExchangeProgress: Send + Sync {
    /// Called after the user message is appended and loading is set.
    fn on_exchange_start(&self, mode: Mode);

    /// Called after the replies are appended and loading is cleared.
    fn on_exchange_complete(&self, appended: usize);

    /// Called after the fallback is appended and loading is cleared.
    fn on_exchange_failed(&self, _reason: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ExchangeProgress for NoProgress {
    fn on_exchange_start(&self, _mode: Mode) {}
    fn on_exchange_complete(&self, _appended: usize) {}
}
