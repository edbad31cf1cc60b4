//! Progress reporting for batch address processing.
//!
//! [`ProgressCallback`] decouples batch loops from any rendering backend.
//! `maptools_cli_utils` provides an `indicatif` implementation; tests and
//! library callers can use [`NullProgress`].

use std::sync::Arc;

/// Receives progress updates from a batch.
///
/// Implementations must be `Send + Sync` so one callback can be shared
/// across tasks.
pub trait ProgressCallback: Send + Sync {
    /// Set the total expected number of rows.
    fn set_total(&self, total: u64);

    /// Advance progress by `delta` rows.
    fn inc(&self, delta: u64);

    /// Mark progress as complete with a final message.
    fn finish(&self, msg: String);
}

/// A [`ProgressCallback`] that ignores every update.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn set_total(&self, _total: u64) {}
    fn inc(&self, _delta: u64) {}
    fn finish(&self, _msg: String) {}
}

/// Returns a shared [`NullProgress`].
#[must_use]
pub fn null_progress() -> Arc<dyn ProgressCallback> {
    Arc::new(NullProgress)
}
