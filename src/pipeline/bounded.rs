//! Bounded execution of blocking, non-cooperative calls.
//!
//! ## Why abandon instead of cancel?
//!
//! pdfium and tesseract are native code with no cancellation hooks: once a
//! call starts, nothing short of killing the process stops it. The portable
//! alternative to a signal-based alarm is to run the call on a blocking-pool
//! worker and simply stop waiting at the deadline. The worker finishes (or
//! wedges) on its own time and its result is discarded; the pipeline moves on
//! to the next strategy with a `TimedOut` in hand. This leaks one pool thread
//! for the duration of the stuck call, which is an acceptable trade for a
//! sequential, page-at-a-time pipeline.

use std::time::Duration;
use tokio::task::spawn_blocking;
use tokio::time::timeout;

/// Outcome of a bounded blocking call.
#[derive(Debug)]
pub enum BoundedCall<T> {
    /// The call finished within the budget.
    Completed(T),
    /// The budget expired; the worker was abandoned, not joined.
    TimedOut,
    /// The call panicked on the worker thread.
    Panicked(String),
}

impl<T> BoundedCall<T> {
    /// True when the budget expired.
    pub fn timed_out(&self) -> bool {
        matches!(self, BoundedCall::TimedOut)
    }
}

/// Run `op` on a blocking-pool worker, waiting at most `budget`.
///
/// On expiry the `JoinHandle` is dropped — the worker keeps running to
/// completion in the background but nothing observes it.
pub async fn run_bounded<T, F>(budget: Duration, op: F) -> BoundedCall<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let handle = spawn_blocking(op);
    match timeout(budget, handle).await {
        Ok(Ok(value)) => BoundedCall::Completed(value),
        Ok(Err(join_err)) => BoundedCall::Panicked(join_err.to_string()),
        Err(_elapsed) => BoundedCall::TimedOut,
    }
}
