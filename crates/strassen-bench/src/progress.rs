//! Cancellation and progress reporting for benchmark runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::BenchError;
use crate::record::BenchRecord;

/// Cooperative cancellation flag shared between the harness and a signal
/// handler.
///
/// # Example
/// ```
/// use strassen_bench::CancellationToken;
///
/// let token = CancellationToken::new();
/// let handle = token.clone();
/// handle.cancel();
/// assert!(token.is_cancelled());
/// assert!(token.check().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Checkpoint: `Err(BenchError::Cancelled)` once cancellation was requested.
    pub fn check(&self) -> Result<(), BenchError> {
        if self.is_cancelled() {
            Err(BenchError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Receives progress events from [`run_benchmark`](crate::run_benchmark).
pub trait BenchObserver {
    /// A new matrix size is about to be benchmarked.
    fn on_size_start(&self, _n: usize, _repeats: u32) {}

    /// One strategy finished one repetition.
    fn on_record(&self, record: &BenchRecord);
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl NoOpObserver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl BenchObserver for NoOpObserver {
    fn on_record(&self, _record: &BenchRecord) {}
}
