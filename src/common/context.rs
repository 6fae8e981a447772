//! Request-scoped context threaded through every operation
//!
//! The engine never enforces timeouts itself; it passes the context along and
//! data-client adapters consult it before and during their work.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::error::{StoreError, StoreResult};

/// Cancellation and deadline carrier for one request
///
/// Clones share the cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct Context {
    request_id: Option<String>,
    deadline: Option<Instant>,
    cancelled: Arc<AtomicBool>,
}

impl Context {
    /// Create a context without deadline
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a request identifier for adapters to correlate their work
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Set a deadline relative to now
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Cancel this context and every clone of it
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether the context was cancelled or its deadline has passed
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Fail with [`StoreError::Cancelled`] if the context is done
    pub fn check(&self) -> StoreResult<()> {
        if self.is_done() {
            Err(StoreError::Cancelled)
        } else {
            Ok(())
        }
    }
}
