//! Cooperative cancellation

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{FilterError, Result};

/// Shared cancellation flag with an optional deadline
///
/// Clones share the flag. Filters poll the token between sheets, between
/// rows of cells, and between batches of fitting steps.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop once `deadline` has passed
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Stop once `timeout` has elapsed from now
    ///
    /// A timeout too large to represent means no deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Instant::now().checked_add(timeout);
        self
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// True when work should stop
    pub fn should_stop(&self) -> bool {
        self.is_cancelled() || self.is_expired()
    }

    /// `Err` when work should stop
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(FilterError::Cancelled)
        } else if self.is_expired() {
            Err(FilterError::DeadlineExceeded)
        } else {
            Ok(())
        }
    }

    /// The error describing why work stopped
    pub(crate) fn stop_error(&self) -> FilterError {
        match self.check() {
            Err(e) => e,
            Ok(()) => FilterError::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_shared_between_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(token.check().is_ok());

        clone.cancel();
        assert!(token.is_cancelled());
        assert!(matches!(token.check(), Err(FilterError::Cancelled)));
    }

    #[test]
    fn test_past_deadline() {
        let token = CancelToken::new().with_deadline(Instant::now());
        assert!(token.is_expired());
        assert!(matches!(token.check(), Err(FilterError::DeadlineExceeded)));
        assert!(token.should_stop());
    }

    #[test]
    fn test_far_deadline() {
        let token = CancelToken::new().with_timeout(Duration::from_secs(3600));
        assert!(!token.should_stop());
        assert!(token.deadline().is_some());
    }
}
