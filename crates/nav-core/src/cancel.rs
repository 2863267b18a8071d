//! Cooperative cancellation for traversals.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::NavError;

/// Shared flag checked by the walker between node visits.
///
/// Clones share the same flag, so one clone can be handed to a traversal
/// while another is kept to cancel it (e.g. when a request deadline expires).
/// A cancelled traversal fails with [`NavError::Cancelled`] and returns no
/// partial result.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Fail with [`NavError::Cancelled`] if cancellation was requested.
    pub(crate) fn check(&self) -> Result<(), NavError> {
        if self.is_cancelled() {
            return Err(NavError::Cancelled);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_not_cancelled() {
        let token = CancelToken::new();

        assert!(!token.is_cancelled());
        assert!(token.check().is_ok());
    }

    #[test]
    fn test_cancel_is_shared_between_clones() {
        let token = CancelToken::new();
        let worker = token.clone();

        token.cancel();

        assert!(worker.is_cancelled());
        assert!(matches!(worker.check(), Err(NavError::Cancelled)));
    }
}
