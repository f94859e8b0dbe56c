//! Cooperative cancellation for catalog reads.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use bouquet_core::{DomainError, DomainResult};

/// Cloneable cancellation flag shared between a caller and a running plan.
///
/// Cancelling is sticky: once set, every clone reports it and every guarded
/// call fails with `DomainError::Cancelled` without being polled.
#[derive(Debug, Clone)]
pub struct CancelToken {
    sender: Arc<watch::Sender<bool>>,
    receiver: watch::Receiver<bool>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
            receiver,
        }
    }

    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolves once the token is cancelled.
    pub async fn cancelled(&self) {
        let mut receiver = self.receiver.clone();
        // The sender lives as long as `self`, so `wait_for` cannot fail here.
        let _ = receiver.wait_for(|cancelled| *cancelled).await;
    }

    /// Run `operation` unless the token is (or becomes) cancelled first.
    ///
    /// A cancelled token short-circuits before the future is polled; a
    /// cancellation arriving mid-flight drops the future.
    pub async fn guard<T, F>(&self, operation: F) -> DomainResult<T>
    where
        F: Future<Output = DomainResult<T>>,
    {
        if self.is_cancelled() {
            return Err(DomainError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = self.cancelled() => Err(DomainError::Cancelled),
            result = operation => result,
        }
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
