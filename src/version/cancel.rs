//! Cancellation signal shared by concurrent checks

use tokio::sync::watch;

/// Sending half; cancels every clone of the paired [`CancelSignal`]
#[derive(Debug)]
pub struct CancelHandle(watch::Sender<bool>);

/// Receiving half, cheap to clone into each check
#[derive(Debug, Clone)]
pub struct CancelSignal(watch::Receiver<bool>);

/// Create a connected handle/signal pair
pub fn cancel_pair() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle(tx), CancelSignal(rx))
}

impl CancelHandle {
    pub fn cancel(&self) {
        // Fails only when no signal is alive, in which case nobody is waiting.
        let _ = self.0.send(true);
    }
}

impl CancelSignal {
    pub fn is_cancelled(&self) -> bool {
        *self.0.borrow()
    }

    /// Completes once cancellation is requested
    ///
    /// Never completes if the handle is dropped without cancelling.
    pub async fn cancelled(mut self) {
        if self.0.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn cancelled_completes_after_cancel() {
        let (handle, signal) = cancel_pair();
        let waiter = tokio::spawn(signal.clone().cancelled());

        handle.cancel();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
        assert!(signal.is_cancelled());
    }

    #[tokio::test]
    async fn cancelled_stays_pending_when_handle_is_dropped() {
        let (handle, signal) = cancel_pair();
        drop(handle);

        let result = tokio::time::timeout(Duration::from_millis(20), signal.cancelled()).await;

        assert!(result.is_err());
    }
}
