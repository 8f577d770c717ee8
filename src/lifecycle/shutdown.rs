//! Shutdown coordination for the gateway.

use std::future::Future;
use std::time::Duration;
use tokio::sync::broadcast;

/// Coordinator for graceful shutdown.
///
/// Provides a broadcast channel that all long-running tasks can subscribe to.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal. Returns how many listeners were notified.
    pub fn trigger(&self) -> usize {
        self.tx.send(()).unwrap_or(0)
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// How a drain ended.
#[derive(Debug, PartialEq, Eq)]
pub enum DrainOutcome<T> {
    /// The task finished within the grace period.
    Completed(T),
    /// The grace period elapsed first.
    TimedOut,
}

/// Wait for `task` to finish, at most `grace`.
pub async fn drain<F, T>(task: F, grace: Duration) -> DrainOutcome<T>
where
    F: Future<Output = T>,
{
    match tokio::time::timeout(grace, task).await {
        Ok(output) => DrainOutcome::Completed(output),
        Err(_) => {
            tracing::warn!(grace_secs = grace.as_secs(), "Shutdown grace period elapsed");
            DrainOutcome::TimedOut
        }
    }
}
