//! The outbound queue seam and an in-memory implementation.

use std::{
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::{envelope::Envelope, error::QueueError};

/// Trait for enqueuing messages for later relay.
///
/// The actual relay machinery (retry schedules, MX resolution, dial
/// out) lives behind this seam; this layer only ever enqueues.
#[async_trait]
pub trait Queue: Send + Sync + fmt::Debug {
    /// Enqueue a message for store-and-forward relay.
    ///
    /// # Errors
    ///
    /// Returns a [`QueueError`] if the message cannot be queued.
    async fn enqueue(&self, envelope: Envelope) -> Result<(), QueueError>;
}

/// In-memory queue implementation.
///
/// Stores envelopes in a `Vec` behind an `RwLock`. Primarily intended
/// for tests and transient setups; a deployment queue would persist to
/// disk behind the same trait.
///
/// # Capacity Management
///
/// The queue can be bounded to keep a misbehaving authenticated sender
/// from exhausting memory. When the bound is reached, enqueues fail
/// with [`QueueError::CapacityExceeded`].
#[derive(Debug, Clone, Default)]
pub struct MemoryQueue {
    messages: Arc<RwLock<Vec<Envelope>>>,
    notify: Arc<Notify>,
    capacity: Option<usize>,
}

impl MemoryQueue {
    /// Create a new unbounded in-memory queue
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new in-memory queue holding at most `capacity` messages
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    /// The number of queued messages.
    ///
    /// Recovers gracefully if the lock is poisoned by accessing the
    /// underlying data.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the queue is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all queued messages
    #[must_use]
    pub fn messages(&self) -> Vec<Envelope> {
        self.messages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Wait until at least `expected` messages have been enqueued.
    ///
    /// Useful in tests to make sure enqueue operations complete before
    /// assertions.
    ///
    /// # Errors
    ///
    /// Returns a [`QueueError::Storage`] if `timeout` elapses first.
    pub async fn wait_for_count(
        &self,
        expected: usize,
        timeout: std::time::Duration,
    ) -> Result<(), QueueError> {
        tokio::time::timeout(timeout, async {
            loop {
                if self.len() >= expected {
                    return;
                }
                self.notify.notified().await;
            }
        })
        .await
        .map_err(|_| QueueError::Storage(format!("timed out waiting for {expected} messages")))
    }
}

#[async_trait]
impl Queue for MemoryQueue {
    async fn enqueue(&self, envelope: Envelope) -> Result<(), QueueError> {
        let mut messages = self
            .messages
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(capacity) = self.capacity
            && messages.len() >= capacity
        {
            return Err(QueueError::CapacityExceeded(messages.len()));
        }

        messages.push(envelope);
        drop(messages);
        self.notify.notify_waiters();

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use postern_common::Address;

    use super::*;

    fn envelope() -> Envelope {
        Envelope::new(
            Address::new("alice", "local.example"),
            vec![Address::new("bob", "remote.example")],
            b"Subject: hi\r\n\r\nhello\r\n".to_vec(),
        )
    }

    #[tokio::test]
    async fn test_enqueue_and_snapshot() {
        let queue = MemoryQueue::new();
        assert!(queue.is_empty());

        queue.enqueue(envelope()).await.unwrap();

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.messages()[0].sender().local(), "alice");
    }

    #[tokio::test]
    async fn test_capacity_exceeded() {
        let queue = MemoryQueue::with_capacity(1);
        queue.enqueue(envelope()).await.unwrap();

        let err = queue.enqueue(envelope()).await.unwrap_err();
        assert!(matches!(err, QueueError::CapacityExceeded(1)));
        assert_eq!(queue.len(), 1);
    }
}
