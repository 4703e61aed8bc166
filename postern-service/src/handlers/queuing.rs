//! Store-and-forward fallback handler.

use std::sync::Arc;

use async_trait::async_trait;
use postern_common::Address;

use crate::{
    envelope::Envelope,
    error::ServiceError,
    handler::{DomainHandler, MessageAcceptor},
    queue::Queue,
};

/// Fallback handler for relaying to domains the service does not
/// serve directly.
///
/// Accepts any recipient unconditionally and defers the actual relay
/// to the queue. The anti-open-relay gate is not here: the delivery
/// validator only ever constructs this handler for a session that has
/// proven its identity, and the handler records that fact for the
/// audit trail.
#[derive(Debug, Clone)]
pub struct QueuingHandler {
    queue: Arc<dyn Queue>,
    authenticated: bool,
}

impl QueuingHandler {
    #[must_use]
    pub fn new(queue: Arc<dyn Queue>, authenticated: bool) -> Self {
        Self {
            queue,
            authenticated,
        }
    }

    /// Whether the session that triggered this handler was authenticated
    #[must_use]
    pub const fn authenticated(&self) -> bool {
        self.authenticated
    }
}

#[async_trait]
impl DomainHandler for QueuingHandler {
    async fn exists(&self, _recipient: &Address) -> Result<(), ServiceError> {
        // Store-and-forward accepts any recipient; deliverability is
        // the relay machinery's problem at dequeue time.
        Ok(())
    }

    fn acceptor(&self, _recipient: &Address) -> Box<dyn MessageAcceptor> {
        Box::new(QueueAcceptor {
            queue: Arc::clone(&self.queue),
            authenticated: self.authenticated,
        })
    }
}

#[derive(Debug)]
struct QueueAcceptor {
    queue: Arc<dyn Queue>,
    authenticated: bool,
}

#[async_trait]
impl MessageAcceptor for QueueAcceptor {
    async fn accept(self: Box<Self>, envelope: Envelope) -> Result<(), ServiceError> {
        tracing::debug!(
            sender = %envelope.sender(),
            recipients = envelope.recipients().len(),
            authenticated = self.authenticated,
            "queuing message for relay"
        );

        self.queue.enqueue(envelope).await?;

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use crate::queue::MemoryQueue;

    use super::*;

    #[tokio::test]
    async fn test_exists_accepts_any_recipient() {
        let handler = QueuingHandler::new(Arc::new(MemoryQueue::new()), true);

        let anywhere = Address::new("whoever", "nowhere.example");
        assert!(handler.exists(&anywhere).await.is_ok());
    }

    #[tokio::test]
    async fn test_acceptor_enqueues() {
        let queue = MemoryQueue::new();
        let handler = QueuingHandler::new(Arc::new(queue.clone()), true);

        let recipient = Address::new("whoever", "nowhere.example");
        let envelope = Envelope::new(
            Address::new("alice", "local.example"),
            vec![recipient.clone()],
            b"relay me".to_vec(),
        );

        handler
            .acceptor(&recipient)
            .accept(envelope.clone())
            .await
            .unwrap();

        assert_eq!(queue.messages(), vec![envelope]);
    }

    #[tokio::test]
    async fn test_queue_failure_propagates() {
        let queue = MemoryQueue::with_capacity(0);
        let handler = QueuingHandler::new(Arc::new(queue), true);

        let recipient = Address::new("whoever", "nowhere.example");
        let err = handler
            .acceptor(&recipient)
            .accept(Envelope::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Queue(crate::error::QueueError::CapacityExceeded(0))
        ));
    }
}
