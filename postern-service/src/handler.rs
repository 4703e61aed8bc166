//! The domain handler seam between delivery validation and storage.
//!
//! A [`DomainHandler`] is bound to one served domain and answers two
//! questions: does this recipient exist, and where do its messages go.
//! Handlers are trait objects so the registry can mix direct local
//! delivery, store-and-forward queuing, and whatever else a deployment
//! plugs in, behind one seam.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use postern_common::Address;

use crate::{envelope::Envelope, error::ServiceError};

/// Service-side object bound to one served domain.
///
/// Existence checks are asynchronous and may suspend the calling
/// connection's flow until a backend resolves; they never block other
/// connections.
#[async_trait]
pub trait DomainHandler: Send + Sync + fmt::Debug {
    /// Check that mail for `recipient` can be accepted by this domain.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] when the recipient is unknown or the
    /// backend refuses it; the validator reports this to the client as
    /// a permanent recipient rejection.
    async fn exists(&self, recipient: &Address) -> Result<(), ServiceError>;

    /// Open a message acceptor for `recipient`.
    ///
    /// Called once per recipient when the transaction reaches its data
    /// phase, after `exists` already succeeded.
    fn acceptor(&self, recipient: &Address) -> Box<dyn MessageAcceptor>;
}

/// A per-recipient message receiver produced by a [`DomainHandler`].
#[async_trait]
pub trait MessageAcceptor: Send {
    /// Accept a complete message.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] when the message cannot be stored or
    /// enqueued.
    async fn accept(self: Box<Self>, envelope: Envelope) -> Result<(), ServiceError>;
}

/// The deferred constructor a successful recipient validation resolves
/// to: the selected handler paired with the validated recipient, able
/// to open acceptors when the transaction reaches its data phase.
#[derive(Clone)]
pub struct AcceptorFactory {
    handler: Arc<dyn DomainHandler>,
    recipient: Address,
}

impl AcceptorFactory {
    #[must_use]
    pub fn new(handler: Arc<dyn DomainHandler>, recipient: Address) -> Self {
        Self { handler, recipient }
    }

    /// The recipient this factory was validated for
    #[must_use]
    pub const fn recipient(&self) -> &Address {
        &self.recipient
    }

    /// Open a fresh acceptor for the validated recipient
    #[must_use]
    pub fn open(&self) -> Box<dyn MessageAcceptor> {
        self.handler.acceptor(&self.recipient)
    }
}

impl fmt::Debug for AcceptorFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AcceptorFactory")
            .field("handler", &self.handler)
            .field("recipient", &self.recipient)
            .finish()
    }
}
