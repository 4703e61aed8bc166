//! Direct local-domain handler backed by process memory.

use std::sync::{Arc, PoisonError, RwLock};

use ahash::AHashSet;
use async_trait::async_trait;
use postern_common::{Address, Domain};

use crate::{
    envelope::Envelope,
    error::ServiceError,
    handler::{DomainHandler, MessageAcceptor},
};

/// A local domain with a fixed user set, delivering into memory.
///
/// Existence checks answer from the configured user set; accepted
/// messages accumulate in a shared `Vec` the tests (or a transient
/// deployment) can inspect.
///
/// # Concurrency
///
/// The user set is frozen at registration time, matching the service
/// registry's build-once lifecycle. Only the delivered-message store
/// is behind a lock.
#[derive(Debug, Clone)]
pub struct MemoryDomain {
    domain: Domain,
    users: AHashSet<String>,
    delivered: Arc<RwLock<Vec<Envelope>>>,
}

impl MemoryDomain {
    /// Create a handler for `domain` with an empty user set
    #[must_use]
    pub fn new(domain: impl Into<Domain>) -> Self {
        Self {
            domain: domain.into(),
            users: AHashSet::new(),
            delivered: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Add the given users to the handler's user set
    #[must_use]
    pub fn with_users<I, S>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.users.extend(users.into_iter().map(Into::into));
        self
    }

    /// The domain this handler is bound to
    #[must_use]
    pub const fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Whether `local` is a known mailbox
    #[must_use]
    pub fn knows(&self, local: &str) -> bool {
        self.users.contains(local)
    }

    /// Snapshot of messages delivered so far.
    ///
    /// Recovers gracefully if the lock is poisoned by accessing the
    /// underlying data.
    #[must_use]
    pub fn delivered(&self) -> Vec<Envelope> {
        self.delivered
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The number of messages delivered so far
    #[must_use]
    pub fn delivered_count(&self) -> usize {
        self.delivered
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl DomainHandler for MemoryDomain {
    async fn exists(&self, recipient: &Address) -> Result<(), ServiceError> {
        if self.knows(recipient.local()) {
            Ok(())
        } else {
            Err(ServiceError::NoSuchUser(recipient.clone()))
        }
    }

    fn acceptor(&self, _recipient: &Address) -> Box<dyn MessageAcceptor> {
        Box::new(MemoryAcceptor {
            delivered: Arc::clone(&self.delivered),
        })
    }
}

#[derive(Debug)]
struct MemoryAcceptor {
    delivered: Arc<RwLock<Vec<Envelope>>>,
}

#[async_trait]
impl MessageAcceptor for MemoryAcceptor {
    async fn accept(self: Box<Self>, envelope: Envelope) -> Result<(), ServiceError> {
        self.delivered
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(envelope);

        Ok(())
    }
}
