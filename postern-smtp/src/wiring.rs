//! Connection wiring for the SMTP side.
//!
//! A [`SmtpFactory`] lives beside the transport acceptor and carries
//! the references every connection needs: the shared service registry
//! and, when inline AUTH is offered, the authentication authority.
//! Binding happens before any protocol traffic is processed; no
//! business logic lives here.

use std::{net::SocketAddr, sync::Arc};

use postern_common::delivery;
use postern_service::{MailService, Portal};

use crate::delivery::{DomainDelivery, Protocol};

/// Factory binding accepted SMTP connections to a mail service.
#[derive(Clone, Debug)]
pub struct SmtpFactory {
    service: Arc<MailService>,
    portal: Option<Arc<dyn Portal>>,
    protocol: Protocol,
}

impl SmtpFactory {
    #[must_use]
    pub const fn new(service: Arc<MailService>, protocol: Protocol) -> Self {
        Self {
            service,
            portal: None,
            protocol,
        }
    }

    /// Offer inline authentication through the given authority
    #[must_use]
    pub fn with_portal(mut self, portal: Arc<dyn Portal>) -> Self {
        self.portal = Some(portal);
        self
    }

    /// Bind a freshly accepted connection to the service.
    #[must_use]
    pub fn connection(&self, peer: SocketAddr) -> SmtpConnection {
        delivery!(level = DEBUG, %peer, "connection accepted");

        SmtpConnection {
            delivery: DomainDelivery::new(Arc::clone(&self.service), self.protocol),
            portal: self.portal.clone(),
        }
    }
}

/// The per-connection component handed to the protocol engine.
#[derive(Clone, Debug)]
pub struct SmtpConnection {
    delivery: DomainDelivery,
    portal: Option<Arc<dyn Portal>>,
}

impl SmtpConnection {
    /// The delivery component for this connection
    #[must_use]
    pub const fn delivery(&self) -> &DomainDelivery {
        &self.delivery
    }

    /// Mutable access, for recording a successful AUTH
    pub const fn delivery_mut(&mut self) -> &mut DomainDelivery {
        &mut self.delivery
    }

    /// The authority answering inline AUTH, when one is offered
    #[must_use]
    pub fn portal(&self) -> Option<&Arc<dyn Portal>> {
        self.portal.as_ref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_carries_service_reference() {
        let service = Arc::new(MailService::builder("mx.example").build());
        let factory = SmtpFactory::new(Arc::clone(&service), Protocol::Esmtp);

        let peer: SocketAddr = "192.0.2.7:2525".parse().unwrap();
        let connection = factory.connection(peer);

        assert_eq!(connection.delivery().host(), service.hostname());
        assert!(connection.portal().is_none());
        assert!(connection.delivery().authenticated().is_none());
    }
}
