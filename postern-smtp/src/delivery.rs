//! Sender and recipient validation against the service registry.

use std::{
    fmt::{self, Display},
    sync::Arc,
};

use postern_common::{Address, Domain, Reject, delivery};
use postern_service::{AcceptorFactory, MailService, QueuingHandler, handler::DomainHandler};
use serde::{Deserialize, Serialize};

/// The protocol label recorded in trace headers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Smtp,
    Esmtp,
}

impl Protocol {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Smtp => "smtp",
            Self::Esmtp => "esmtp",
        }
    }
}

impl Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The client's unauthenticated self-identification, recorded once at
/// session start and immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeloIdentity {
    name: String,
    peer: String,
}

impl HeloIdentity {
    #[must_use]
    pub fn new(name: impl Into<String>, peer: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            peer: peer.into(),
        }
    }

    /// The name the client claimed in its HELO/EHLO
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The peer address the connection actually came from
    #[must_use]
    pub fn peer(&self) -> &str {
        &self.peer
    }
}

/// Per-connection delivery component.
///
/// Holds the shared service registry, the authenticated user once the
/// session has proven an identity, and the facts stamped into trace
/// headers. One instance per connection; the transport layer resolves
/// each validation fully before feeding the next command, so no two
/// validations for one connection ever overlap.
#[derive(Clone, Debug)]
pub struct DomainDelivery {
    service: Arc<MailService>,
    authenticated: Option<String>,
    host: Domain,
    protocol: Protocol,
}

impl DomainDelivery {
    /// Create a delivery component for one connection, announcing the
    /// service's hostname in trace headers
    #[must_use]
    pub fn new(service: Arc<MailService>, protocol: Protocol) -> Self {
        let host = service.hostname().clone();
        Self {
            service,
            authenticated: None,
            host,
            protocol,
        }
    }

    /// Record a successfully authenticated user (e.g. after SMTP AUTH)
    pub fn authenticate(&mut self, user: impl Into<String>) {
        self.authenticated = Some(user.into());
    }

    /// The authenticated user, if the session has one
    #[must_use]
    pub fn authenticated(&self) -> Option<&str> {
        self.authenticated.as_deref()
    }

    /// The hostname announced in trace headers
    #[must_use]
    pub const fn host(&self) -> &Domain {
        &self.host
    }

    /// The protocol label for trace headers
    #[must_use]
    pub const fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Validate the address a message claims to originate from.
    ///
    /// The address is returned unchanged on success; no normalization
    /// happens here.
    ///
    /// # Errors
    ///
    /// Rejects with 503 when the session never identified itself, and
    /// with 501 when the sender carries a local part but no domain.
    pub fn validate_from<'a>(
        &self,
        helo: Option<&HeloIdentity>,
        origin: &'a Address,
    ) -> Result<&'a Address, Reject> {
        if helo.is_none() {
            return Err(Reject::must_identify());
        }

        if !origin.local().is_empty() && origin.domain().is_empty() {
            return Err(Reject::sender_needs_domain());
        }

        Ok(origin)
    }

    /// Validate the address a message is destined for and select the
    /// handler that will receive it.
    ///
    /// An authenticated session on a queuing-enabled service may relay
    /// to any domain: a registry miss falls back to a store-and-forward
    /// handler. Everyone else must target a served domain.
    ///
    /// # Errors
    ///
    /// Rejects with `UnknownDomain` when the domain is not served and
    /// no fallback applies, and with a recipient rejection when the
    /// selected handler's existence check fails.
    pub async fn validate_to(&self, destination: &Address) -> Result<AcceptorFactory, Reject> {
        let handler = match (&self.authenticated, self.service.queue()) {
            (Some(_), Some(queue)) => self
                .service
                .domain(destination.domain())
                .unwrap_or_else(|| {
                    delivery!(
                        level = DEBUG,
                        domain = %destination.domain(),
                        "queuing fallback for authenticated relay"
                    );
                    Arc::new(QueuingHandler::new(Arc::clone(queue), true)) as Arc<dyn DomainHandler>
                }),
            _ => self
                .service
                .domain(destination.domain())
                .ok_or_else(|| Reject::UnknownDomain(destination.domain().clone()))?,
        };

        handler
            .exists(destination)
            .await
            .map_err(|err| Reject::recipient(err.to_string()))?;

        Ok(AcceptorFactory::new(handler, destination.clone()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use postern_common::ReplyCode;

    use super::*;

    fn delivery() -> DomainDelivery {
        let service = Arc::new(MailService::builder("mx.example").build());
        DomainDelivery::new(service, Protocol::Esmtp)
    }

    fn helo() -> HeloIdentity {
        HeloIdentity::new("client.example", "192.0.2.7")
    }

    #[test]
    fn test_validate_from_requires_identification() {
        // Rejected whatever shape the origin takes, even the null sender.
        let delivery = delivery();

        for origin in [
            Address::new("alice", "tenant.example"),
            Address::new("alice", ""),
            Address::null(),
        ] {
            let reject = delivery.validate_from(None, &origin).unwrap_err();
            assert_eq!(reject.code(), ReplyCode::BadSequence);
        }
    }

    #[test]
    fn test_validate_from_requires_sender_domain() {
        let delivery = delivery();
        let origin = Address::new("alice", "");

        let reject = delivery.validate_from(Some(&helo()), &origin).unwrap_err();
        assert_eq!(reject.code(), ReplyCode::ParameterError);
    }

    #[test]
    fn test_validate_from_accepts_null_sender() {
        // Bounce messages use the null sender; an empty local part
        // with an empty domain is acceptable.
        let delivery = delivery();
        let origin = Address::null();

        assert_eq!(
            delivery.validate_from(Some(&helo()), &origin),
            Ok(&origin)
        );
    }

    #[test]
    fn test_validate_from_returns_origin_unchanged() {
        let delivery = delivery();
        let origin = Address::new("Alice.Smith", "Tenant.Example");

        assert_eq!(
            delivery.validate_from(Some(&helo()), &origin),
            Ok(&origin)
        );
    }

    #[test]
    fn test_protocol_labels() {
        assert_eq!(Protocol::Smtp.to_string(), "smtp");
        assert_eq!(Protocol::Esmtp.to_string(), "esmtp");
    }
}
