//! The mail service registry.

use std::sync::Arc;

use ahash::AHashMap;
use postern_common::Domain;

use crate::{handler::DomainHandler, portal::Portal, queue::Queue};

/// The character splitting a login identifier into local part and
/// domain when a deployment does not configure its own.
pub const DEFAULT_DOMAIN_SPECIFIER: char = '@';

/// The long-lived registry of served domains.
///
/// Built once at service startup and shared read-only via `Arc` by
/// every connection for the process lifetime. Binding or removing a
/// domain means building a new service; per-connection components
/// never observe a registry mid-mutation.
#[derive(Debug)]
pub struct MailService {
    hostname: Domain,
    domain_specifier: char,
    domains: AHashMap<Domain, Arc<dyn DomainHandler>>,
    portals: AHashMap<Domain, Arc<dyn Portal>>,
    queue: Option<Arc<dyn Queue>>,
}

impl MailService {
    /// Start building a service announcing itself as `hostname`
    #[must_use]
    pub fn builder(hostname: impl Into<Domain>) -> MailServiceBuilder {
        MailServiceBuilder {
            hostname: hostname.into(),
            domain_specifier: DEFAULT_DOMAIN_SPECIFIER,
            domains: AHashMap::new(),
            portals: AHashMap::new(),
            queue: None,
        }
    }

    /// The hostname this service announces in trace headers
    #[must_use]
    pub const fn hostname(&self) -> &Domain {
        &self.hostname
    }

    /// The character splitting login identifiers into local part and
    /// domain
    #[must_use]
    pub const fn domain_specifier(&self) -> char {
        self.domain_specifier
    }

    /// Look up the delivery handler bound to `domain`
    #[must_use]
    pub fn domain(&self, domain: &str) -> Option<Arc<dyn DomainHandler>> {
        self.domains.get(domain).cloned()
    }

    /// Whether `domain` is served directly
    #[must_use]
    pub fn serves(&self, domain: &str) -> bool {
        self.domains.contains_key(domain)
    }

    /// Look up the authentication authority bound to `domain`
    #[must_use]
    pub fn portal(&self, domain: &str) -> Option<Arc<dyn Portal>> {
        self.portals.get(domain).cloned()
    }

    /// The outbound queue, when store-and-forward relay is permitted
    #[must_use]
    pub fn queue(&self) -> Option<&Arc<dyn Queue>> {
        self.queue.as_ref()
    }

    /// Whether authenticated senders may relay to unserved domains
    #[must_use]
    pub const fn queuing_enabled(&self) -> bool {
        self.queue.is_some()
    }
}

/// Builder for [`MailService`].
///
/// Consumed by `build`; the resulting service is immutable.
#[derive(Debug)]
pub struct MailServiceBuilder {
    hostname: Domain,
    domain_specifier: char,
    domains: AHashMap<Domain, Arc<dyn DomainHandler>>,
    portals: AHashMap<Domain, Arc<dyn Portal>>,
    queue: Option<Arc<dyn Queue>>,
}

impl MailServiceBuilder {
    /// Override the login identifier domain specifier
    #[must_use]
    pub const fn with_domain_specifier(mut self, specifier: char) -> Self {
        self.domain_specifier = specifier;
        self
    }

    /// Bind a delivery handler to a served domain
    #[must_use]
    pub fn with_domain(
        mut self,
        domain: impl Into<Domain>,
        handler: Arc<dyn DomainHandler>,
    ) -> Self {
        self.domains.insert(domain.into(), handler);
        self
    }

    /// Bind an authentication authority to a served domain
    #[must_use]
    pub fn with_portal(mut self, domain: impl Into<Domain>, portal: Arc<dyn Portal>) -> Self {
        self.portals.insert(domain.into(), portal);
        self
    }

    /// Permit store-and-forward relay through the given queue
    #[must_use]
    pub fn with_queue(mut self, queue: Arc<dyn Queue>) -> Self {
        self.queue = Some(queue);
        self
    }

    /// Freeze the registry
    #[must_use]
    pub fn build(self) -> MailService {
        MailService {
            hostname: self.hostname,
            domain_specifier: self.domain_specifier,
            domains: self.domains,
            portals: self.portals,
            queue: self.queue,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{handlers::MemoryDomain, queue::MemoryQueue};

    use super::*;

    #[test]
    fn test_domain_lookup() {
        let service = MailService::builder("mx.example")
            .with_domain(
                "tenant.example",
                Arc::new(MemoryDomain::new("tenant.example")),
            )
            .build();

        assert!(service.serves("tenant.example"));
        assert!(service.domain("tenant.example").is_some());
        assert!(service.domain("other.example").is_none());
        assert!(!service.queuing_enabled());
    }

    #[test]
    fn test_queue_enables_relay() {
        let service = MailService::builder("mx.example")
            .with_queue(Arc::new(MemoryQueue::new()))
            .build();

        assert!(service.queuing_enabled());
        assert!(service.queue().is_some());
    }

    #[test]
    fn test_default_domain_specifier() {
        let service = MailService::builder("mx.example").build();
        assert_eq!(service.domain_specifier(), '@');

        let service = MailService::builder("mx.example")
            .with_domain_specifier('%')
            .build();
        assert_eq!(service.domain_specifier(), '%');
    }
}
