//! Declarative service configuration.
//!
//! Deserializable from any serde format. The config covers the
//! declarative part of a deployment (hostname, tenancy, queuing); real
//! deployments bind their own handler and portal implementations on
//! top of the service this bootstraps.

use std::sync::Arc;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::{
    handlers::MemoryDomain,
    queue::MemoryQueue,
    service::{DEFAULT_DOMAIN_SPECIFIER, MailService, MailServiceBuilder},
};

const fn default_specifier() -> char {
    DEFAULT_DOMAIN_SPECIFIER
}

/// Configuration for one served domain.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DomainEntry {
    /// Mailboxes the domain accepts mail for
    #[serde(default)]
    pub users: Vec<String>,
}

/// Top-level service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Hostname announced in trace headers
    pub hostname: String,

    /// Character splitting login identifiers into local part and domain
    #[serde(default = "default_specifier")]
    pub domain_specifier: char,

    /// Whether authenticated senders may relay to unserved domains
    #[serde(default)]
    pub queuing: bool,

    /// Served domains
    #[serde(default)]
    pub domains: AHashMap<String, DomainEntry>,
}

impl ServiceConfig {
    /// Start a service builder seeded from this configuration, with
    /// in-memory handlers for the configured domains. Callers bind
    /// portals and replace handlers before `build`.
    #[must_use]
    pub fn builder(&self) -> MailServiceBuilder {
        let mut builder = MailService::builder(self.hostname.as_str())
            .with_domain_specifier(self.domain_specifier);

        for (domain, entry) in &self.domains {
            builder = builder.with_domain(
                domain.as_str(),
                Arc::new(MemoryDomain::new(domain.as_str()).with_users(entry.users.clone())),
            );
        }

        if self.queuing {
            builder = builder.with_queue(Arc::new(MemoryQueue::new()));
        }

        builder
    }
}
