//! Multi-tenant mail service registry and the trait seams around it.
//!
//! A [`MailService`] is built once at startup and shared, read-only,
//! by every connection for the life of the process. It maps each
//! served domain to a [`DomainHandler`] and, optionally, to a
//! [`Portal`] answering login attempts for that domain, and carries
//! the queue handle that permits store-and-forward relay for
//! authenticated senders.

pub mod config;
pub mod envelope;
pub mod error;
pub mod handler;
pub mod handlers;
pub mod portal;
pub mod queue;
pub mod service;

pub use config::{DomainEntry, ServiceConfig};
pub use envelope::Envelope;
pub use error::{QueueError, ServiceError};
pub use handler::{AcceptorFactory, DomainHandler, MessageAcceptor};
pub use handlers::{MemoryDomain, QueuingHandler};
pub use portal::{Credentials, LoginSession, Mailbox, Portal};
pub use queue::{MemoryQueue, Queue};
pub use service::{MailService, MailServiceBuilder};
