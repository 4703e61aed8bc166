//! Error types for the postern-service crate.

use postern_common::Address;
use thiserror::Error;

/// Errors reported by domain handlers and the service registry.
///
/// These are collaborator-side failures; the delivery validator maps
/// them into the wire-facing rejection taxonomy at its boundary.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The handler serves the domain but knows no such mailbox.
    #[error("no mailbox for {0}")]
    NoSuchUser(Address),

    /// The handler refused the recipient for a reason of its own.
    #[error("recipient refused: {0}")]
    Refused(String),

    /// The queue backing a store-and-forward acceptor failed.
    #[error("queue error: {0}")]
    Queue(#[from] QueueError),
}

/// Errors reported by queue implementations.
#[derive(Debug, Error)]
pub enum QueueError {
    /// The queue refused the message because it is full.
    #[error("queue capacity exceeded: {0} messages")]
    CapacityExceeded(usize),

    /// The backing store failed.
    #[error("queue storage failure: {0}")]
    Storage(String),
}
