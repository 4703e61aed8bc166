//! Shared types for the Postern mail delivery decision layer.
//!
//! Everything here is protocol-agnostic: the [`Domain`] and [`Address`]
//! newtypes, the SMTP reply-code classification, the rejection taxonomy
//! used by the delivery and authentication layers, and tracing setup.

pub mod address;
pub mod domain;
pub mod error;
pub mod logging;
pub mod reply;

pub use address::{Address, split_identifier};
pub use domain::Domain;
pub use error::Reject;
pub use reply::ReplyCode;

pub use tracing;
