//! SMTP-side delivery decisions for Postern.
//!
//! The per-connection [`DomainDelivery`] component answers the two
//! questions the protocol engine asks during a transaction — is this
//! sender acceptable, is this recipient deliverable and by whom — and
//! formats the trace header stamped onto accepted messages.
//! [`SmtpFactory`] is the seam binding a freshly accepted connection
//! to the shared service registry.

pub mod delivery;
pub mod trace;
pub mod wiring;
pub mod xtext;

pub use delivery::{DomainDelivery, HeloIdentity, Protocol};
pub use wiring::{SmtpConnection, SmtpFactory};
