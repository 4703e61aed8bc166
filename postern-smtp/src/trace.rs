//! Trace ("Received") header formatting.
//!
//! The header is descriptive metadata only: it records transit facts
//! for an accepted message and has no effect on delivery decisions.
//! Everything in it was validated before this point, so formatting
//! never fails.

use chrono::{DateTime, Utc};
use postern_common::Address;

use crate::{
    delivery::{DomainDelivery, HeloIdentity},
    xtext,
};

/// The agent string recorded in the `by` line.
pub const AGENT: &str = concat!("Postern ", env!("CARGO_PKG_VERSION"));

impl DomainDelivery {
    /// Format the trace header for a message accepted by this
    /// connection.
    ///
    /// Three lines joined by newline-tab: the client's claimed and
    /// observed identity (with the authenticated user xtext-escaped,
    /// when present), the receiving host and protocol, and the
    /// recipients with the date. Byte-for-byte reproducible given the
    /// same inputs and timestamp.
    #[must_use]
    pub fn received_header(
        &self,
        helo: &HeloIdentity,
        recipients: &[Address],
        now: DateTime<Utc>,
    ) -> String {
        let mut from = format!("from {} ([{}]", helo.name(), helo.peer());
        if !helo.name().is_empty() {
            from.push_str(" helo=");
            from.push_str(helo.name());
        }
        if let Some(user) = self.authenticated() {
            from.push_str(" auth=");
            from.push_str(&xtext::encode(user));
        }

        let by = format!("by {} with {} ({AGENT})", self.host(), self.protocol());

        let addresses = recipients
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        let for_ = format!("for <{addresses}> {}", now.to_rfc2822());

        format!("Received: {from}\n\t{by}\n\t{for_}")
    }
}
