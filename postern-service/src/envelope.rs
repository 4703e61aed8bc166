//! The unit of mail handed to acceptors and the queue.

use postern_common::Address;
use serde::{Deserialize, Serialize};

/// An accepted message: envelope sender, envelope recipients, and the
/// raw message bytes as received after the trace header was prepended.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    sender: Address,
    recipients: Vec<Address>,
    data: Vec<u8>,
}

impl Envelope {
    #[must_use]
    pub fn new(sender: Address, recipients: Vec<Address>, data: Vec<u8>) -> Self {
        Self {
            sender,
            recipients,
            data,
        }
    }

    /// Returns the envelope sender for this message
    #[inline]
    #[must_use]
    pub const fn sender(&self) -> &Address {
        &self.sender
    }

    /// Returns the envelope recipients for this message
    #[inline]
    #[must_use]
    pub fn recipients(&self) -> &[Address] {
        &self.recipients
    }

    /// Returns the raw message bytes
    #[inline]
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}
