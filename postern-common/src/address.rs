//! Mail address pair and identifier splitting.
//!
//! An [`Address`] is the (local part, domain) pair produced from an
//! envelope address or a login identifier. Parsing raw protocol bytes
//! into an identifier happens upstream in the protocol engine; this
//! module only splits an identifier on a configurable separator.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::domain::Domain;

/// Split a mail identifier into its local part and domain on the
/// **first** occurrence of `separator`.
///
/// An identifier without a separator belongs to the empty domain. That
/// is a valid outcome, not an error: single-tenant deployments register
/// their handlers under the empty domain.
///
/// ```
/// use postern_common::split_identifier;
///
/// assert_eq!(split_identifier("user@example.com", '@'), ("user", "example.com"));
/// assert_eq!(split_identifier("user", '@'), ("user", ""));
/// assert_eq!(split_identifier("a@b@c", '@'), ("a", "b@c"));
/// ```
#[must_use]
pub fn split_identifier(identifier: &str, separator: char) -> (&str, &str) {
    identifier
        .split_once(separator)
        .unwrap_or((identifier, ""))
}

/// An envelope or login address: local part plus domain.
///
/// The null address (both parts empty) models the SMTP null sender
/// `<>`. A non-empty local part with an empty domain is representable
/// here; whether it is acceptable is a delivery-policy question and is
/// decided by the validator, not the constructor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    local: String,
    domain: Domain,
}

impl Address {
    #[must_use]
    pub fn new(local: impl Into<String>, domain: impl Into<Domain>) -> Self {
        Self {
            local: local.into(),
            domain: domain.into(),
        }
    }

    /// Build an address by splitting `identifier` on the first
    /// occurrence of `separator`.
    #[must_use]
    pub fn from_identifier(identifier: &str, separator: char) -> Self {
        let (local, domain) = split_identifier(identifier, separator);
        Self::new(local, domain)
    }

    /// The null address, i.e. the SMTP null sender `<>`
    #[must_use]
    pub fn null() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn local(&self) -> &str {
        &self.local
    }

    #[must_use]
    pub const fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Whether this is the null address (empty local part and domain)
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.local.is_empty() && self.domain.is_empty()
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.local, self.domain)
    }
}
