//! Domain newtype for type safety
//!
//! Wraps domain strings to prevent accidentally passing full mail
//! addresses or other strings where a bare domain is expected. Domains
//! are the lookup key into the service registry, so cloning has to be
//! cheap; the interior is a shared `Arc<str>`.

use std::{
    borrow::Borrow,
    fmt::{self, Display},
    ops::Deref,
    sync::Arc,
};

use serde::{Deserialize, Serialize};

/// A domain name string wrapper.
///
/// The empty domain is a valid value: login identifiers without a
/// domain specifier belong to it, and single-tenant deployments may
/// register a handler under it.
///
/// # Examples
///
/// ```
/// use postern_common::Domain;
///
/// let domain = Domain::new("example.com");
/// assert_eq!(domain.as_str(), "example.com");
///
/// let domain: Domain = "mail.example.com".into();
/// assert_eq!(domain.as_str(), "mail.example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Domain(Arc<str>);

impl Domain {
    /// Create a new `Domain` from any type that can be converted to `Arc<str>`
    #[must_use]
    pub fn new(s: impl Into<Arc<str>>) -> Self {
        Self(s.into())
    }

    /// The empty domain, used for identifiers carrying no domain specifier
    #[must_use]
    pub fn empty() -> Self {
        Self(Arc::from(""))
    }

    /// Get the domain as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self::empty()
    }
}

impl Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Domain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Domain {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Deref for Domain {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<String> for Domain {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl From<&str> for Domain {
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl From<Arc<str>> for Domain {
    fn from(s: Arc<str>) -> Self {
        Self(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_domain_creation() {
        let domain = Domain::new("example.com");
        assert_eq!(domain.as_str(), "example.com");
    }

    #[test]
    fn test_empty_domain_is_default() {
        assert_eq!(Domain::default(), Domain::empty());
        assert!(Domain::default().is_empty());
    }

    #[test]
    fn test_domain_display() {
        let domain = Domain::new("display.example.com");
        assert_eq!(format!("{domain}"), "display.example.com");
    }

    #[test]
    fn test_domain_equality() {
        assert_eq!(Domain::new("example.com"), Domain::from("example.com"));
        assert_ne!(Domain::new("example.com"), Domain::new("different.com"));
    }

    #[test]
    fn test_domain_as_map_key() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(Domain::new("tenant.example"), 42);

        // Borrow<str> allows lookups by bare string slice
        assert_eq!(map.get("tenant.example"), Some(&42));
        assert_eq!(map.get("other.example"), None);
    }

    #[test]
    fn test_domain_serde() {
        let domain = Domain::new("serde.example.com");
        let serialized = serde_json::to_string(&domain).unwrap();
        assert_eq!(serialized, "\"serde.example.com\"");

        let deserialized: Domain = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, domain);
    }
}
