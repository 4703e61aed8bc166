//! Per-domain authentication authority seam.
//!
//! A [`Portal`] maps credentials to a mailbox session or rejects
//! them. One portal may be bound per served domain; the login router
//! picks the portal by the domain part of the login identifier and
//! forwards credentials carrying the local part only.

use std::fmt;

use async_trait::async_trait;
use postern_common::Reject;

/// Credentials presented by a login attempt.
///
/// The `username` is always the local part of the original login
/// identifier; the domain was consumed when the portal was selected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    /// Cleartext password login (POP3 USER/PASS, SMTP AUTH PLAIN).
    Password { username: String, secret: String },

    /// Challenge/response login (POP3 APOP, CRAM-style mechanisms).
    /// `challenge` is the server-issued banner the client digested;
    /// `response` is the client's digest.
    Challenge {
        username: String,
        challenge: Vec<u8>,
        response: String,
    },
}

impl Credentials {
    /// The claimed identity, i.e. the local part of the login identifier
    #[must_use]
    pub fn username(&self) -> &str {
        match self {
            Self::Password { username, .. } | Self::Challenge { username, .. } => username,
        }
    }
}

/// Capability handed back by a portal after a successful login.
///
/// Listing, retrieving and deleting messages are the storage layer's
/// concern; this layer only routes the login and hands the mailbox
/// back to the protocol engine.
pub trait Mailbox: Send + Sync + fmt::Debug {
    /// The mailbox owner as known to the authority
    fn user(&self) -> &str;
}

/// Callback invoked when the protocol engine ends the session.
pub type Logout = Box<dyn FnOnce() + Send>;

/// A successful login: the mailbox capability plus its logout hook.
pub struct LoginSession {
    pub mailbox: Box<dyn Mailbox>,
    pub logout: Logout,
}

impl LoginSession {
    #[must_use]
    pub fn new(mailbox: Box<dyn Mailbox>, logout: Logout) -> Self {
        Self { mailbox, logout }
    }
}

impl fmt::Debug for LoginSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginSession")
            .field("mailbox", &self.mailbox)
            .finish_non_exhaustive()
    }
}

/// An authentication authority bound to one served domain.
#[async_trait]
pub trait Portal: Send + Sync + fmt::Debug {
    /// Map `credentials` to a mailbox session.
    ///
    /// # Errors
    ///
    /// Returns [`Reject::UnauthorizedLogin`] when the credentials are
    /// refused. Implementations should not distinguish unknown users
    /// from wrong secrets.
    async fn login(&self, credentials: Credentials) -> Result<LoginSession, Reject>;
}
