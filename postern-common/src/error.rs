//! The rejection taxonomy for delivery and authentication decisions.
//!
//! Every decision this layer makes either succeeds or produces a
//! [`Reject`] value. Rejections are explicit tagged results rather than
//! panics or ad-hoc errors: they are per-transaction outcomes the
//! protocol engine turns into wire replies, and none of them is fatal
//! to the connection or the process.

use std::borrow::Cow;

use thiserror::Error;

use crate::{domain::Domain, reply::ReplyCode};

/// A permanent rejection of a sender, recipient, or login attempt.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Reject {
    /// The envelope sender is unacceptable.
    #[error("{code} sender rejected: {reason}")]
    Sender {
        code: ReplyCode,
        reason: Cow<'static, str>,
    },

    /// The recipient exists check failed, or the selected handler
    /// refused the recipient.
    #[error("{code} recipient rejected: {reason}")]
    Recipient {
        code: ReplyCode,
        reason: Cow<'static, str>,
    },

    /// The recipient domain is not served and no queuing fallback
    /// applies.
    #[error("550 relaying denied for domain \"{0}\"")]
    UnknownDomain(Domain),

    /// Authentication failed. Deliberately carries no detail: an
    /// unserved domain and bad credentials surface identically at the
    /// wire so a probing client learns nothing about served domains.
    #[error("authentication failed")]
    UnauthorizedLogin,
}

impl Reject {
    /// Sender rejection for a session that never identified itself.
    #[must_use]
    pub const fn must_identify() -> Self {
        Self::Sender {
            code: ReplyCode::BadSequence,
            reason: Cow::Borrowed("identification required before sender is accepted"),
        }
    }

    /// Sender rejection for an address carrying a local part but no
    /// domain.
    #[must_use]
    pub const fn sender_needs_domain() -> Self {
        Self::Sender {
            code: ReplyCode::ParameterError,
            reason: Cow::Borrowed("sender address must include a domain"),
        }
    }

    /// Recipient rejection with a collaborator-reported reason.
    #[must_use]
    pub fn recipient(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::Recipient {
            code: ReplyCode::Unavailable,
            reason: reason.into(),
        }
    }

    /// The reply code the protocol engine should put on the wire.
    #[must_use]
    pub const fn code(&self) -> ReplyCode {
        match self {
            Self::Sender { code, .. } | Self::Recipient { code, .. } => *code,
            Self::UnknownDomain(_) => ReplyCode::Unavailable,
            Self::UnauthorizedLogin => ReplyCode::AuthFailed,
        }
    }

    /// All rejections from this layer are permanent; transient
    /// collaborator failures are reported with whatever code the
    /// collaborator chose.
    #[must_use]
    pub fn is_permanent(&self) -> bool {
        self.code().is_permanent()
    }
}
