//! SMTP reply-code classification.

use core::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// The subset of SMTP reply codes this layer hands back to the
/// protocol engine, plus an escape hatch for collaborator-reported
/// codes it merely forwards.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Debug, Serialize, Deserialize)]
pub enum ReplyCode {
    /// 501, parameter or argument unacceptable
    ParameterError,
    /// 503, bad sequence of commands
    BadSequence,
    /// 535, authentication credentials invalid
    AuthFailed,
    /// 550, mailbox unavailable / relaying denied
    Unavailable,
    /// Any other code reported by a collaborator
    Other(u16),
}

impl ReplyCode {
    /// Whether the code is a permanent (5xx) rejection
    #[must_use]
    pub fn is_permanent(self) -> bool {
        u16::from(self) >= 500
    }

    /// Whether the code is a temporary (4xx) rejection
    #[must_use]
    pub fn is_temporary(self) -> bool {
        (400..500).contains(&u16::from(self))
    }
}

impl From<u16> for ReplyCode {
    fn from(value: u16) -> Self {
        match value {
            501 => Self::ParameterError,
            503 => Self::BadSequence,
            535 => Self::AuthFailed,
            550 => Self::Unavailable,
            _ => Self::Other(value),
        }
    }
}

impl From<ReplyCode> for u16 {
    fn from(value: ReplyCode) -> Self {
        match value {
            ReplyCode::ParameterError => 501,
            ReplyCode::BadSequence => 503,
            ReplyCode::AuthFailed => 535,
            ReplyCode::Unavailable => 550,
            ReplyCode::Other(code) => code,
        }
    }
}

impl Display for ReplyCode {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(fmt, "{}", u16::from(*self))
    }
}
