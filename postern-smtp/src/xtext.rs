//! Reversible xtext escaping for trace header fields.
//!
//! Arbitrary identifier bytes are rendered as printable ASCII: every
//! byte outside the printable range, plus `+` and `=`, becomes a `+HH`
//! hex pair. Used for the `auth=` field of the Received header, where
//! an authenticated identity must survive byte-exact in a header that
//! only permits printable characters.

use std::fmt::Write;

use thiserror::Error;

/// Errors that can occur while decoding xtext.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XtextError {
    /// A `+` escape without two following hex digits.
    #[error("truncated escape sequence")]
    TruncatedEscape,

    /// A `+` escape with a non-hex digit.
    #[error("invalid hex digit {0:?} in escape sequence")]
    InvalidHexDigit(char),

    /// The decoded bytes are not valid UTF-8.
    #[error("decoded identifier is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Whether a byte may appear unescaped in xtext.
const fn is_xchar(byte: u8) -> bool {
    matches!(byte, 33..=126) && byte != b'+' && byte != b'='
}

/// Encode an identifier as xtext.
#[must_use]
pub fn encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());

    for &byte in input.as_bytes() {
        if is_xchar(byte) {
            out.push(byte as char);
        } else {
            // The write cannot fail on a String
            let _ = write!(out, "+{byte:02X}");
        }
    }

    out
}

/// Decode xtext back to the original identifier.
///
/// # Errors
///
/// Returns an [`XtextError`] on a malformed escape sequence or when
/// the decoded bytes are not valid UTF-8.
pub fn decode(input: &str) -> Result<String, XtextError> {
    let mut out = Vec::with_capacity(input.len());
    let mut bytes = input.bytes();

    while let Some(byte) = bytes.next() {
        if byte == b'+' {
            let high = bytes.next().ok_or(XtextError::TruncatedEscape)?;
            let low = bytes.next().ok_or(XtextError::TruncatedEscape)?;
            out.push((hex_value(high)? << 4) | hex_value(low)?);
        } else {
            out.push(byte);
        }
    }

    Ok(String::from_utf8(out)?)
}

fn hex_value(byte: u8) -> Result<u8, XtextError> {
    (byte as char)
        .to_digit(16)
        .map(|value| {
            // to_digit(16) only yields 0..=15
            #[allow(clippy::cast_possible_truncation)]
            {
                value as u8
            }
        })
        .ok_or(XtextError::InvalidHexDigit(byte as char))
}
