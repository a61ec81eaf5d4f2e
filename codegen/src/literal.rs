//! Numeric literals.
//!
//! A numeral is digits with at most one decimal point, optionally followed
//! by `E`, an optional sign and exponent digits. The compiler stores the
//! value as an 8 byte little-endian double after the LITERAL opcode.

use log::warn;
use thiserror::Error;

use crate::LiteralPolicy;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("\"{numeral}\" is not a number")]
pub struct LiteralError {
    pub numeral: String,
}

/// Returns the numeral that starts at byte `start` of `text`.
///
/// `text` must already be uppercased.
pub fn scan_numeral(text: &str, start: usize) -> &str {
    let bytes = text.as_bytes();
    let mut end = start;
    let mut seen_point = false;

    while let Some(&b) = bytes.get(end) {
        match b {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_point => {
                seen_point = true;
                end += 1;
            }
            _ => break,
        }
    }

    if bytes.get(end) == Some(&b'E') {
        end += 1;
        if matches!(bytes.get(end), Some(b'+') | Some(b'-')) {
            end += 1;
        }
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
    }

    &text[start..end]
}

/// Converts a scanned numeral to its value.
pub fn literal_value(numeral: &str, policy: LiteralPolicy) -> Result<f64, LiteralError> {
    match numeral.parse::<f64>() {
        Ok(value) => Ok(value),
        Err(_) => match policy {
            LiteralPolicy::Strict => Err(LiteralError {
                numeral: numeral.to_string(),
            }),
            LiteralPolicy::ZeroOnError => {
                warn!("Numeral {numeral:?} is malformed, encoding 0");
                Ok(0.0)
            }
        },
    }
}
