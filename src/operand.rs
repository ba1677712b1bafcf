//! Conversion of command-line tokens into operands.
//!
//! A token is read the way `strtoll` reads it in base 10: leading
//! whitespace is skipped, then an optional sign, then the longest run of
//! decimal digits. Anything after the digits is left unconsumed and does
//! not make the token invalid.

use std::fmt;
use std::num::IntErrorKind;

use thiserror::Error;

/// The boundary of the `i64` range that a token crossed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Max,
    Min,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Max => write!(f, "exceeds {}", i64::MAX),
            Bound::Min => write!(f, "is below {}", i64::MIN),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum OperandError {
    #[error("value out of range: {bound}")]
    Range { bound: Bound },

    #[error("no leading decimal integer")]
    Syntax,
}

/// A successfully scanned token: its value and whatever followed the
/// digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scanned<'a> {
    pub value: i64,
    pub rest: &'a str,
}

// isspace() in the C locale; u8::is_ascii_whitespace leaves out \v
fn is_c_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

pub fn scan_operand(token: &str) -> Result<Scanned<'_>, OperandError> {
    let bytes = token.as_bytes();
    let start = bytes.iter().position(|&b| !is_c_space(b)).unwrap_or(bytes.len());

    let mut end = start;
    if matches!(bytes.get(end), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    if end == digits_start {
        return Err(OperandError::Syntax);
    }

    // sign and digits are ASCII, so both slice boundaries are char boundaries
    let value = token[start..end].parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => OperandError::Range { bound: Bound::Max },
        IntErrorKind::NegOverflow => OperandError::Range { bound: Bound::Min },
        _ => OperandError::Syntax,
    })?;
    Ok(Scanned { value, rest: &token[end..] })
}

/// Converts `token` into the exact `i64` its leading integer denotes.
///
/// Trailing characters after the digits are ignored; use [`scan_operand`]
/// to see them.
pub fn parse_operand(token: &str) -> Result<i64, OperandError> {
    scan_operand(token).map(|scanned| scanned.value)
}
