//! Deterministic decimal-string to integer-micros conversion.
//!
//! Prices stay as decimal strings at the storage boundary so this crate
//! can convert them without floating-point rounding.

use std::fmt;

/// Micros per currency unit.
const SCALE_DIGITS: usize = 6;

/// Errors produced during micro conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MicrosError {
    /// The value string was empty.
    Empty { field: &'static str },
    /// The value string could not be parsed as a decimal number.
    Invalid { field: &'static str, raw: String },
    /// More than 6 decimal places (would require rounding).
    TooManyDecimalPlaces { field: &'static str, raw: String },
    /// The value does not fit in i64 micros.
    Overflow { field: &'static str, raw: String },
}

impl fmt::Display for MicrosError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MicrosError::Empty { field } => write!(f, "field '{field}' is empty"),
            MicrosError::Invalid { field, raw } => {
                write!(f, "field '{field}' could not be parsed: '{raw}'")
            }
            MicrosError::TooManyDecimalPlaces { field, raw } => write!(
                f,
                "field '{field}' has more than 6 decimal places \
                 (ambiguous micro conversion): '{raw}'"
            ),
            MicrosError::Overflow { field, raw } => {
                write!(f, "field '{field}' overflows i64 micros: '{raw}'")
            }
        }
    }
}

impl std::error::Error for MicrosError {}

/// Convert a decimal string to integer micros deterministically.
///
/// Rules:
/// - Accepts an optional leading `+` or `-`.
/// - Accepts an optional fractional part separated by `.`.
/// - Rejects strings with more than 6 decimal places.
/// - Rejects empty strings, non-digit characters, multiple separators.
/// - Does **not** use floating-point at any stage.
pub fn price_to_micros(s: &str, field: &'static str) -> Result<i64, MicrosError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(MicrosError::Empty { field });
    }

    let (negative, digits) = if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (false, rest)
    } else {
        (false, s)
    };

    if digits.is_empty() {
        return Err(MicrosError::Invalid {
            field,
            raw: s.to_string(),
        });
    }

    let mut parts = digits.splitn(2, '.');
    let whole = parts.next().unwrap_or("");
    let frac = parts.next().unwrap_or("");

    if whole.is_empty() && frac.is_empty() {
        return Err(MicrosError::Invalid {
            field,
            raw: s.to_string(),
        });
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(MicrosError::Invalid {
            field,
            raw: s.to_string(),
        });
    }
    if frac.len() > SCALE_DIGITS {
        return Err(MicrosError::TooManyDecimalPlaces {
            field,
            raw: s.to_string(),
        });
    }

    let whole_part: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| MicrosError::Overflow {
            field,
            raw: s.to_string(),
        })?
    };

    let mut frac_padded = frac.to_string();
    while frac_padded.len() < SCALE_DIGITS {
        frac_padded.push('0');
    }
    // Always exactly 6 digits; cannot overflow i64.
    let frac_part: i64 = frac_padded.parse().map_err(|_| MicrosError::Invalid {
        field,
        raw: s.to_string(),
    })?;

    let unsigned = whole_part
        .checked_mul(1_000_000)
        .and_then(|w| w.checked_add(frac_part))
        .ok_or(MicrosError::Overflow {
            field,
            raw: s.to_string(),
        })?;

    Ok(if negative { -unsigned } else { unsigned })
}
