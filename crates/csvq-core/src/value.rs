//! Numeric-or-text coercion used by comparisons and aggregation.

use std::cmp::Ordering;

/// A cell or literal after coercion.
///
/// Only lives for the duration of a comparison; tables always store text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComparableValue<'a> {
    Number(f64),
    Text(&'a str),
}

impl ComparableValue<'_> {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Text(_) => "text",
        }
    }

    /// Orders two values of the same kind.
    ///
    /// Numbers compare numerically, text compares lexically. Mixed kinds have
    /// no ordering and return `None`.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Number(_), Self::Text(_)) | (Self::Text(_), Self::Number(_)) => None,
        }
    }
}

/// Parse a string in decimal notation to `f64`.
///
/// Accepts an optional sign, digits, an optional fractional part and an
/// optional exponent, surrounded by optional ASCII whitespace. Spellings such
/// as `inf` or `nan` are not numbers here.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim_ascii();
    if trimmed.is_empty() {
        return None;
    }
    let decimal_chars = trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !decimal_chars {
        return None;
    }
    trimmed.parse().ok()
}

/// Coerce `text` to a number when it parses as one, otherwise keep the text.
pub fn coerce(text: &str) -> ComparableValue<'_> {
    match parse_number(text) {
        Some(number) => ComparableValue::Number(number),
        None => ComparableValue::Text(text),
    }
}
