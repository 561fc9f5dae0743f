//! Code generation and validation helpers
//!
//! Item and warehouse codes share one scheme: a fixed prefix followed by a
//! zero-padded sequence number. New codes take the next number after the
//! highest one in use.

use chrono::{Datelike, NaiveDate};

/// Minimum width of the numeric part of a generated code
pub const CODE_SEQUENCE_WIDTH: usize = 3;

/// Parse the sequence number of a code like `ITEM042` for the given prefix.
///
/// Returns `None` unless the whole code is the prefix followed by one or more
/// ASCII digits.
pub fn code_sequence(code: &str, prefix: &str) -> Option<u32> {
    let digits = code.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Next unused code for `prefix`, scanning the codes already in use
pub fn next_sequential_code<'a, I>(prefix: &str, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let next = existing
        .into_iter()
        .filter_map(|code| code_sequence(code, prefix))
        .max()
        .map_or(1, |max| max.saturating_add(1));

    format!("{}{:0width$}", prefix, next, width = CODE_SEQUENCE_WIDTH)
}

/// Validate a caller-supplied natural key (non-empty, no surrounding whitespace)
pub fn validate_natural_key(key: &str) -> Result<(), &'static str> {
    if key.is_empty() {
        return Err("Code must not be empty");
    }
    if key.trim() != key {
        return Err("Code must not start or end with whitespace");
    }
    Ok(())
}

/// Calendar-month bucket key in `YYYY-MM` form
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}
