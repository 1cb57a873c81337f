//! Shared utilities for the review dashboard pipeline.
//!
//! This module contains common helper functions used across multiple modules
//! to reduce code duplication and ensure consistency.

// =============================================================================
// String Parsing Utilities
// =============================================================================

/// Characters commonly used in count formatting that should be stripped.
pub const NUMERIC_FORMAT_CHARS: [char; 3] = [',', '_', ' '];

/// Cell values that tabular exports use to mean "no value".
pub const MISSING_MARKERS: [&str; 7] = ["na", "n/a", "nan", "null", "none", "#n/a", "<na>"];

/// Clean a string for numeric parsing by removing formatting characters.
///
/// # Example
///
/// ```rust,ignore
/// use review_dashboard::utils::clean_numeric_string;
///
/// assert_eq!(clean_numeric_string("1,234"), "1234");
/// assert_eq!(clean_numeric_string("  42  "), "42");
/// ```
pub fn clean_numeric_string(s: &str) -> String {
    let mut result = s.trim().to_string();
    for c in NUMERIC_FORMAT_CHARS {
        result = result.replace(c, "");
    }
    result
}

/// Check if a cell is blank or a missing-value marker.
pub fn is_missing_marker(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.is_empty() || MISSING_MARKERS.iter().any(|&marker| lower == marker)
}

/// Parse an integer, accepting integral floats such as `"4.0"`.
///
/// Returns `None` for blanks, non-numeric text and floats with a
/// fractional part.
pub fn parse_integer(s: &str) -> Option<i64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }
    let value = trimmed.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

// =============================================================================
// Numeric Utilities
// =============================================================================

/// Round to `decimals` places, ties to even on the scaled value.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Arithmetic mean, `None` for an empty input.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Share of `part` in `total` as a percentage rounded to one decimal.
///
/// An empty total yields 0.0.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to(part as f64 / total as f64 * 100.0, 1)
}

// =============================================================================
// Text Utilities
// =============================================================================

/// Keep at most `max_chars` characters of `s`.
///
/// Counts Unicode scalar values, so multi-byte text is never split
/// mid-character.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => s[..byte_idx].to_string(),
        None => s.to_string(),
    }
}

// =============================================================================
// Tests
// =============================================================================
