//! Cell-level parsers for the review table.
//!
//! Strict parsers return a [`DashboardError::InvalidValue`] naming the
//! column and row; lenient parsers return `None` and let the caller pick a
//! fallback.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{DashboardError, Result};
use crate::utils::{clean_numeric_string, is_missing_marker, parse_integer};

/// Date-only layouts, tried in order. Slash dates are year-first only, since
/// `04/03/2022` is ambiguous between day-first and month-first.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Date-time layouts, tried in order. `%.f` also accepts a missing fraction.
const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
];

/// Offset-aware layouts as written by tz-aware exports.
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Normalize a raw cell: trimmed, with blanks and missing markers as `None`.
pub(crate) fn non_missing(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !is_missing_marker(value))
}

/// Parse a required integer cell.
///
/// Missing values and non-integers are schema violations.
pub(crate) fn require_integer(column: &str, row: usize, raw: Option<&str>) -> Result<i64> {
    let Some(value) = non_missing(raw) else {
        return Err(DashboardError::invalid_value(
            column,
            row,
            raw.unwrap_or_default(),
            "missing value",
        ));
    };

    parse_integer(value)
        .ok_or_else(|| DashboardError::invalid_value(column, row, value, "not an integer"))
}

/// Parse a required integer cell and check it lies in `min..=max`.
pub(crate) fn require_integer_in_range(
    column: &str,
    row: usize,
    raw: Option<&str>,
    min: i64,
    max: i64,
) -> Result<i64> {
    let value = require_integer(column, row, raw)?;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(DashboardError::invalid_value(
            column,
            row,
            value.to_string(),
            format!("expected a value between {min} and {max}"),
        ))
    }
}

/// Parse a non-negative count such as `thumbs_up_count`.
///
/// Thousands separators are tolerated; negative counts clamp to zero.
pub(crate) fn parse_count(raw: Option<&str>) -> Option<u64> {
    let value = non_missing(raw)?;
    parse_integer(&clean_numeric_string(value)).map(|n| n.max(0) as u64)
}

/// Parse a review date, returning `None` for anything unrecognized.
pub fn parse_review_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if is_missing_marker(value) {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime.date());
        }
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.date_naive());
    }

    for format in OFFSET_FORMATS {
        if let Ok(datetime) = DateTime::parse_from_str(value, format) {
            return Some(datetime.date_naive());
        }
    }

    None
}
