//! Numeric-then-string ordering of stored attribute values.
//!
//! Stored values carry no type, so ordering by an attribute compares the
//! leading numeric part of each value first (non-numeric values count as
//! zero) and breaks ties with a plain string comparison. This is the same
//! result a SQL `ORDER BY CAST(v AS DECIMAL), v` gives over text columns.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Direction of an ordered listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parses `asc`/`desc` case-insensitively; anything else is ascending.
    pub fn parse_lenient(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// Returns the numeric value of the leading number in `value`, or 0.
pub fn numeric_prefix(value: &str) -> f64 {
    let trimmed = value.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;
    if end < bytes.len() && (bytes[end] == b'-' || bytes[end] == b'+') {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac = end + 1;
        while frac < bytes.len() && bytes[frac].is_ascii_digit() {
            frac += 1;
        }
        if frac > end + 1 {
            end = frac;
        }
    }
    if end == digits_start {
        return 0.0;
    }
    trimmed[..end].parse::<f64>().unwrap_or(0.0)
}

/// Compares two stored values: numeric prefix first, then string.
pub fn compare_numeric_then_string(a: &str, b: &str) -> Ordering {
    numeric_prefix(a)
        .partial_cmp(&numeric_prefix(b))
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.cmp(b))
}

/// Compares optional values; absent values sort after present ones in
/// either direction.
pub fn compare_optional(a: Option<&str>, b: Option<&str>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => direction.apply(compare_numeric_then_string(a, b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
