//! Shared helpers for column access and cell parsing.

use crate::error::{DineError, Result};
use polars::prelude::*;

// =============================================================================
// Column Access
// =============================================================================

/// Check whether a DataFrame has a column with this name.
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == name)
}

/// Borrow a column as a materialized Series, or fail with `ColumnNotFound`.
pub fn series<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series> {
    df.column(name)
        .map(|col| col.as_materialized_series())
        .map_err(|_| DineError::ColumnNotFound(name.to_string()))
}

/// Collect a text column into owned optional strings.
pub fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = series(df, name)?;
    let text = series.cast(&DataType::String)?;
    Ok(text
        .str()?
        .into_iter()
        .map(|opt| opt.map(str::to_string))
        .collect())
}

/// Collect a Float64 column into optional values.
pub fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = series(df, name)?;
    let floats = series.cast(&DataType::Float64)?;
    Ok(floats.f64()?.into_iter().collect())
}

// =============================================================================
// Cell Parsing
// =============================================================================

/// Keep only ASCII digits and dots.
///
/// ```rust,ignore
/// assert_eq!(strip_to_numeric("₹1,200"), "1200");
/// ```
pub fn strip_to_numeric(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect()
}

/// Coerce a cell to a finite number; anything else is missing.
pub fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Coerce a cost cell: strip formatting, then parse.
pub fn parse_cost(s: &str) -> Option<f64> {
    parse_number(&strip_to_numeric(s))
}

/// Parse a vote count. Float-looking counts ("120.0") are accepted.
pub fn parse_count(s: &str) -> Option<i64> {
    let trimmed = s.trim();
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| parse_number(trimmed).map(|v| v as i64))
}

/// First comma segment, trimmed and lowercased.
pub fn primary_cuisine(cuisines: &str) -> String {
    cuisines
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}

/// Normalize a free-text preference the way primary cuisines are stored.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

// =============================================================================
// Tests
// =============================================================================
