//! Numeric normalization for report amounts.
//!
//! Handles currency symbols, thousands separators and accounting-style
//! negatives such as `(1,234.50)`.

use crate::form::CellValue;
use regex::Regex;
use std::sync::LazyLock;

/// Regex matching everything stripped before parsing: `$`, `,`, whitespace and parentheses.
static AMOUNT_NOISE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[$,\s()]").unwrap());

/// Regex matching a plain decimal number, optionally signed.
static DECIMAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)$").unwrap());

/// Parse a textual amount into a number.
///
/// Returns `None` for absent, blank or unparseable input. A value wrapped in
/// parentheses is negative regardless of any sign inside it.
pub fn parse_amount(raw: Option<&str>) -> Option<f64> {
    let trimmed = raw?.trim();
    let accounting_negative =
        trimmed.len() >= 2 && trimmed.starts_with('(') && trimmed.ends_with(')');

    let cleaned = AMOUNT_NOISE_REGEX.replace_all(trimmed, "");
    if !DECIMAL_REGEX.is_match(&cleaned) {
        return None;
    }

    let value: f64 = cleaned.parse().ok()?;
    if accounting_negative {
        Some(-value.abs())
    } else {
        Some(value)
    }
}

/// Numeric value of a table cell.
///
/// Numbers pass through; text goes through [`parse_amount`].
pub fn cell_number(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Number(n) if n.is_finite() => Some(*n),
        CellValue::Text(s) => parse_amount(Some(s)),
        CellValue::Number(_) | CellValue::Bool(_) | CellValue::Null => None,
    }
}
