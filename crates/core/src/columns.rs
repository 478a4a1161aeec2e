//! Column lookup for table rows whose keys may have drifted from the
//! declared headers.
//!
//! Resolution order, first match wins:
//! 1. a key identical to the header,
//! 2. the single key equal to the header under case folding,
//! 3. the key at the header's position among the row's column keys.

use crate::form::{CellValue, TableRow};
use crate::normalize::cell_number;
use unicode_normalization::UnicodeNormalization;

/// Fold a key for case-insensitive comparison.
pub fn fold_key(key: &str) -> String {
    key.nfkc().collect::<String>().to_lowercase()
}

impl TableRow {
    /// Resolve the cell for a declared header.
    pub fn value_for(&self, header: &str, index: usize) -> Option<&CellValue> {
        if let Some((_, value)) = self.cells.iter().find(|(key, _)| key == header) {
            return Some(value);
        }

        let folded = fold_key(header);
        let mut matches = self.cells.iter().filter(|(key, _)| fold_key(key) == folded);
        if let (Some((_, value)), None) = (matches.next(), matches.next()) {
            return Some(value);
        }

        self.cells.get(index).map(|(_, value)| value)
    }

    /// Display text for a declared header; empty when unresolved.
    pub fn text_for(&self, header: &str, index: usize) -> String {
        self.value_for(header, index)
            .map(|v| v.to_string().trim().to_string())
            .unwrap_or_default()
    }

    /// Numeric value for a declared header; `None` when unresolved or not a number.
    pub fn number_for(&self, header: &str, index: usize) -> Option<f64> {
        self.value_for(header, index).and_then(cell_number)
    }

    /// Display text for every declared header, in header order.
    pub fn resolve(&self, headers: &[String]) -> Vec<String> {
        headers
            .iter()
            .enumerate()
            .map(|(idx, header)| self.text_for(header, idx))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: serde_json::Value) -> TableRow {
        TableRow::from_json(&value).unwrap()
    }

    #[test]
    fn test_exact_match() {
        let r = row(json!({"Amount": "5", "amount": "7"}));
        assert_eq!(r.text_for("Amount", 5), "5");
        assert_eq!(r.text_for("amount", 5), "7");
    }

    #[test]
    fn test_case_insensitive_match() {
        let r = row(json!({"Amount": 10}));
        assert_eq!(r.value_for("amount", 3), Some(&CellValue::Number(10.0)));
        assert_eq!(r.number_for("AMOUNT", 3), Some(10.0));
    }

    #[test]
    fn test_ambiguous_case_match_falls_back_to_position() {
        let r = row(json!({"AMOUNT": "1", "Amount ": "2", "amount": "3"}));
        // "amount" is an exact match.
        assert_eq!(r.text_for("amount", 0), "3");

        let r = row(json!({"AMOUNT": "1", "Amount": "2"}));
        assert_eq!(r.text_for("amount", 0), "1");
        assert_eq!(r.text_for("amount", 1), "2");
    }

    #[test]
    fn test_positional_fallback() {
        let r = row(json!({"col1": "X", "col2": 5}));
        assert_eq!(r.value_for("Label", 0), Some(&CellValue::Text("X".to_string())));
        assert_eq!(r.value_for("Value", 1), Some(&CellValue::Number(5.0)));
        assert_eq!(r.value_for("Extra", 2), None);
    }

    #[test]
    fn test_positional_fallback_skips_reserved_keys() {
        let r = row(json!({"photos": ["p.png"], "tooltips": {}, "a": "first", "b": "second"}));
        assert_eq!(r.text_for("Label", 0), "first");
        assert_eq!(r.text_for("Value", 1), "second");
    }

    #[test]
    fn test_header_match_beats_position() {
        // Headers were reordered after the data was captured.
        let r = row(json!({"Item": "Rent", "Amount": "$900"}));
        let headers = vec!["Amount".to_string(), "Item".to_string()];
        assert_eq!(r.resolve(&headers), vec!["$900", "Rent"]);
    }

    #[test]
    fn test_unresolved_is_empty() {
        let r = row(json!({}));
        assert_eq!(r.text_for("Anything", 0), "");
        assert_eq!(r.number_for("Anything", 0), None);
    }

    #[test]
    fn test_fold_key_normalizes_compatibility_forms() {
        assert_eq!(fold_key("ＡＭＯＵＮＴ"), "amount");
        assert_eq!(fold_key("Amount"), "amount");
    }
}
