//! Chart derivation from table fields.

use crate::form::TableRow;
use crate::types::{ChartData, ChartPoint, ChartType};

/// Row labels that mark table-internal subtotals rather than data points.
const AGGREGATE_LABELS: &[&str] = &["total", "net surplus / (deficit)", "grand total"];

/// Whether a row label names an aggregate row.
pub fn is_aggregate_label(label: &str) -> bool {
    let label = label.trim().to_lowercase();
    AGGREGATE_LABELS.contains(&label.as_str())
}

/// Derives chart series from tables.
#[derive(Debug, Clone)]
pub struct ChartDeriver {
    /// Largest point count still drawn as a pie; more points become a bar chart.
    pie_max_points: usize,
}

impl Default for ChartDeriver {
    fn default() -> Self {
        Self { pie_max_points: 5 }
    }
}

impl ChartDeriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the largest point count still drawn as a pie.
    pub fn with_pie_max_points(mut self, points: usize) -> Self {
        self.pie_max_points = points;
        self
    }

    /// Chart type for a series of `points` data points.
    pub fn chart_type_for(&self, points: usize) -> ChartType {
        if points > self.pie_max_points {
            ChartType::Bar
        } else {
            ChartType::Pie
        }
    }

    /// Derive a chart from a table, if it has anything worth charting.
    ///
    /// The first column holds labels; the value column is the first later
    /// column in which any row holds a number.
    pub fn derive(&self, headers: &[String], rows: &[TableRow]) -> Option<ChartData> {
        if headers.len() < 2 {
            return None;
        }

        let value_idx = (1..headers.len()).find(|&idx| {
            rows.iter()
                .any(|row| row.number_for(&headers[idx], idx).is_some())
        })?;

        let points: Vec<ChartPoint> = rows
            .iter()
            .filter_map(|row| {
                let label = row.text_for(&headers[0], 0);
                let value = row.number_for(&headers[value_idx], value_idx)?;
                if label.is_empty() || is_aggregate_label(&label) {
                    return None;
                }
                Some(ChartPoint { label, value })
            })
            .collect();

        if points.is_empty() || points.iter().all(|p| p.value == 0.0) {
            log::debug!(
                "No chartable points in column '{}'",
                headers[value_idx]
            );
            return None;
        }

        Some(ChartData {
            chart_type: self.chart_type_for(points.len()),
            label_column: headers[0].clone(),
            value_column: headers[value_idx].clone(),
            points,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn rows(value: serde_json::Value) -> Vec<TableRow> {
        value
            .as_array()
            .unwrap()
            .iter()
            .filter_map(TableRow::from_json)
            .collect()
    }

    fn numbered_rows(n: usize) -> Vec<TableRow> {
        let items: Vec<serde_json::Value> = (1..=n)
            .map(|i| json!({"Item": format!("Item {}", i), "Amount": format!("${}", i * 100)}))
            .collect();
        rows(serde_json::Value::Array(items))
    }

    #[test]
    fn test_requires_two_columns() {
        let deriver = ChartDeriver::new();
        assert!(deriver
            .derive(&headers(&["Item"]), &rows(json!([{"Item": "5"}])))
            .is_none());
    }

    #[test]
    fn test_picks_first_numeric_column() {
        let data = ChartDeriver::new()
            .derive(
                &headers(&["Ministry", "Leader", "Budget", "Spent"]),
                &rows(json!([
                    {"Ministry": "Choir", "Leader": "Ann", "Budget": "", "Spent": "300"},
                    {"Ministry": "Ushers", "Leader": "Bo", "Budget": "$250", "Spent": "100"}
                ])),
            )
            .unwrap();

        assert_eq!(data.value_column, "Budget");
        assert_eq!(data.label_column, "Ministry");
        // Choir has no budget value and is dropped.
        assert_eq!(
            data.points,
            vec![ChartPoint {
                label: "Ushers".to_string(),
                value: 250.0
            }]
        );
    }

    #[test]
    fn test_no_numeric_column() {
        let result = ChartDeriver::new().derive(
            &headers(&["Name", "Role"]),
            &rows(json!([{"Name": "Ann", "Role": "Clerk"}])),
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_filters_aggregate_and_blank_labels() {
        let data = ChartDeriver::new()
            .derive(
                &headers(&["Item", "Amount"]),
                &rows(json!([
                    {"Item": "Tithes", "Amount": "$1,000"},
                    {"Item": "", "Amount": "50"},
                    {"Item": "Offerings", "Amount": "(200)"},
                    {"Item": "TOTAL", "Amount": "800"},
                    {"Item": "Net Surplus / (Deficit)", "Amount": "100"},
                    {"Item": " Grand Total ", "Amount": "900"}
                ])),
            )
            .unwrap();

        let labels: Vec<&str> = data.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Tithes", "Offerings"]);
        assert_eq!(data.points[1].value, -200.0);
    }

    #[test]
    fn test_all_zero_suppressed() {
        let result = ChartDeriver::new().derive(
            &headers(&["Item", "Amount"]),
            &rows(json!([
                {"Item": "Tithes", "Amount": "0"},
                {"Item": "Offerings", "Amount": "$0.00"},
                {"Item": "Total", "Amount": "500"}
            ])),
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_only_aggregate_rows() {
        let result = ChartDeriver::new().derive(
            &headers(&["Item", "Amount"]),
            &rows(json!([{"Item": "Total", "Amount": "$1,200"}])),
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_chart_type_boundary() {
        let h = headers(&["Item", "Amount"]);
        let deriver = ChartDeriver::new();

        let five = deriver.derive(&h, &numbered_rows(5)).unwrap();
        assert_eq!(five.chart_type, ChartType::Pie);
        assert_eq!(five.points.len(), 5);

        let six = deriver.derive(&h, &numbered_rows(6)).unwrap();
        assert_eq!(six.chart_type, ChartType::Bar);
    }

    #[test]
    fn test_custom_pie_threshold() {
        let deriver = ChartDeriver::new().with_pie_max_points(2);
        let data = deriver
            .derive(&headers(&["Item", "Amount"]), &numbered_rows(3))
            .unwrap();
        assert_eq!(data.chart_type, ChartType::Bar);
    }

    #[test]
    fn test_positional_rows() {
        let data = ChartDeriver::new()
            .derive(
                &headers(&["Label", "Value"]),
                &rows(json!([{"col1": "A", "col2": 5}, {"col1": "B", "col2": 7}])),
            )
            .unwrap();
        assert_eq!(data.points.len(), 2);
        assert_eq!(data.points[1].value, 7.0);
    }
}
