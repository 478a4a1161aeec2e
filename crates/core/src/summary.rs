//! Executive-summary KPI discovery.
//!
//! Scans table fields for aggregate rows (totals, surpluses, deficits) and
//! lifts their first numeric value into a KPI.

use crate::form::{FieldValue, FormData, TableRow};
use crate::template::{FieldKind, Template};
use crate::types::Kpi;

/// Substrings that mark a row as an aggregate worth summarizing.
const KPI_MARKERS: &[&str] = &["total", "surplus", "deficit"];

/// Collects KPIs for the executive-summary slide.
#[derive(Debug, Clone)]
pub struct KpiCollector {
    min_kpis: usize,
    max_kpis: usize,
}

impl Default for KpiCollector {
    fn default() -> Self {
        Self {
            min_kpis: 2,
            max_kpis: 4,
        }
    }
}

impl KpiCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many KPIs are needed before a summary is worth showing.
    pub fn with_min_kpis(mut self, min: usize) -> Self {
        self.min_kpis = min.max(1); // An empty summary is never shown
        self
    }

    /// Set how many KPIs a summary shows at most.
    pub fn with_max_kpis(mut self, max: usize) -> Self {
        self.max_kpis = max.max(1);
        self
    }

    /// Every KPI found across content sections, in discovery order.
    pub fn discover(&self, template: &Template, data: &FormData) -> Vec<Kpi> {
        let mut kpis = Vec::new();

        for section in template.content_sections() {
            for field in &section.fields {
                let FieldKind::Table { columns, .. } = &field.kind else {
                    continue;
                };
                if columns.is_empty() {
                    continue;
                }
                let FieldValue::Table(rows) = data.value(&section.id, field) else {
                    continue;
                };

                for row in &rows {
                    if let Some((value, header, row_label)) = aggregate_value(row, columns) {
                        let label = if field.label.trim().is_empty() {
                            header.to_string()
                        } else {
                            field.label.clone()
                        };
                        kpis.push(Kpi {
                            label,
                            value,
                            row_label,
                        });
                    }
                }
            }
        }

        kpis
    }

    /// KPIs for the summary slide, or `None` when too few were found.
    pub fn collect(&self, template: &Template, data: &FormData) -> Option<Vec<Kpi>> {
        let mut kpis = self.discover(template, data);
        if kpis.len() < self.min_kpis {
            log::debug!(
                "Skipping executive summary: {} KPI(s) found, {} needed",
                kpis.len(),
                self.min_kpis
            );
            return None;
        }
        kpis.truncate(self.max_kpis);
        Some(kpis)
    }
}

/// Whether a row label marks an aggregate row.
fn is_kpi_label(label: &str) -> bool {
    let label = label.to_lowercase();
    KPI_MARKERS.iter().any(|m| label.contains(m))
}

/// The first numeric value after the label column of an aggregate row,
/// with the header it came from and the row's label.
fn aggregate_value<'a>(row: &TableRow, columns: &'a [String]) -> Option<(f64, &'a str, String)> {
    let row_label = row.text_for(&columns[0], 0);
    if !is_kpi_label(&row_label) {
        return None;
    }

    columns
        .iter()
        .enumerate()
        .skip(1)
        .find_map(|(idx, header)| {
            row.number_for(header, idx)
                .map(|value| (value, header.as_str()))
        })
        .map(|(value, header)| (value, header, row_label))
}
