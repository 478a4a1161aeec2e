//! Form data captured against a template.
//!
//! Values arrive as loosely shaped JSON (whatever the form saved). They are
//! interpreted lazily, by the declared type of the field they belong to, and
//! anything of the wrong shape reads as empty.

use crate::template::{Field, FieldKind};
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Row key holding per-row photo references.
pub const PHOTOS_KEY: &str = "photos";

/// Row key holding per-column help text.
pub const TOOLTIPS_KEY: &str = "tooltips";

/// Mapping from section id to field id to raw value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData {
    sections: Map<String, Value>,
}

impl FormData {
    /// Create empty form data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse form data from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the raw value of one field.
    pub fn set(&mut self, section_id: &str, field_id: &str, value: Value) {
        let section = self
            .sections
            .entry(section_id.to_string())
            .or_insert_with(|| Value::Object(Map::new()));

        if !section.is_object() {
            *section = Value::Object(Map::new());
        }
        if let Value::Object(fields) = section {
            fields.insert(field_id.to_string(), value);
        }
    }

    /// Builder-style variant of [`FormData::set`].
    pub fn with(mut self, section_id: &str, field_id: &str, value: Value) -> Self {
        self.set(section_id, field_id, value);
        self
    }

    /// The raw stored value of one field.
    pub fn raw(&self, section_id: &str, field_id: &str) -> Option<&Value> {
        self.sections.get(section_id)?.as_object()?.get(field_id)
    }

    /// The stored value of a field, interpreted according to its declared type.
    pub fn value(&self, section_id: &str, field: &Field) -> FieldValue {
        let Some(raw) = self.raw(section_id, &field.id) else {
            return FieldValue::Empty;
        };

        match &field.kind {
            FieldKind::Text | FieldKind::Textarea | FieldKind::Number | FieldKind::Date => {
                scalar_text(raw).map_or(FieldValue::Empty, FieldValue::Text)
            }
            FieldKind::BulletList => FieldValue::List(string_list(raw)),
            FieldKind::PhotoCollection => FieldValue::Photos(image_list(raw)),
            FieldKind::Table { .. } => FieldValue::Table(
                raw.as_array()
                    .map(|rows| rows.iter().filter_map(TableRow::from_json).collect())
                    .unwrap_or_default(),
            ),
            FieldKind::Signature => Signature::from_json(raw)
                .map_or(FieldValue::Empty, FieldValue::Signature),
        }
    }

    /// Trimmed scalar text of a field, looked up by id only.
    pub fn text(&self, section_id: &str, field_id: &str) -> Option<String> {
        self.raw(section_id, field_id).and_then(scalar_text)
    }
}

/// A field value interpreted by field type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Nothing stored, or stored in an unusable shape.
    Empty,
    Text(String),
    List(Vec<String>),
    Photos(Vec<String>),
    Table(Vec<TableRow>),
    Signature(Signature),
}

/// A sign-off record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: String,
}

impl Signature {
    fn from_json(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let signature = Self {
            name: obj.get("name").and_then(scalar_text).unwrap_or_default(),
            date: obj.get("date").and_then(scalar_text).unwrap_or_default(),
        };
        if signature.name.is_empty() && signature.date.is_empty() {
            None
        } else {
            Some(signature)
        }
    }
}

/// A scalar table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Bool(bool),
    Text(String),
    Null,
}

impl CellValue {
    /// Convert a JSON value into a cell. Arrays and objects are not scalars.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(n) => n.as_f64().map_or(CellValue::Null, CellValue::Number),
            Value::Bool(b) => CellValue::Bool(*b),
            Value::String(s) => CellValue::Text(s.clone()),
            Value::Null | Value::Array(_) | Value::Object(_) => CellValue::Null,
        }
    }

    /// Whether the cell displays as blank.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Null => true,
            CellValue::Number(_) | CellValue::Bool(_) => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Null => Ok(()),
        }
    }
}

/// One row of a table field.
///
/// Column cells keep the order in which they were stored; the reserved
/// `photos` and `tooltips` keys are lifted out so they never take part in
/// positional column lookups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRow {
    /// Column key and value pairs, in stored order.
    pub cells: Vec<(String, CellValue)>,

    /// Photo references attached to the row.
    pub photos: Vec<String>,

    /// Help text keyed by column key.
    pub tooltips: BTreeMap<String, String>,
}

impl TableRow {
    /// Create a row from key/value pairs.
    pub fn new<I, K>(cells: I) -> Self
    where
        I: IntoIterator<Item = (K, CellValue)>,
        K: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            photos: Vec::new(),
            tooltips: BTreeMap::new(),
        }
    }

    /// Parse a row from its stored JSON object. Non-objects are not rows.
    pub fn from_json(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let mut row = TableRow::default();

        for (key, value) in obj {
            match key.as_str() {
                PHOTOS_KEY => row.photos = image_list(value),
                TOOLTIPS_KEY => {
                    if let Some(tips) = value.as_object() {
                        row.tooltips = tips
                            .iter()
                            .filter_map(|(k, v)| scalar_text(v).map(|t| (k.clone(), t)))
                            .collect();
                    }
                }
                _ => row.cells.push((key.clone(), CellValue::from_json(value))),
            }
        }

        Some(row)
    }

    /// Whether every cell in the row is blank.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, v)| v.is_blank())
    }
}

/// Trimmed text of a scalar JSON value; `None` when blank or not a scalar.
pub fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(_) | Value::Bool(_) => CellValue::from_json(value).to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Non-blank entries of a list value, trimmed, in order.
fn string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| items.iter().filter_map(scalar_text).collect())
        .unwrap_or_default()
}

/// Non-blank image references of a list value, in order.
fn image_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_lifts_reserved_keys() {
        let row = TableRow::from_json(&json!({
            "Item": "Offerings",
            "photos": ["a.png", "", "b.png"],
            "Amount": "$1,200",
            "tooltips": {"Amount": "Gross receipts"}
        }))
        .unwrap();

        let keys: Vec<&str> = row.cells.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["Item", "Amount"]);
        assert_eq!(row.photos, vec!["a.png", "b.png"]);
        assert_eq!(row.tooltips.get("Amount").unwrap(), "Gross receipts");
    }

    #[test]
    fn test_row_keeps_document_order() {
        let row = TableRow::from_json(&json!({"zeta": 1, "alpha": 2, "mid": 3})).unwrap();
        let keys: Vec<&str> = row.cells.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_non_object_rows_are_skipped() {
        let field = Field::table("t", "T", ["A"]);
        let data = FormData::new().with("s", "t", json!([{"A": "x"}, "junk", 3, null]));

        match data.value("s", &field) {
            FieldValue::Table(rows) => assert_eq!(rows.len(), 1),
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_scalar_values() {
        let field = Field::new("members", "Members", FieldKind::Number);
        let data = FormData::new()
            .with("m", "members", json!(120))
            .with("m", "blank", json!("   "));

        assert_eq!(data.value("m", &field), FieldValue::Text("120".to_string()));

        // Scalars and table cells render numbers the same way.
        let data = data.with("m", "members", json!(1.0));
        assert_eq!(data.value("m", &field), FieldValue::Text("1".to_string()));
        assert_eq!(CellValue::from_json(&json!(1.0)).to_string(), "1");
        assert_eq!(data.text("m", "members").as_deref(), Some("1"));

        let blank = Field::new("blank", "Blank", FieldKind::Text);
        assert_eq!(data.value("m", &blank), FieldValue::Empty);

        let missing = Field::new("nope", "Nope", FieldKind::Text);
        assert_eq!(data.value("m", &missing), FieldValue::Empty);
    }

    #[test]
    fn test_wrong_shapes_read_as_empty() {
        let list = Field::new("l", "L", FieldKind::BulletList);
        let data = FormData::new().with("s", "l", json!("not a list"));
        assert_eq!(data.value("s", &list), FieldValue::List(Vec::new()));

        let text = Field::new("l", "L", FieldKind::Text);
        let data = FormData::new().with("s", "l", json!(["a", "b"]));
        assert_eq!(data.value("s", &text), FieldValue::Empty);
    }

    #[test]
    fn test_signature() {
        let field = Field::new("treasurer", "Treasurer", FieldKind::Signature);
        let data = FormData::new().with(
            "signatures",
            "treasurer",
            json!({"name": "Jane Doe", "date": "2025-04-01"}),
        );

        assert_eq!(
            data.value("signatures", &field),
            FieldValue::Signature(Signature {
                name: "Jane Doe".to_string(),
                date: "2025-04-01".to_string(),
            })
        );
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(CellValue::Number(1200.0).to_string(), "1200");
        assert_eq!(CellValue::Number(12.5).to_string(), "12.5");
        assert_eq!(CellValue::Null.to_string(), "");
        assert!(CellValue::Text("  ".to_string()).is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
    }

    #[test]
    fn test_form_data_from_json() {
        let data = FormData::from_json_str(r#"{"header": {"quarter": " Q1 2025 "}}"#).unwrap();
        assert_eq!(data.text("header", "quarter").as_deref(), Some("Q1 2025"));
        assert_eq!(data.text("header", "preparedBy"), None);
    }
}
