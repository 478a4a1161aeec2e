//! Report template schema: sections and typed fields.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Section id whose fields feed the title slide.
pub const HEADER_SECTION: &str = "header";

/// Section id that holds sign-off fields and never becomes a slide.
pub const SIGNATURES_SECTION: &str = "signatures";

/// A report template: an ordered list of sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Template identifier.
    #[serde(default)]
    pub id: String,

    /// Display title, used for the title slide.
    #[serde(alias = "name")]
    pub title: String,

    /// Sections in display order.
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Template {
    /// Create an empty template with the given id and title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// Parse a template from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Append a section.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Look up a section by id.
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Sections that produce content slides, in declared order.
    pub fn content_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections
            .iter()
            .filter(|s| s.id != HEADER_SECTION && s.id != SIGNATURES_SECTION)
    }

    /// Describe every structural problem in the template.
    pub fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let mut section_ids = HashSet::new();

        for section in &self.sections {
            if !section_ids.insert(section.id.as_str()) {
                issues.push(format!("duplicate section id '{}'", section.id));
            }

            let mut field_ids = HashSet::new();
            for field in &section.fields {
                if !field_ids.insert(field.id.as_str()) {
                    issues.push(format!(
                        "duplicate field id '{}' in section '{}'",
                        field.id, section.id
                    ));
                }
                if let FieldKind::Table { columns, .. } = &field.kind {
                    if columns.is_empty() {
                        issues.push(format!(
                            "table field '{}.{}' declares no columns",
                            section.id, field.id
                        ));
                    }
                }
            }
        }

        issues
    }

    /// Fail on the first structural problem, if any.
    pub fn validate(&self) -> Result<()> {
        match self.issues().into_iter().next() {
            Some(issue) => Err(Error::InvalidTemplate(issue)),
            None => Ok(()),
        }
    }
}

/// A titled group of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Section {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field.
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }
}

/// A single form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Identifier, unique within its section.
    pub id: String,

    /// Display label.
    #[serde(default)]
    pub label: String,

    /// Field type and its type-specific metadata.
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl Field {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
        }
    }

    /// Convenience constructor for a table field.
    pub fn table<I, S>(id: impl Into<String>, label: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            id,
            label,
            FieldKind::Table {
                columns: columns.into_iter().map(Into::into).collect(),
                allow_photos: false,
            },
        )
    }

    /// The label, or `fallback` when the label is blank.
    pub fn label_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.label.trim().is_empty() {
            fallback
        } else {
            &self.label
        }
    }
}

/// Field type tag, keyed by `type` in template JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FieldKind {
    Text,
    Textarea,
    Number,
    Date,
    Table {
        /// Column headers in display order.
        #[serde(default)]
        columns: Vec<String>,

        /// Whether each row may carry uploaded photos.
        #[serde(default, rename = "allowPhotos", alias = "allow_photos")]
        allow_photos: bool,
    },
    #[serde(alias = "bullets")]
    BulletList,
    Signature,
    PhotoCollection,
}
