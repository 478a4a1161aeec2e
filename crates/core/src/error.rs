//! Error types for loading and validating report templates.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading report inputs.
///
/// Slide resolution itself never fails; these only surface when reading
/// templates or form data, or when a caller asks for strict validation.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read an input file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The template or form data is not valid JSON for its schema.
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The template is structurally invalid (duplicate ids, tables without columns).
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),
}
