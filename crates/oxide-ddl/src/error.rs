//! Error types for DDL translation.

/// Errors that can occur while loading translations or rendering SQL.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// A required field is missing on a definition being rendered.
    #[error("Invalid definition for table '{table}': {field} {message}")]
    Validation {
        /// Table the definition belongs to (empty when rendering a lone column).
        table: String,
        /// Offending field name.
        field: &'static str,
        /// What is wrong with the field.
        message: String,
    },

    /// A vendor name could not be parsed.
    #[error("Unknown database vendor: {0}")]
    UnknownVendor(String),

    /// The same keyword was mapped twice for one vendor.
    #[error("Duplicate translation for keyword '{keyword}' ({vendor})")]
    DuplicateTranslation {
        /// The keyword, as it appears in the source entry.
        keyword: String,
        /// The vendor the keyword was mapped for.
        vendor: String,
    },

    /// IO error while reading a translation file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A translation file is not valid JSON.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TranslateError {
    /// Builds a validation error for a required field left empty.
    pub(crate) fn required(table: &str, field: &'static str) -> Self {
        Self::Validation {
            table: table.to_string(),
            field,
            message: "is required".to_string(),
        }
    }
}

/// Result type for translation operations.
pub type Result<T> = std::result::Result<T, TranslateError>;
