//! Error types for dnaret

use thiserror::Error;

/// Result type alias for dnaret operations
pub type Result<T> = std::result::Result<T, DnaretError>;

/// Main error type for dnaret
#[derive(Error, Debug)]
pub enum DnaretError {
    #[error("Invalid document value for field '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Record is missing required field '{0}'")]
    MissingField(String),

    #[error("Invalid record '{name}': {reason}")]
    InvalidRecord { name: String, reason: String },
}

impl DnaretError {
    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid record error
    pub fn invalid_record(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
