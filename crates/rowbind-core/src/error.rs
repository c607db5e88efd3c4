//! Error types for row binding.

use thiserror::Error;

/// Errors raised while binding rows onto records.
#[derive(Debug, Error)]
pub enum Error {
    // === Resolution Errors ===
    /// The record's slot table disagrees with its declared shape.
    #[error("invalid destination {record}: {reason}")]
    InvalidDestination { record: &'static str, reason: String },

    /// A destination field has no column in the row.
    #[error("no column in returned row matches struct field {0}")]
    FieldUnmatched(String),

    /// A row column has no destination field.
    #[error("struct doesn't have corresponding field to match returned column {0}")]
    ColumnUnmatched(String),

    /// Two destination fields claim the same column.
    #[error("column {column} is claimed by both struct field {first} and struct field {second}")]
    DuplicateMatch {
        column: String,
        first: String,
        second: String,
    },

    // === Scan Errors ===
    /// A column value could not be converted into its destination field.
    #[error("can't scan column {column}: {source}")]
    Conversion {
        column: String,
        #[source]
        source: ConversionError,
    },

    /// Value count and column (or target) count disagree.
    #[error("expected {expected} values, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    // === Row Count Errors ===
    /// The result produced no rows where exactly one was expected.
    #[error("no rows in result set")]
    NoRows,

    /// The result produced more than one row where exactly one was expected.
    #[error("more than one row in result set")]
    TooManyRows,

    // === Source Errors ===
    /// Failure reported by the row source itself.
    #[error("row source failed: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wraps a row-source error.
    pub fn from_source<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Source(Box::new(err))
    }
}

/// Errors converting a single cell value into a destination field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// NULL into a field that cannot hold it.
    #[error("cannot scan NULL into {target}")]
    Null { target: &'static str },

    /// Value kind the target type does not accept.
    #[error("cannot scan {found} into {target}")]
    Incompatible {
        found: &'static str,
        target: &'static str,
    },

    /// Text that does not parse as the target type.
    #[error("invalid {target} literal '{literal}'")]
    Malformed {
        literal: String,
        target: &'static str,
    },

    /// Numeric value outside the target type's range.
    #[error("value {value} out of range for {target}")]
    OutOfRange { value: String, target: &'static str },
}

/// Result type for row binding operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::FieldUnmatched("FirstName".to_string());
        assert_eq!(
            err.to_string(),
            "no column in returned row matches struct field FirstName"
        );

        let err = Error::ColumnUnmatched("ignore".to_string());
        assert_eq!(
            err.to_string(),
            "struct doesn't have corresponding field to match returned column ignore"
        );
    }

    #[test]
    fn test_conversion_keeps_source() {
        use std::error::Error as _;

        let err = Error::Conversion {
            column: "age".to_string(),
            source: ConversionError::Malformed {
                literal: "abc".to_string(),
                target: "i32",
            },
        };
        assert_eq!(err.to_string(), "can't scan column age: invalid i32 literal 'abc'");
        let source = err.source().expect("source");
        assert_eq!(source.to_string(), "invalid i32 literal 'abc'");
    }
}
