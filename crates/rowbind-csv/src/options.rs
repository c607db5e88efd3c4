//! Configuration options for CSV row sources.

use serde::{Deserialize, Serialize};

/// Options controlling how CSV records become row values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    /// Field delimiter byte.
    pub delimiter: u8,

    /// Trim surrounding whitespace from headers and fields.
    pub trim: bool,

    /// Treat empty fields as NULL.
    /// Default: true.
    pub empty_as_null: bool,

    /// Literal that stands for NULL (e.g. `"NULL"` or `"\\N"`).
    pub null_token: Option<String>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
            empty_as_null: true,
            null_token: None,
        }
    }
}

impl CsvOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn with_empty_as_null(mut self, enable: bool) -> Self {
        self.empty_as_null = enable;
        self
    }

    pub fn with_null_token(mut self, token: impl Into<String>) -> Self {
        self.null_token = Some(token.into());
        self
    }

    /// Returns true if `field` should be read as NULL.
    pub(crate) fn is_null(&self, field: &str) -> bool {
        (self.empty_as_null && field.is_empty()) || self.null_token.as_deref() == Some(field)
    }
}
