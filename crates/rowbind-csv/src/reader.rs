//! CSV-backed row source.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use rowbind_core::{Column, Rows, Value, columns_from_names};

use crate::error::{CsvError, Result};
use crate::options::CsvOptions;

/// Rows read from CSV input. The header line supplies the column list.
#[derive(Debug)]
pub struct CsvRows<R> {
    reader: csv::Reader<R>,
    columns: Vec<Column>,
    options: CsvOptions,
    record: StringRecord,
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

impl CsvRows<File> {
    /// Opens a CSV file.
    pub fn from_path(path: impl AsRef<Path>, options: CsvOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CsvError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let rows = Self::from_reader(file, options)?;
        tracing::debug!(
            path = %path.display(),
            columns = rows.columns.len(),
            "opened CSV row source"
        );
        Ok(rows)
    }
}

impl<R: Read> CsvRows<R> {
    /// Reads the header line from `reader`.
    pub fn from_reader(reader: R, options: CsvOptions) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .delimiter(options.delimiter)
            .trim(if options.trim { Trim::All } else { Trim::None })
            .has_headers(true)
            .from_reader(reader);

        let headers = reader.headers()?;
        if headers.is_empty() {
            return Err(CsvError::MissingHeader);
        }
        let names: Vec<String> = headers.iter().map(normalize_header).collect();

        let mut seen = BTreeSet::new();
        for name in &names {
            if !seen.insert(name.as_str()) {
                tracing::warn!(column = %name, "duplicate CSV header");
            }
        }

        Ok(Self {
            reader,
            columns: columns_from_names(names),
            options,
            record: StringRecord::new(),
        })
    }

    pub fn options(&self) -> &CsvOptions {
        &self.options
    }

    fn read_values(&mut self) -> Result<Option<Vec<Value>>> {
        if !self.reader.read_record(&mut self.record)? {
            return Ok(None);
        }
        let values = self
            .record
            .iter()
            .map(|field| {
                if self.options.is_null(field) {
                    Value::Null
                } else {
                    Value::Text(field.to_string())
                }
            })
            .collect();
        Ok(Some(values))
    }
}

impl<R: Read> Rows for CsvRows<R> {
    fn columns(&self) -> &[Column] {
        &self.columns
    }

    fn next_values(&mut self) -> rowbind_core::Result<Option<Vec<Value>>> {
        Ok(self.read_values()?)
    }
}
