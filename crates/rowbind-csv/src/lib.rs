//! CSV row source for rowbind.
//!
//! Reads a CSV file (or any `io::Read`) as a [`rowbind_core::Rows`] source:
//! the header line becomes the column list and each record one row of text
//! values. Typed record fields parse those values during the scan.
//!
//! # Example
//!
//! ```ignore
//! use rowbind_core::{collect_rows, row_to_struct_by_simple_name};
//! use rowbind_csv::{CsvOptions, CsvRows};
//!
//! let rows = CsvRows::from_path("people.csv", CsvOptions::default())?;
//! let people: Vec<Person> = collect_rows(rows, row_to_struct_by_simple_name::<Person>)?;
//! ```

mod error;
mod options;
mod reader;

// === Error Types ===
pub use error::{CsvError, Result};

// === Configuration ===
pub use options::CsvOptions;

// === Row Source ===
pub use reader::CsvRows;
