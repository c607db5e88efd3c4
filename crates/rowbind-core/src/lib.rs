//! Binding tabular query results onto declared record types.
//!
//! Columns are paired with record fields by name, without annotations in the
//! common case:
//!
//! - **Naming**: two matching policies, snake_case to CamelCase translation and
//!   case/underscore folding
//! - **Shapes**: records describe their fields once through [`Record`],
//!   usually via [`impl_record!`]
//! - **Resolution**: every column is assigned to exactly one field slot, with
//!   embedded records flattened in place
//! - **Collection**: rows from any [`Rows`] source mapped into vectors, single
//!   values or optional values
//!
//! # Example
//!
//! ```ignore
//! use rowbind_core::{ResultSet, Value, collect_rows, impl_record, row_to_struct_by_simple_name};
//!
//! #[derive(Debug, Default)]
//! struct Person {
//!     first_name: String,
//!     age: i32,
//! }
//!
//! impl_record! {
//!     Person {
//!         field first_name: String,
//!         field age: i32,
//!     }
//! }
//!
//! let rows = ResultSet::new(["first_name", "age"])
//!     .with_row(vec![Value::from("John"), Value::from(42)])?;
//! let people: Vec<Person> = collect_rows(rows, row_to_struct_by_simple_name::<Person>)?;
//! ```
//!
//! [`impl_record!`] declares fields under their Rust identifiers, so the
//! example uses the simple-name entry point. The snake-to-camel entry points
//! compare against declared names verbatim and need CamelCase tags
//! (`field first_name: String = "FirstName"`) or a hand-written [`Record`].

mod collect;
mod error;
mod materialize;
pub mod naming;
mod resolve;
mod row;
mod shape;
mod value;

// === Error Types ===
pub use error::{ConversionError, Error, Result};

// === Naming ===
pub use naming::{MatchPolicy, simple_fold, snake_to_camel};

// === Record Shapes ===
pub use shape::{FieldDescriptor, FieldKind, IGNORE_TAG, Record, RecordShape, Unscanned};

// === Resolution ===
pub use resolve::{ScanPlan, resolve};

// === Rows and Values ===
pub use row::{Column, ResultSet, Row, Rows, columns_from_names};
pub use value::{ScanValue, Value};

// === Materialization ===
pub use materialize::{
    StructScanner, row_to_boxed_struct_by_simple_name,
    row_to_boxed_struct_by_snake_to_camel_name, row_to_string_map, row_to_struct_by_simple_name,
    row_to_struct_by_snake_to_camel_name, scan_into, scan_with_plan,
};

// === Collection ===
pub use collect::{RowMapper, collect_one_row, collect_one_row_ok, collect_rows};
