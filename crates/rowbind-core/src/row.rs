//! Row source interface and an in-memory result set.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::value::{ScanValue, Value};

/// Name and position of one result column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub position: usize,
    pub name: String,
}

impl Column {
    pub fn new(position: usize, name: impl Into<String>) -> Self {
        Self {
            position,
            name: name.into(),
        }
    }
}

/// Builds column descriptors numbered in iteration order.
pub fn columns_from_names<I, S>(names: I) -> Vec<Column>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names
        .into_iter()
        .enumerate()
        .map(|(position, name)| Column::new(position, name))
        .collect()
}

/// One row of a result, borrowed from its source.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [Column],
    values: &'a [Value],
}

impl<'a> Row<'a> {
    /// Pairs values with their columns. The two must have equal length.
    pub fn new(columns: &'a [Column], values: &'a [Value]) -> Result<Self> {
        if columns.len() != values.len() {
            return Err(Error::ArityMismatch {
                expected: columns.len(),
                actual: values.len(),
            });
        }
        Ok(Self { columns, values })
    }

    pub fn columns(&self) -> &'a [Column] {
        self.columns
    }

    pub fn values(&self) -> &'a [Value] {
        self.values
    }

    /// Value of the first column named `name`.
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .map(|i| &self.values[i])
    }

    /// Scans every value into the target at the same position.
    pub fn scan(&self, targets: &mut [&mut dyn ScanValue]) -> Result<()> {
        if targets.len() != self.values.len() {
            return Err(Error::ArityMismatch {
                expected: self.values.len(),
                actual: targets.len(),
            });
        }
        for ((target, value), column) in targets.iter_mut().zip(self.values).zip(self.columns) {
            target.scan(value).map_err(|source| Error::Conversion {
                column: column.name.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

/// A source of result rows sharing one column list.
pub trait Rows {
    /// Columns of every row this source yields, known before the first row.
    fn columns(&self) -> &[Column];

    /// Next row's values in column order, or `None` when exhausted.
    fn next_values(&mut self) -> Result<Option<Vec<Value>>>;
}

impl<R: Rows + ?Sized> Rows for &mut R {
    fn columns(&self) -> &[Column] {
        (**self).columns()
    }

    fn next_values(&mut self) -> Result<Option<Vec<Value>>> {
        (**self).next_values()
    }
}

/// Rows held in memory.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    columns: Vec<Column>,
    rows: VecDeque<Vec<Value>>,
}

impl ResultSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns_from_names(names),
            rows: VecDeque::new(),
        }
    }

    /// Appends a row; its length must match the column count.
    pub fn push_row(&mut self, values: Vec<Value>) -> Result<()> {
        if values.len() != self.columns.len() {
            return Err(Error::ArityMismatch {
                expected: self.columns.len(),
                actual: values.len(),
            });
        }
        self.rows.push_back(values);
        Ok(())
    }

    /// Builder form of [`Self::push_row`].
    pub fn with_row(mut self, values: Vec<Value>) -> Result<Self> {
        self.push_row(values)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Rows for ResultSet {
    fn columns(&self) -> &[Column] {
        &self.columns
    }

    fn next_values(&mut self) -> Result<Option<Vec<Value>>> {
        Ok(self.rows.pop_front())
    }
}
