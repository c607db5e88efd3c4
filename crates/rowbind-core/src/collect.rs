//! Collecting mapped rows from a row source.

use tracing::debug;

use crate::error::{Error, Result};
use crate::row::{Row, Rows};

/// Turns one row into a value.
///
/// Implemented for closures and functions taking a [`Row`], so the
/// `row_to_*` entry points can be passed directly.
pub trait RowMapper<T> {
    fn map_row(&mut self, row: &Row<'_>) -> Result<T>;
}

impl<T, F> RowMapper<T> for F
where
    F: FnMut(&Row<'_>) -> Result<T>,
{
    fn map_row(&mut self, row: &Row<'_>) -> Result<T> {
        self(row)
    }
}

fn next_mapped<R, T, M>(rows: &mut R, mapper: &mut M) -> Result<Option<T>>
where
    R: Rows,
    M: RowMapper<T>,
{
    let Some(values) = rows.next_values()? else {
        return Ok(None);
    };
    let row = Row::new(rows.columns(), &values)?;
    mapper.map_row(&row).map(Some)
}

/// Maps every remaining row of `rows`.
pub fn collect_rows<R, T, M>(mut rows: R, mut mapper: M) -> Result<Vec<T>>
where
    R: Rows,
    M: RowMapper<T>,
{
    let mut out = Vec::new();
    while let Some(value) = next_mapped(&mut rows, &mut mapper)? {
        out.push(value);
    }
    debug!(rows = out.len(), "collected rows");
    Ok(out)
}

/// Maps the single row of `rows`.
///
/// Fails with [`Error::NoRows`] when the source is empty and with
/// [`Error::TooManyRows`] when it yields a second row.
pub fn collect_one_row<R, T, M>(mut rows: R, mut mapper: M) -> Result<T>
where
    R: Rows,
    M: RowMapper<T>,
{
    let value = next_mapped(&mut rows, &mut mapper)?.ok_or(Error::NoRows)?;
    if rows.next_values()?.is_some() {
        return Err(Error::TooManyRows);
    }
    Ok(value)
}

/// [`collect_one_row`] that reports an empty result as `Ok(None)` instead
/// of [`Error::NoRows`]. Every other failure, [`Error::TooManyRows`]
/// included, is returned unchanged.
pub fn collect_one_row_ok<R, T, M>(rows: R, mapper: M) -> Result<Option<T>>
where
    R: Rows,
    M: RowMapper<T>,
{
    match collect_one_row(rows, mapper) {
        Ok(value) => Ok(Some(value)),
        Err(Error::NoRows) => {
            debug!("no rows found");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
