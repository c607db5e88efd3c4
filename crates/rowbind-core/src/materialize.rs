//! Scanning rows into records.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use tracing::debug;

use crate::collect::RowMapper;
use crate::error::{Error, Result};
use crate::naming::MatchPolicy;
use crate::resolve::{ScanPlan, resolve};
use crate::row::Row;
use crate::shape::Record;
use crate::value::ScanValue;

/// Resolves `T`'s shape against `row` and scans the row into `dest`.
pub fn scan_into<T: Record>(dest: &mut T, row: &Row<'_>, policy: MatchPolicy) -> Result<()> {
    let plan = resolve(&T::SHAPE, row.columns(), policy)?;
    scan_with_plan(dest, row, &plan)
}

/// Scans `row` into `dest` using an already resolved plan.
pub fn scan_with_plan<T: Record>(dest: &mut T, row: &Row<'_>, plan: &ScanPlan) -> Result<()> {
    let mut slots: Vec<Option<&mut dyn ScanValue>> =
        dest.scan_slots().into_iter().map(Some).collect();
    if slots.len() != plan.slot_count() {
        return Err(Error::InvalidDestination {
            record: T::SHAPE.name,
            reason: format!(
                "shape declares {} slots but the record lends {}",
                plan.slot_count(),
                slots.len()
            ),
        });
    }

    let mut targets = Vec::with_capacity(plan.targets().len());
    for &slot in plan.targets() {
        let target = slots[slot].take().ok_or_else(|| Error::InvalidDestination {
            record: T::SHAPE.name,
            reason: format!("slot {slot} targeted twice"),
        })?;
        targets.push(target);
    }
    row.scan(&mut targets)
}

fn scan_fresh<T: Record + Default>(row: &Row<'_>, policy: MatchPolicy) -> Result<T> {
    let mut value = T::default();
    scan_into(&mut value, row, policy)?;
    Ok(value)
}

/// Returns a `T` scanned from `row`, pairing snake_case columns with the
/// CamelCase field names they translate to.
///
/// `T` must have exactly as many matchable fields as `row` has columns.
/// Field names are compared as declared, so records declared through
/// [`impl_record!`](crate::impl_record) need CamelCase tags to match here.
pub fn row_to_struct_by_snake_to_camel_name<T: Record + Default>(row: &Row<'_>) -> Result<T> {
    scan_fresh(row, MatchPolicy::SnakeToCamel)
}

/// Boxed form of [`row_to_struct_by_snake_to_camel_name`].
pub fn row_to_boxed_struct_by_snake_to_camel_name<T: Record + Default>(
    row: &Row<'_>,
) -> Result<Box<T>> {
    scan_fresh(row, MatchPolicy::SnakeToCamel).map(Box::new)
}

/// Returns a `T` scanned from `row`, comparing column and field names with
/// case and underscores ignored (`http_address` matches `HTTPAddress`).
pub fn row_to_struct_by_simple_name<T: Record + Default>(row: &Row<'_>) -> Result<T> {
    scan_fresh(row, MatchPolicy::SimpleFold)
}

/// Boxed form of [`row_to_struct_by_simple_name`].
pub fn row_to_boxed_struct_by_simple_name<T: Record + Default>(row: &Row<'_>) -> Result<Box<T>> {
    scan_fresh(row, MatchPolicy::SimpleFold).map(Box::new)
}

/// Maps each column name to the text of its value. NULL cells are left out.
pub fn row_to_string_map(row: &Row<'_>) -> Result<BTreeMap<String, String>> {
    Ok(row
        .columns()
        .iter()
        .zip(row.values())
        .filter_map(|(column, value)| value.to_text().map(|text| (column.name.clone(), text)))
        .collect())
}

/// Row mapper that resolves `T` once per column list and reuses the plan.
///
/// Every row of one result shares its columns, so collecting through a
/// `StructScanner` resolves the record shape once instead of once per row.
#[derive(Debug)]
pub struct StructScanner<T> {
    policy: MatchPolicy,
    cached: Option<(Vec<String>, ScanPlan)>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record + Default> StructScanner<T> {
    pub fn new(policy: MatchPolicy) -> Self {
        Self {
            policy,
            cached: None,
            _record: PhantomData,
        }
    }

    pub fn snake_to_camel() -> Self {
        Self::new(MatchPolicy::SnakeToCamel)
    }

    pub fn simple_name() -> Self {
        Self::new(MatchPolicy::SimpleFold)
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    fn plan_for(&mut self, row: &Row<'_>) -> Result<&ScanPlan> {
        let cached = match self.cached.take() {
            Some((names, plan)) if same_names(&names, row) => (names, plan),
            _ => {
                debug!(record = T::SHAPE.name, policy = %self.policy, "scan plan cache miss");
                let plan = resolve(&T::SHAPE, row.columns(), self.policy)?;
                let names = row.columns().iter().map(|c| c.name.clone()).collect();
                (names, plan)
            }
        };
        let (_, plan) = self.cached.insert(cached);
        Ok(plan)
    }

    /// Scans `row` into a fresh `T`.
    pub fn scan(&mut self, row: &Row<'_>) -> Result<T> {
        let plan = self.plan_for(row)?;
        let mut value = T::default();
        scan_with_plan(&mut value, row, plan)?;
        Ok(value)
    }
}

fn same_names(names: &[String], row: &Row<'_>) -> bool {
    names
        .iter()
        .map(String::as_str)
        .eq(row.columns().iter().map(|c| c.name.as_str()))
}

impl<T: Record + Default> RowMapper<T> for StructScanner<T> {
    fn map_row(&mut self, row: &Row<'_>) -> Result<T> {
        self.scan(row)
    }
}
