//! Field resolution: pairing row columns with record slots.

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::naming::MatchPolicy;
use crate::row::Column;
use crate::shape::{FieldKind, RecordShape};

/// Resolved assignment of every column to a record slot.
///
/// `targets()[i]` is the slot ordinal that receives the value of column `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPlan {
    targets: Vec<usize>,
    slot_count: usize,
}

impl ScanPlan {
    pub fn targets(&self) -> &[usize] {
        &self.targets
    }

    /// Total slots of the flattened record, including skipped fields.
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }
}

struct Resolver<'a> {
    columns: &'a [Column],
    policy: MatchPolicy,
    normalized: Vec<String>,
    // (slot, field name) claiming each column
    targets: Vec<Option<(usize, &'static str)>>,
    next_slot: usize,
}

/// Resolves `shape` against `columns` under `policy`.
///
/// Fields are visited depth-first in declaration order. Every exported,
/// non-ignored field must match exactly one column and every column must be
/// claimed by exactly one field.
pub fn resolve(shape: &RecordShape, columns: &[Column], policy: MatchPolicy) -> Result<ScanPlan> {
    let mut resolver = Resolver {
        columns,
        policy,
        normalized: columns
            .iter()
            .map(|column| policy.normalize_column(&column.name))
            .collect(),
        targets: vec![None; columns.len()],
        next_slot: 0,
    };
    resolver.walk(shape)?;

    let targets = resolver
        .targets
        .iter()
        .zip(columns)
        .map(|(target, column)| {
            target
                .map(|(slot, _)| slot)
                .ok_or_else(|| Error::ColumnUnmatched(column.name.clone()))
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(
        record = shape.name,
        columns = columns.len(),
        %policy,
        "resolved scan plan"
    );
    Ok(ScanPlan {
        targets,
        slot_count: resolver.next_slot,
    })
}

impl Resolver<'_> {
    fn walk(&mut self, shape: &RecordShape) -> Result<()> {
        for field in shape.fields {
            if let FieldKind::Embedded(inner) = field.kind {
                self.walk(inner)?;
                continue;
            }

            let slot = self.next_slot;
            self.next_slot += 1;

            if !field.exported {
                trace!(record = shape.name, field = field.name, "skipping private field");
                continue;
            }
            if field.is_ignored() {
                trace!(record = shape.name, field = field.name, "skipping ignored field");
                continue;
            }

            let name = field.comparison_name();
            let wanted = self.policy.normalize_field(name);
            let Some(position) = self.normalized.iter().position(|n| *n == wanted) else {
                return Err(Error::FieldUnmatched(name.to_string()));
            };

            if let Some((_, first)) = self.targets[position] {
                return Err(Error::DuplicateMatch {
                    column: self.columns[position].name.clone(),
                    first: first.to_string(),
                    second: name.to_string(),
                });
            }
            self.targets[position] = Some((slot, name));
        }
        Ok(())
    }
}
