//! Column and field name normalization.
//!
//! Two policies decide whether a column name and a field name denote the same
//! attribute:
//!
//! - [`MatchPolicy::SnakeToCamel`] rewrites `a_typical_db_col` into
//!   `ATypicalDbCol` and compares it to the field name exactly.
//! - [`MatchPolicy::SimpleFold`] lowercases both names and strips underscores,
//!   so `http_address` and `HTTPAddress` both become `httpaddress`.
//!
//! Strict camel casing turns `id` into `Id`, never `ID`. Folding avoids the
//! abbreviation problem by comparing in a reduced alphabet instead of
//! generating a canonical name.

use std::fmt;

/// Rule used to pair column names with field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchPolicy {
    /// Column converted with [`snake_to_camel`], compared case-sensitively.
    SnakeToCamel,
    /// Both names reduced with [`simple_fold`].
    SimpleFold,
}

impl MatchPolicy {
    /// Normalized form of a column name under this policy.
    pub fn normalize_column(self, column: &str) -> String {
        match self {
            Self::SnakeToCamel => snake_to_camel(column),
            Self::SimpleFold => simple_fold(column),
        }
    }

    /// Normalized form of a field name under this policy.
    pub fn normalize_field(self, field: &str) -> String {
        match self {
            Self::SnakeToCamel => field.to_string(),
            Self::SimpleFold => simple_fold(field),
        }
    }

    /// Returns true if `column` and `field` denote the same attribute.
    pub fn matches(self, column: &str, field: &str) -> bool {
        self.normalize_column(column) == self.normalize_field(field)
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SnakeToCamel => f.write_str("snake-to-camel"),
            Self::SimpleFold => f.write_str("simple-fold"),
        }
    }
}

/// Simple uppercase mapping: characters whose uppercase form is not a single
/// character (`ß`) stay as they are.
fn upper_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Context-free lowercase mapping, one character in and one out.
fn lower_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Translates `a_typical_db_col` into `ATypicalDbCol`.
///
/// Each underscore-delimited segment has its first character uppercased and
/// the rest left untouched. Empty segments (leading, trailing or doubled
/// underscores) contribute nothing.
pub fn snake_to_camel(column: &str) -> String {
    let mut out = String::with_capacity(column.len());
    for segment in column.split('_') {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.push(upper_char(first));
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Lowercases `name` character by character and removes every underscore.
pub fn simple_fold(name: &str) -> String {
    name.chars().filter(|&c| c != '_').map(lower_char).collect()
}
