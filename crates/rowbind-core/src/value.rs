//! Cell values and their conversion into record fields.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::ConversionError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// A single cell of a result row.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
}

impl Value {
    /// Short name of the value's kind, used in conversion errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Bool(_) => "bool",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Date(_) => "date",
            Self::Timestamp(_) => "timestamp",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Text rendering of the value; `None` for NULL.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Text(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
            Self::Bytes(bytes) => {
                f.write_str("\\x")?;
                for byte in bytes {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
            Self::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            Self::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%dT%H:%M:%S%.f")),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Self::Timestamp(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A destination a single cell value can be scanned into.
///
/// Implemented for the scalar types a record field usually has. Text cells are
/// parsed, so sources that only produce text (CSV) still fill typed fields.
pub trait ScanValue {
    fn scan(&mut self, value: &Value) -> Result<(), ConversionError>;
}

fn incompatible(value: &Value, target: &'static str) -> ConversionError {
    match value {
        Value::Null => ConversionError::Null { target },
        other => ConversionError::Incompatible {
            found: other.kind(),
            target,
        },
    }
}

fn malformed(literal: &str, target: &'static str) -> ConversionError {
    ConversionError::Malformed {
        literal: literal.to_string(),
        target,
    }
}

impl ScanValue for String {
    fn scan(&mut self, value: &Value) -> Result<(), ConversionError> {
        match value {
            Value::Text(s) => {
                self.clone_from(s);
                Ok(())
            }
            other => Err(incompatible(other, "String")),
        }
    }
}

impl ScanValue for bool {
    fn scan(&mut self, value: &Value) -> Result<(), ConversionError> {
        *self = match value {
            Value::Bool(b) => *b,
            Value::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "t" | "true" | "y" | "yes" | "1" => true,
                "f" | "false" | "n" | "no" | "0" => false,
                _ => return Err(malformed(s, "bool")),
            },
            other => return Err(incompatible(other, "bool")),
        };
        Ok(())
    }
}

macro_rules! scan_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ScanValue for $ty {
                fn scan(&mut self, value: &Value) -> Result<(), ConversionError> {
                    const TARGET: &str = stringify!($ty);
                    *self = match value {
                        Value::Int(i) => <$ty>::try_from(*i).map_err(|_| {
                            ConversionError::OutOfRange {
                                value: i.to_string(),
                                target: TARGET,
                            }
                        })?,
                        Value::Text(s) => s.trim().parse::<$ty>().map_err(|_| malformed(s, TARGET))?,
                        other => return Err(incompatible(other, TARGET)),
                    };
                    Ok(())
                }
            }
        )*
    };
}

scan_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

macro_rules! scan_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ScanValue for $ty {
                #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
                fn scan(&mut self, value: &Value) -> Result<(), ConversionError> {
                    const TARGET: &str = stringify!($ty);
                    *self = match value {
                        Value::Float(x) => *x as $ty,
                        Value::Int(i) => *i as $ty,
                        Value::Text(s) => s.trim().parse::<$ty>().map_err(|_| malformed(s, TARGET))?,
                        other => return Err(incompatible(other, TARGET)),
                    };
                    Ok(())
                }
            }
        )*
    };
}

scan_float!(f32, f64);

impl ScanValue for Vec<u8> {
    fn scan(&mut self, value: &Value) -> Result<(), ConversionError> {
        match value {
            Value::Bytes(bytes) => self.clone_from(bytes),
            Value::Text(s) => *self = s.as_bytes().to_vec(),
            other => return Err(incompatible(other, "Vec<u8>")),
        }
        Ok(())
    }
}

impl ScanValue for NaiveDate {
    fn scan(&mut self, value: &Value) -> Result<(), ConversionError> {
        *self = match value {
            Value::Date(d) => *d,
            Value::Timestamp(ts) => ts.date(),
            Value::Text(s) => NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
                .map_err(|_| malformed(s, "NaiveDate"))?,
            other => return Err(incompatible(other, "NaiveDate")),
        };
        Ok(())
    }
}

impl ScanValue for NaiveDateTime {
    fn scan(&mut self, value: &Value) -> Result<(), ConversionError> {
        *self = match value {
            Value::Timestamp(ts) => *ts,
            Value::Text(s) => {
                let trimmed = s.trim();
                TIMESTAMP_FORMATS
                    .iter()
                    .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
                    .ok_or_else(|| malformed(s, "NaiveDateTime"))?
            }
            other => return Err(incompatible(other, "NaiveDateTime")),
        };
        Ok(())
    }
}

impl<T: ScanValue + Default> ScanValue for Option<T> {
    fn scan(&mut self, value: &Value) -> Result<(), ConversionError> {
        if value.is_null() {
            *self = None;
            return Ok(());
        }
        let mut inner = T::default();
        inner.scan(value)?;
        *self = Some(inner);
        Ok(())
    }
}
