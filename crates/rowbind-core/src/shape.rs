//! Record shapes: the field tables a destination type exposes to the resolver.
//!
//! A [`Record`] describes its fields once, as a `const` [`RecordShape`], and
//! lends mutable access to every field slot through [`Record::scan_slots`].
//! Both sides must walk the fields in the same depth-first declaration order;
//! the [`impl_record!`](crate::impl_record) macro generates them together.

use crate::error::ConversionError;
use crate::value::{ScanValue, Value};

/// Tag value that excludes a field from matching.
pub const IGNORE_TAG: &str = "-";

/// How a field participates in flattening.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Ordinary field scanned from one column.
    Value,
    /// Anonymous record whose fields are treated as declared on the parent.
    Embedded(&'static RecordShape),
    /// Anonymous record held behind a pointer. Not expanded; matched by its
    /// own name like an ordinary field.
    EmbeddedPointer,
}

/// Static description of one declared field.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// Declared field name.
    pub name: &'static str,
    /// Override tag (`"column_name"`, `"column_name,opts"` or `"-"`).
    pub tag: Option<&'static str>,
    /// False for fields not visible outside their record.
    pub exported: bool,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub const fn value(name: &'static str) -> Self {
        Self {
            name,
            tag: None,
            exported: true,
            kind: FieldKind::Value,
        }
    }

    pub const fn embedded(name: &'static str, shape: &'static RecordShape) -> Self {
        Self {
            name,
            tag: None,
            exported: true,
            kind: FieldKind::Embedded(shape),
        }
    }

    pub const fn embedded_pointer(name: &'static str) -> Self {
        Self {
            name,
            tag: None,
            exported: true,
            kind: FieldKind::EmbeddedPointer,
        }
    }

    #[must_use]
    pub const fn with_tag(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    #[must_use]
    pub const fn private(mut self) -> Self {
        self.exported = false;
        self
    }

    /// Name compared against column names: the first comma-delimited segment
    /// of the tag when one is present, otherwise the declared name.
    pub fn comparison_name(&self) -> &'static str {
        match self.tag {
            Some(tag) => tag.split(',').next().unwrap_or(tag),
            None => self.name,
        }
    }

    pub fn is_ignored(&self) -> bool {
        self.comparison_name() == IGNORE_TAG
    }

    /// True when the field is expanded in place rather than given a slot.
    pub fn is_flattened(&self) -> bool {
        matches!(self.kind, FieldKind::Embedded(_))
    }
}

/// Static description of a record type's fields in declaration order.
#[derive(Debug, Clone, Copy)]
pub struct RecordShape {
    pub name: &'static str,
    pub fields: &'static [FieldDescriptor],
}

impl RecordShape {
    /// Number of slots after flattening embedded records.
    pub fn slot_count(&self) -> usize {
        self.fields
            .iter()
            .map(|field| match field.kind {
                FieldKind::Embedded(shape) => shape.slot_count(),
                FieldKind::Value | FieldKind::EmbeddedPointer => 1,
            })
            .sum()
    }
}

/// A type rows can be scanned into.
///
/// `scan_slots` returns one slot for every non-embedded field of `SHAPE`,
/// skipped fields included, with embedded records expanded in place.
pub trait Record {
    const SHAPE: RecordShape;

    fn scan_slots(&mut self) -> Vec<&mut dyn ScanValue>;
}

/// Slot lent for a field whose own type cannot be scanned.
///
/// Private and `"-"` fields are never targeted. A column matched to a boxed
/// record field reaches this slot and fails to convert.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Unscanned;

impl Unscanned {
    pub const TARGET: &'static str = "unscannable field";

    /// A fresh placeholder slot.
    pub fn slot<'a>() -> &'a mut dyn ScanValue {
        // zero-sized: leaking allocates nothing
        Box::leak(Box::new(Unscanned))
    }
}

impl ScanValue for Unscanned {
    fn scan(&mut self, value: &Value) -> Result<(), ConversionError> {
        Err(ConversionError::Incompatible {
            found: value.kind(),
            target: Self::TARGET,
        })
    }
}

/// Implements [`Record`] for an existing struct.
///
/// Each entry is `<kind> <field>: <type>` with an optional `= "tag"`:
///
/// - `field`: public value field; the type must implement [`ScanValue`]
///   unless the tag is exactly `"-"`
/// - `private`: field skipped by matching, of any type
/// - `embed`: nested record expanded in place
/// - `boxed`: nested record behind a pointer, matched as one field
///
/// Declared names are the Rust identifiers, which suit
/// [`MatchPolicy::SimpleFold`](crate::MatchPolicy::SimpleFold). Under
/// [`MatchPolicy::SnakeToCamel`](crate::MatchPolicy::SnakeToCamel) a
/// snake_case identifier never equals a translated column, so give each field
/// a CamelCase tag (`field first_name: String = "FirstName"`) or implement
/// [`Record`] by hand.
///
/// ```ignore
/// impl_record! {
///     Person {
///         embed name: Name,
///         field likes_star_trek: bool,
///         field age: i32 = "years",
///         field notes: String = "-",
///     }
/// }
/// ```
#[macro_export]
macro_rules! impl_record {
    (
        $name:ident {
            $( $kind:ident $field:ident : $field_ty:ty $(= $tag:tt)? ),* $(,)?
        }
    ) => {
        impl $crate::Record for $name {
            const SHAPE: $crate::RecordShape = $crate::RecordShape {
                name: stringify!($name),
                fields: &[
                    $( $crate::impl_record!(@descriptor $kind $field : $field_ty $(= $tag)?) ),*
                ],
            };

            fn scan_slots(&mut self) -> ::std::vec::Vec<&mut dyn $crate::ScanValue> {
                let mut slots: ::std::vec::Vec<&mut dyn $crate::ScanValue> = ::std::vec::Vec::new();
                $( $crate::impl_record!(@slot $kind slots, self.$field $(, $tag)?); )*
                slots
            }
        }
    };

    (@descriptor field $field:ident : $field_ty:ty $(= $tag:literal)?) => {
        $crate::FieldDescriptor::value(stringify!($field)) $(.with_tag($tag))?
    };
    (@descriptor private $field:ident : $field_ty:ty $(= $tag:literal)?) => {
        $crate::FieldDescriptor::value(stringify!($field)).private() $(.with_tag($tag))?
    };
    (@descriptor embed $field:ident : $field_ty:ty) => {
        $crate::FieldDescriptor::embedded(
            stringify!($field),
            &<$field_ty as $crate::Record>::SHAPE,
        )
    };
    (@descriptor boxed $field:ident : $field_ty:ty $(= $tag:literal)?) => {
        $crate::FieldDescriptor::embedded_pointer(stringify!($field)) $(.with_tag($tag))?
    };

    (@slot embed $slots:ident, $place:expr) => {
        $slots.extend($crate::Record::scan_slots(&mut $place))
    };
    (@slot field $slots:ident, $place:expr, "-") => {
        $slots.push($crate::Unscanned::slot())
    };
    (@slot field $slots:ident, $place:expr $(, $tag:tt)?) => {
        $slots.push(&mut $place)
    };
    (@slot private $slots:ident, $place:expr $(, $tag:tt)?) => {
        $slots.push($crate::Unscanned::slot())
    };
    (@slot boxed $slots:ident, $place:expr $(, $tag:tt)?) => {
        $slots.push($crate::Unscanned::slot())
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Name {
        last_name: String,
        first_name: String,
    }

    crate::impl_record! {
        Name {
            field last_name: String,
            field first_name: String,
        }
    }

    #[derive(Debug, Default)]
    struct Person {
        name: Name,
        likes_star_trek: bool,
        age: i32,
        cache: Option<String>,
    }

    crate::impl_record! {
        Person {
            embed name: Name,
            field likes_star_trek: bool = "star_trek,omitempty",
            field age: i32,
            private cache: Option<String>,
        }
    }

    #[test]
    fn test_generated_shape() {
        let shape = Person::SHAPE;
        assert_eq!(shape.name, "Person");
        assert_eq!(shape.fields.len(), 4);
        assert!(shape.fields[0].is_flattened());
        assert_eq!(shape.fields[1].comparison_name(), "star_trek");
        assert!(!shape.fields[3].exported);
        assert_eq!(shape.slot_count(), 5);
    }

    #[test]
    fn test_generated_slots_follow_shape() {
        let mut person = Person::default();
        let slots = person.scan_slots();
        assert_eq!(slots.len(), Person::SHAPE.slot_count());
    }

    #[derive(Debug, Default)]
    struct Session {
        token: String,
        owner: Box<Name>,
        seen: std::collections::HashMap<String, u32>,
        scratch: Vec<Name>,
    }

    crate::impl_record! {
        Session {
            field token: String,
            boxed owner: Box<Name>,
            private seen: std::collections::HashMap<String, u32>,
            field scratch: Vec<Name> = "-",
        }
    }

    #[test]
    fn test_unscannable_fields_get_placeholder_slots() {
        let mut session = Session::default();
        let mut slots = session.scan_slots();
        assert_eq!(slots.len(), Session::SHAPE.slot_count());
        assert_eq!(slots.len(), 4);
        let err = slots[1].scan(&Value::from("x")).unwrap_err();
        assert_eq!(
            err,
            ConversionError::Incompatible {
                found: "text",
                target: Unscanned::TARGET,
            }
        );
        slots[0].scan(&Value::from("abc")).unwrap();
        drop(slots);
        assert_eq!(session.token, "abc");
        assert!(session.seen.is_empty());
    }

    #[test]
    fn test_ignore_tag() {
        let field = FieldDescriptor::value("Notes").with_tag("-");
        assert!(field.is_ignored());
        let field = FieldDescriptor::value("Notes").with_tag("-,omitempty");
        assert!(field.is_ignored());
        let field = FieldDescriptor::value("Notes");
        assert!(!field.is_ignored());
    }
}
