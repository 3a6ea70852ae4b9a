//! # Generic Field Access
//!
//! Rows expose their scalar fields by name through [`Fields`]. The store uses
//! this to evaluate filter clauses and ordering without knowing the concrete
//! entity, and client-side list views use the same trait for their comparator.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fmt;

/// A scalar field value as seen by filters and comparators.
///
/// Values of the same variant compare by their natural ordering. Values of
/// different variants order by variant (`Null` first), which only matters for
/// optional fields.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    /// Case-insensitive substring match. Only text values can match.
    pub fn contains_ignore_case(&self, pattern: &str) -> bool {
        match self {
            FieldValue::Text(value) => value.to_lowercase().contains(&pattern.to_lowercase()),
            _ => false,
        }
    }

    /// Total order used for sorting; incomparable values are treated as equal.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, ""),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Int(i) => write!(f, "{i}"),
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Timestamp(t) => write!(f, "{}", t.to_rfc3339()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// Named access to a row's scalar fields.
///
/// Returns `None` when the row has no field with that name. Fields that exist
/// but hold no value return `Some(FieldValue::Null)`.
pub trait Fields {
    fn field(&self, name: &str) -> Option<FieldValue>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_ignores_case_on_both_sides() {
        let value = FieldValue::from("Introduction to Rust");
        assert!(value.contains_ignore_case("rust"));
        assert!(value.contains_ignore_case("INTRO"));
        assert!(value.contains_ignore_case("n to r"));
        assert!(!value.contains_ignore_case("python"));
    }

    #[test]
    fn non_text_values_never_contain() {
        assert!(!FieldValue::Bool(true).contains_ignore_case("true"));
        assert!(!FieldValue::Null.contains_ignore_case(""));
    }

    #[test]
    fn text_compares_lexicographically() {
        let a = FieldValue::from("alpha");
        let b = FieldValue::from("beta");
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(b.compare(&a), Ordering::Greater);
        assert_eq!(a.compare(&a.clone()), Ordering::Equal);
    }

    #[test]
    fn null_sorts_before_values() {
        let missing: Option<String> = None;
        assert_eq!(
            FieldValue::from(missing).compare(&FieldValue::from("x")),
            Ordering::Less
        );
    }
}
