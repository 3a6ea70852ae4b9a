//! # Store Filters
//!
//! A [`StoreFilter`] is the store-level description of a list request: which
//! rows match, how they are ordered, and how many are returned. Resource query
//! objects are translated into this form before they reach the actor.

use crate::error::FrameworkError;
use crate::fields::{FieldValue, Fields};
use std::cmp::Ordering;

/// Sort direction for a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// One ordering key: a field name and a direction.
#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// A single match condition. All clauses of a filter must hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Case-insensitive substring match, unanchored.
    Contains { field: String, pattern: String },
    /// Exact equality.
    Equals { field: String, value: FieldValue },
    /// Equality with any of the listed values.
    AnyOf {
        field: String,
        values: Vec<FieldValue>,
    },
}

impl Clause {
    pub fn contains(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Clause::Contains {
            field: field.into(),
            pattern: pattern.into(),
        }
    }

    pub fn equals(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Clause::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn any_of(field: impl Into<String>, values: Vec<FieldValue>) -> Self {
        Clause::AnyOf {
            field: field.into(),
            values,
        }
    }

    fn field_name(&self) -> &str {
        match self {
            Clause::Contains { field, .. }
            | Clause::Equals { field, .. }
            | Clause::AnyOf { field, .. } => field,
        }
    }

    fn matches<T: Fields>(&self, row: &T) -> Result<bool, FrameworkError> {
        let value = row
            .field(self.field_name())
            .ok_or_else(|| FrameworkError::UnknownField(self.field_name().to_string()))?;
        Ok(match self {
            Clause::Contains { pattern, .. } => value.contains_ignore_case(pattern),
            Clause::Equals { value: expected, .. } => &value == expected,
            Clause::AnyOf { values, .. } => values.contains(&value),
        })
    }
}

/// Filter, order and limit for a list request.
///
/// An empty filter matches every row, keeps store order and returns all rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreFilter {
    pub clauses: Vec<Clause>,
    pub order: Vec<SortKey>,
    pub limit: Option<usize>,
}

impl StoreFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clause(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn order_by(mut self, key: SortKey) -> Self {
        self.order.push(key);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Evaluates the filter over `rows`, which are expected in store order.
    ///
    /// Sorting is stable, so rows that tie on every key keep their store order.
    pub fn apply<'a, T, I>(&self, rows: I) -> Result<Vec<T>, FrameworkError>
    where
        T: Fields + Clone + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut matched = Vec::new();
        for row in rows {
            if self.matches(row)? {
                matched.push(row.clone());
            }
        }

        if !self.order.is_empty() {
            let mut keyed = Vec::with_capacity(matched.len());
            for row in matched {
                let mut keys = Vec::with_capacity(self.order.len());
                for key in &self.order {
                    let value = row
                        .field(&key.field)
                        .ok_or_else(|| FrameworkError::UnknownField(key.field.clone()))?;
                    keys.push(value);
                }
                keyed.push((keys, row));
            }
            keyed.sort_by(|(a, _), (b, _)| self.compare_keys(a, b));
            matched = keyed.into_iter().map(|(_, row)| row).collect();
        }

        if let Some(limit) = self.limit {
            matched.truncate(limit);
        }
        Ok(matched)
    }

    fn matches<T: Fields>(&self, row: &T) -> Result<bool, FrameworkError> {
        for clause in &self.clauses {
            if !clause.matches(row)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn compare_keys(&self, a: &[FieldValue], b: &[FieldValue]) -> Ordering {
        for ((left, right), key) in a.iter().zip(b).zip(&self.order) {
            let ordering = match key.direction {
                SortDirection::Asc => left.compare(right),
                SortDirection::Desc => right.compare(left),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        description: &'static str,
        published: bool,
    }

    impl Fields for Row {
        fn field(&self, name: &str) -> Option<FieldValue> {
            match name {
                "name" => Some(self.name.into()),
                "description" => Some(self.description.into()),
                "published" => Some(self.published.into()),
                _ => None,
            }
        }
    }

    fn row(name: &'static str, description: &'static str, published: bool) -> Row {
        Row {
            name,
            description,
            published,
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            row("Rust", "Systems", true),
            row("Go", "Services", false),
            row("rust", "Again", true),
            row("Elm", "Frontend", true),
        ]
    }

    #[test]
    fn empty_filter_returns_everything_in_store_order() {
        let rows = rows();
        let result = StoreFilter::new().apply(&rows).unwrap();
        assert_eq!(result, rows);
    }

    #[test]
    fn contains_is_case_insensitive_and_unanchored() {
        let rows = rows();
        let result = StoreFilter::new()
            .with_clause(Clause::contains("name", "US"))
            .apply(&rows)
            .unwrap();
        let names: Vec<_> = result.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Rust", "rust"]);
    }

    #[test]
    fn clauses_are_conjunctive() {
        let rows = rows();
        let result = StoreFilter::new()
            .with_clause(Clause::contains("name", "rust"))
            .with_clause(Clause::contains("description", "sys"))
            .apply(&rows)
            .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Rust");
    }

    #[test]
    fn equals_and_any_of() {
        let rows = rows();
        let unpublished = StoreFilter::new()
            .with_clause(Clause::equals("published", false))
            .apply(&rows)
            .unwrap();
        assert_eq!(unpublished.len(), 1);

        let picked = StoreFilter::new()
            .with_clause(Clause::any_of("name", vec!["Go".into(), "Elm".into()]))
            .apply(&rows)
            .unwrap();
        let names: Vec<_> = picked.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Go", "Elm"]);
    }

    #[test]
    fn multi_key_ordering_and_limit() {
        let rows = vec![
            row("B", "2", true),
            row("A", "2", true),
            row("A", "1", true),
        ];
        let result = StoreFilter::new()
            .order_by(SortKey::asc("name"))
            .order_by(SortKey::asc("description"))
            .apply(&rows)
            .unwrap();
        let keys: Vec<_> = result.iter().map(|r| (r.name, r.description)).collect();
        assert_eq!(keys, vec![("A", "1"), ("A", "2"), ("B", "2")]);

        let limited = StoreFilter::new()
            .order_by(SortKey::desc("name"))
            .limit(1)
            .apply(&rows)
            .unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].name, "B");
    }

    #[test]
    fn ties_keep_store_order() {
        let rows = rows();
        let result = StoreFilter::new()
            .order_by(SortKey::desc("published"))
            .apply(&rows)
            .unwrap();
        let names: Vec<_> = result.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Rust", "rust", "Elm", "Go"]);
    }

    #[test]
    fn unknown_sort_field_fails_at_the_store() {
        let rows = rows();
        let err = StoreFilter::new()
            .order_by(SortKey::asc("price"))
            .apply(&rows)
            .unwrap_err();
        assert!(matches!(err, FrameworkError::UnknownField(f) if f == "price"));
    }
}
