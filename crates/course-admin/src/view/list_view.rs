//! # List View Model
//!
//! Sorting and paging happen over the rows already fetched; neither triggers a
//! request.

use resource_actor::{FieldValue, Fields, SortDirection};

/// Rows per page in every table.
pub const PER_PAGE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Empty,
}

#[derive(Debug, Clone)]
pub struct ListView<R> {
    rows: Vec<R>,
    order_by: Option<String>,
    order: SortDirection,
    current_page: usize,
    per_page: usize,
    status: ListStatus,
    error: Option<String>,
}

impl<R> Default for ListView<R> {
    fn default() -> Self {
        Self::new(PER_PAGE)
    }
}

impl<R> ListView<R> {
    /// `per_page` is clamped to at least one row.
    pub fn new(per_page: usize) -> Self {
        Self {
            rows: Vec::new(),
            order_by: None,
            order: SortDirection::Asc,
            current_page: 1,
            per_page: per_page.max(1),
            status: ListStatus::Idle,
            error: None,
        }
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn order_by(&self) -> Option<&str> {
        self.order_by.as_deref()
    }

    pub fn order(&self) -> SortDirection {
        self.order
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn status(&self) -> ListStatus {
        self.status
    }

    /// Message of the last failed fetch, cleared by the next successful one.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn start_loading(&mut self) {
        self.status = ListStatus::Loading;
    }

    /// Replaces the source rows. The current page and ordering are kept.
    pub fn load(&mut self, rows: Vec<R>) {
        self.status = if rows.is_empty() {
            ListStatus::Empty
        } else {
            ListStatus::Loaded
        };
        self.rows = rows;
        self.error = None;
    }

    /// Records a failed fetch and keeps the previous rows on screen.
    pub fn fail(&mut self, message: String) {
        self.status = if self.rows.is_empty() {
            ListStatus::Empty
        } else {
            ListStatus::Loaded
        };
        self.error = Some(message);
    }

    /// Same field again flips the direction; a new field sorts ascending.
    pub fn sort_by(&mut self, field: &str) {
        if self.order_by.as_deref() == Some(field) {
            self.order = match self.order {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            };
        } else {
            self.order_by = Some(field.to_string());
            self.order = SortDirection::Asc;
        }
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.saturating_add(1);
    }

    pub fn prev_page(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }

    pub fn has_prev_page(&self) -> bool {
        self.current_page > 1
    }
}

impl<R: Fields + Clone> ListView<R> {
    /// All rows in display order. Sorting is stable; ties keep fetch order.
    pub fn sorted(&self) -> Vec<R> {
        let mut rows = self.rows.clone();
        if let Some(field) = &self.order_by {
            let value = |row: &R| row.field(field).unwrap_or(FieldValue::Null);
            rows.sort_by(|a, b| {
                let ordering = value(a).compare(&value(b));
                match self.order {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }
        rows
    }

    /// The rows of the current page. A page past the end is empty.
    pub fn derive_page(&self) -> Vec<R> {
        let start = (self.current_page - 1).saturating_mul(self.per_page);
        self.sorted()
            .into_iter()
            .skip(start)
            .take(self.per_page)
            .collect()
    }

    /// Whether "next" should be enabled: the current page is full.
    ///
    /// A full last page still reports a next page; there is no total count to check
    /// against.
    pub fn has_next_page(&self) -> bool {
        self.derive_page().len() == self.per_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        rank: i64,
    }

    impl Fields for Row {
        fn field(&self, name: &str) -> Option<FieldValue> {
            match name {
                "name" => Some(self.name.into()),
                "rank" => Some(FieldValue::Int(self.rank)),
                _ => None,
            }
        }
    }

    fn row(name: &'static str, rank: i64) -> Row {
        Row { name, rank }
    }

    fn rows(count: usize) -> Vec<Row> {
        (0..count).map(|i| row("row", i as i64)).collect()
    }

    #[test]
    fn pages_slice_the_result_set() {
        let mut view = ListView::new(10);
        view.load(rows(25));

        assert_eq!(view.derive_page().len(), 10);
        assert!(view.has_next_page());
        view.next_page();
        view.next_page();
        assert_eq!(view.current_page(), 3);
        assert_eq!(view.derive_page().len(), 5);
        assert!(!view.has_next_page());
        view.next_page();
        assert!(view.derive_page().is_empty());
    }

    #[test]
    fn prev_page_is_floored_at_one() {
        let mut view: ListView<Row> = ListView::default();
        view.prev_page();
        assert_eq!(view.current_page(), 1);
        assert!(!view.has_prev_page());
    }

    #[test]
    fn exactly_full_last_page_still_offers_next() {
        let mut view = ListView::new(10);
        view.load(rows(10));
        assert!(view.has_next_page());
        view.next_page();
        assert!(view.derive_page().is_empty());
    }

    #[test]
    fn sort_toggles_and_resets_direction() {
        let mut view = ListView::new(10);
        view.load(vec![
            row("alpha", 2),
            row("beta", 1),
        ]);

        view.sort_by("name");
        view.sort_by("name");
        assert_eq!(view.order(), SortDirection::Desc);
        assert_eq!(view.derive_page()[0].name, "beta");

        view.sort_by("name");
        assert_eq!(view.order(), SortDirection::Asc);
        assert_eq!(view.derive_page()[0].name, "alpha");

        view.sort_by("name");
        view.sort_by("rank");
        assert_eq!(view.order_by(), Some("rank"));
        assert_eq!(view.order(), SortDirection::Asc);
        assert_eq!(view.derive_page()[0].name, "beta");
    }

    #[test]
    fn ties_keep_fetch_order_in_both_directions() {
        let mut view = ListView::new(10);
        view.load(vec![
            row("same", 1),
            row("same", 2),
            row("other", 3),
        ]);
        view.sort_by("name");
        view.sort_by("name");
        let ranks: Vec<i64> = view.derive_page().iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn status_follows_loaded_rows() {
        let mut view: ListView<Row> = ListView::default();
        assert_eq!(view.status(), ListStatus::Idle);
        view.start_loading();
        assert_eq!(view.status(), ListStatus::Loading);
        view.load(Vec::new());
        assert_eq!(view.status(), ListStatus::Empty);
        view.load(rows(1));
        assert_eq!(view.status(), ListStatus::Loaded);
        view.fail("boom".into());
        assert_eq!(view.status(), ListStatus::Loaded);
        assert_eq!(view.error(), Some("boom"));
    }
}
