//! # Filter Translator
//!
//! Turns the sparse query a list endpoint receives into a [`StoreFilter`]:
//!
//! - every non-empty text field becomes a case-insensitive "contains" clause
//! - `sortBy` + `sortOrder` together replace the resource's default ordering
//! - `limit` caps the result; without it every matching row is returned
//!
//! The translator does not check that `sortBy` names a real field. The store rejects
//! unknown fields with [`FrameworkError::UnknownField`](resource_actor::FrameworkError).

use std::num::NonZeroUsize;

use resource_actor::{Clause, FieldValue, SortDirection, SortKey, StoreFilter};
use serde::{Deserialize, Serialize};

use crate::auth::Role;
use crate::model::CourseId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl From<SortOrder> for SortDirection {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => SortDirection::Asc,
            SortOrder::Desc => SortDirection::Desc,
        }
    }
}

/// A list query for one resource type.
///
/// Implementors describe their fields; [`ListQuery::translate`] is shared.
pub trait ListQuery {
    /// Substring patterns keyed by field name. `None` or empty imposes no constraint.
    fn text_filters(&self) -> Vec<(&'static str, Option<&str>)>;

    /// Exact-match clauses (enums, foreign keys).
    fn exact_filters(&self) -> Vec<Clause> {
        Vec::new()
    }

    /// Ordering used unless both `sort_by` and `sort_order` are given.
    fn default_order(&self) -> Vec<SortKey>;

    fn sort_by(&self) -> Option<&str>;
    fn sort_order(&self) -> Option<SortOrder>;
    fn limit(&self) -> Option<NonZeroUsize>;

    fn translate(&self) -> StoreFilter {
        let mut filter = StoreFilter::new();

        for (field, pattern) in self.text_filters() {
            if let Some(pattern) = pattern.filter(|p| !p.is_empty()) {
                filter = filter.with_clause(Clause::contains(field, pattern));
            }
        }
        for clause in self.exact_filters() {
            filter = filter.with_clause(clause);
        }

        match (self.sort_by().filter(|f| !f.is_empty()), self.sort_order()) {
            (Some(field), Some(order)) => {
                filter = filter.order_by(SortKey {
                    field: field.to_string(),
                    direction: order.into(),
                });
            }
            _ => {
                for key in self.default_order() {
                    filter = filter.order_by(key);
                }
            }
        }

        if let Some(limit) = self.limit() {
            filter = filter.limit(limit.get());
        }
        filter
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseQuery {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub limit: Option<NonZeroUsize>,
}

impl ListQuery for CourseQuery {
    fn text_filters(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("name", self.name.as_deref()),
            ("description", self.description.as_deref()),
            ("imageUrl", self.image_url.as_deref()),
        ]
    }

    fn default_order(&self) -> Vec<SortKey> {
        vec![SortKey::asc("name"), SortKey::asc("description")]
    }

    fn sort_by(&self) -> Option<&str> {
        self.sort_by.as_deref()
    }

    fn sort_order(&self) -> Option<SortOrder> {
        self.sort_order
    }

    fn limit(&self) -> Option<NonZeroUsize> {
        self.limit
    }
}

/// Query over the contents of one course. `course_id` comes from the request path.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentQuery {
    #[serde(skip)]
    pub course_id: Option<CourseId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub limit: Option<NonZeroUsize>,
}

impl ListQuery for ContentQuery {
    fn text_filters(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("name", self.name.as_deref()),
            ("description", self.description.as_deref()),
        ]
    }

    fn exact_filters(&self) -> Vec<Clause> {
        self.course_id
            .map(|id| Clause::equals("courseId", id))
            .into_iter()
            .collect()
    }

    fn default_order(&self) -> Vec<SortKey> {
        vec![SortKey::asc("name"), SortKey::asc("description")]
    }

    fn sort_by(&self) -> Option<&str> {
        self.sort_by.as_deref()
    }

    fn sort_order(&self) -> Option<SortOrder> {
        self.sort_order
    }

    fn limit(&self) -> Option<NonZeroUsize> {
        self.limit
    }
}

/// Query over user accounts. Without a `role`, administrators are left out.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub role: Option<Role>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub limit: Option<NonZeroUsize>,
}

impl ListQuery for UserQuery {
    fn text_filters(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("firstName", self.first_name.as_deref()),
            ("lastName", self.last_name.as_deref()),
            ("username", self.username.as_deref()),
        ]
    }

    fn exact_filters(&self) -> Vec<Clause> {
        let clause = match self.role {
            Some(role) => Clause::equals("role", role),
            None => Clause::any_of(
                "role",
                vec![FieldValue::from(Role::User), FieldValue::from(Role::Editor)],
            ),
        };
        vec![clause]
    }

    fn default_order(&self) -> Vec<SortKey> {
        vec![SortKey::asc("firstName"), SortKey::asc("lastName")]
    }

    fn sort_by(&self) -> Option<&str> {
        self.sort_by.as_deref()
    }

    fn sort_order(&self) -> Option<SortOrder> {
        self.sort_order
    }

    fn limit(&self) -> Option<NonZeroUsize> {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn empty_query_uses_default_order_only() {
        let filter = CourseQuery::default().translate();
        assert!(filter.clauses.is_empty());
        assert_eq!(
            filter.order,
            vec![SortKey::asc("name"), SortKey::asc("description")]
        );
        assert_eq!(filter.limit, None);
    }

    #[test]
    fn present_fields_become_contains_clauses() {
        let query = CourseQuery {
            name: Some("intro".into()),
            description: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            query.translate().clauses,
            vec![Clause::contains("name", "intro")]
        );
    }

    #[test]
    fn sort_needs_both_field_and_direction() {
        let only_field = CourseQuery {
            sort_by: Some("dateCreated".into()),
            ..Default::default()
        };
        assert_eq!(only_field.translate().order.len(), 2);

        let both = CourseQuery {
            sort_by: Some("dateCreated".into()),
            sort_order: Some(SortOrder::Desc),
            limit: NonZeroUsize::new(5),
            ..Default::default()
        };
        let filter = both.translate();
        assert_eq!(filter.order, vec![SortKey::desc("dateCreated")]);
        assert_eq!(filter.limit, Some(5));
    }

    #[test]
    fn content_query_is_scoped_to_its_course() {
        let course_id = CourseId::from(Uuid::new_v4());
        let query = ContentQuery {
            course_id: Some(course_id),
            name: Some("loops".into()),
            ..Default::default()
        };
        assert_eq!(
            query.translate().clauses,
            vec![
                Clause::contains("name", "loops"),
                Clause::equals("courseId", course_id),
            ]
        );
    }

    #[test]
    fn user_query_hides_admins_unless_role_is_given() {
        let default_clauses = UserQuery::default().translate().clauses;
        assert_eq!(
            default_clauses,
            vec![Clause::any_of(
                "role",
                vec![FieldValue::from("user"), FieldValue::from("editor")]
            )]
        );

        let admins = UserQuery {
            role: Some(Role::Admin),
            ..Default::default()
        };
        assert_eq!(
            admins.translate().clauses,
            vec![Clause::equals("role", Role::Admin)]
        );
        assert_eq!(
            UserQuery::default().translate().order,
            vec![SortKey::asc("firstName"), SortKey::asc("lastName")]
        );
    }

    #[test]
    fn deserializes_camel_case_query_strings() {
        let query: CourseQuery = serde_json::from_value(serde_json::json!({
            "imageUrl": "png",
            "sortBy": "name",
            "sortOrder": "DESC",
            "limit": 3
        }))
        .unwrap();
        assert_eq!(query.image_url.as_deref(), Some("png"));
        assert_eq!(query.sort_order, Some(SortOrder::Desc));
        assert_eq!(query.limit, NonZeroUsize::new(3));
    }
}
