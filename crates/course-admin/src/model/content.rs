use chrono::{DateTime, Utc};
use resource_actor::{FieldValue, Fields};
use serde::{Deserialize, Serialize};

use super::{ContentId, CourseId};

/// A unit of material inside a course.
///
/// `course_id` is stored and filterable but left out of serialized rows; clients
/// always reach contents through their course's path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub id: ContentId,
    pub name: String,
    pub description: String,
    pub date_created: DateTime<Utc>,
    #[serde(skip)]
    pub course_id: CourseId,
}

impl Fields for Content {
    fn field(&self, name: &str) -> Option<FieldValue> {
        let value: FieldValue = match name {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "description" => self.description.as_str().into(),
            "dateCreated" => self.date_created.into(),
            "courseId" => self.course_id.into(),
            _ => return None,
        };
        Some(value)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentCreate {
    pub name: String,
    pub description: String,
}

/// Creation payload as the content actor sees it: the body plus the owning course.
#[derive(Debug, Clone)]
pub struct NewContent {
    pub course_id: CourseId,
    pub content: ContentCreate,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn course_id_is_filterable_but_hidden() {
        let course_id = CourseId::from(Uuid::new_v4());
        let content = Content {
            id: ContentId::from(Uuid::new_v4()),
            name: "Ownership".into(),
            description: "Moves and borrows".into(),
            date_created: Utc::now(),
            course_id,
        };
        assert_eq!(
            content.field("courseId"),
            Some(FieldValue::Text(course_id.to_string()))
        );
        let json = serde_json::to_value(&content).unwrap();
        assert!(json.get("courseId").is_none());
        assert_eq!(json["name"], "Ownership");
        assert!(json.get("dateCreated").is_some());
    }
}
