use chrono::{DateTime, Utc};
use resource_actor::{FieldValue, Fields};
use serde::{Deserialize, Serialize};

use super::CourseId;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub date_created: DateTime<Utc>,
}

impl Fields for Course {
    fn field(&self, name: &str) -> Option<FieldValue> {
        let value: FieldValue = match name {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "description" => self.description.as_str().into(),
            "imageUrl" => self.image_url.clone().into(),
            "dateCreated" => self.date_created.into(),
            _ => return None,
        };
        Some(value)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseCreate {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}
