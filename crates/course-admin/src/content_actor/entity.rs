//! [`ActorEntity`] implementation for [`Content`].

use async_trait::async_trait;
use chrono::Utc;
use resource_actor::{ActorClient, ActorEntity};
use tracing::{debug, warn};

use crate::clients::CourseClient;
use crate::error::{require_text, update_text, ServiceError};
use crate::model::{Content, ContentId, ContentUpdate, NewContent};

#[async_trait]
impl ActorEntity for Content {
    type Id = ContentId;
    type Create = NewContent;
    type Update = ContentUpdate;
    type Context = CourseClient;
    type Error = ServiceError;

    fn from_create_params(
        id: ContentId,
        params: NewContent,
        _courses: &CourseClient,
    ) -> Result<Self, ServiceError> {
        require_text("name", &params.content.name)?;
        require_text("description", &params.content.description)?;

        Ok(Self {
            id,
            name: params.content.name,
            description: params.content.description,
            date_created: Utc::now(),
            course_id: params.course_id,
        })
    }

    /// Checks that the owning course exists.
    async fn on_create(&mut self, courses: &CourseClient) -> Result<(), ServiceError> {
        debug!(course_id = %self.course_id, "Validating course");
        match courses.get(self.course_id).await? {
            Some(_) => Ok(()),
            None => {
                warn!(course_id = %self.course_id, "Course not found");
                Err(ServiceError::not_found("course", &self.course_id.to_string()))
            }
        }
    }

    async fn on_update(
        &mut self,
        update: ContentUpdate,
        _courses: &CourseClient,
    ) -> Result<(), ServiceError> {
        update_text("name", &mut self.name, update.name)?;
        update_text("description", &mut self.description, update.description)?;
        Ok(())
    }
}
