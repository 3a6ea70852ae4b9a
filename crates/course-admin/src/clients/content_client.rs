//! # Content Client
//!
//! Contents are always addressed through their course. A content id that exists but
//! belongs to another course is reported as not found.

use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument, warn};

use crate::auth::{Action, Caller, ResourceKind};
use crate::error::ServiceError;
use crate::model::{Content, ContentCreate, ContentId, ContentUpdate, CourseId, NewContent};
use crate::query::{ContentQuery, ListQuery};

/// Client for interacting with the Content actor.
#[derive(Clone)]
pub struct ContentClient {
    inner: ResourceClient<Content>,
}

#[async_trait]
impl ActorClient<Content> for ContentClient {
    type Error = ServiceError;

    fn inner(&self) -> &ResourceClient<Content> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        ServiceError::from_framework(e, "content")
    }
}

impl ContentClient {
    pub fn new(inner: ResourceClient<Content>) -> Self {
        Self { inner }
    }

    /// Creates a content under `course_id`. The content actor checks that the course exists.
    #[instrument(skip(self))]
    pub async fn create(
        &self,
        caller: &Caller,
        course_id: CourseId,
        content: ContentCreate,
    ) -> Result<Content, ServiceError> {
        caller.authorize(Action::Create, ResourceKind::Content)?;
        debug!("Sending request");
        self.inner
            .create(NewContent { course_id, content })
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn find_all(
        &self,
        caller: &Caller,
        course_id: CourseId,
        query: &ContentQuery,
    ) -> Result<Vec<Content>, ServiceError> {
        caller.authorize(Action::List, ResourceKind::Content)?;
        let scoped = ContentQuery {
            course_id: Some(course_id),
            ..query.clone()
        };
        self.list(scoped.translate()).await
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(
        &self,
        caller: &Caller,
        course_id: CourseId,
        id: ContentId,
    ) -> Result<Content, ServiceError> {
        caller.authorize(Action::List, ResourceKind::Content)?;
        self.find_in_course(course_id, id).await
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        caller: &Caller,
        course_id: CourseId,
        id: ContentId,
        update: ContentUpdate,
    ) -> Result<Content, ServiceError> {
        caller.authorize(Action::Edit, ResourceKind::Content)?;
        self.find_in_course(course_id, id).await?;
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn delete_by_id(
        &self,
        caller: &Caller,
        course_id: CourseId,
        id: ContentId,
    ) -> Result<ContentId, ServiceError> {
        caller.authorize(Action::Delete, ResourceKind::Content)?;
        self.find_in_course(course_id, id).await?;
        self.delete(id).await
    }

    async fn find_in_course(
        &self,
        course_id: CourseId,
        id: ContentId,
    ) -> Result<Content, ServiceError> {
        match self.get(id).await? {
            Some(content) if content.course_id == course_id => Ok(content),
            Some(content) => {
                warn!(
                    %id,
                    expected = %course_id,
                    actual = %content.course_id,
                    "Content belongs to another course"
                );
                Err(ServiceError::not_found("content", &id.to_string()))
            }
            None => Err(ServiceError::not_found("content", &id.to_string())),
        }
    }
}
