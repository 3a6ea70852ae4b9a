//! # Course Client

use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

use crate::auth::{Action, Caller, ResourceKind};
use crate::error::ServiceError;
use crate::model::{Course, CourseCreate, CourseId, CourseUpdate};
use crate::query::{CourseQuery, ListQuery};

/// Client for interacting with the Course actor.
#[derive(Clone)]
pub struct CourseClient {
    inner: ResourceClient<Course>,
}

#[async_trait]
impl ActorClient<Course> for CourseClient {
    type Error = ServiceError;

    fn inner(&self) -> &ResourceClient<Course> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        ServiceError::from_framework(e, "course")
    }
}

impl CourseClient {
    pub fn new(inner: ResourceClient<Course>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create(
        &self,
        caller: &Caller,
        params: CourseCreate,
    ) -> Result<Course, ServiceError> {
        caller.authorize(Action::Create, ResourceKind::Course)?;
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn find_all(
        &self,
        caller: &Caller,
        query: &CourseQuery,
    ) -> Result<Vec<Course>, ServiceError> {
        caller.authorize(Action::List, ResourceKind::Course)?;
        self.list(query.translate()).await
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, caller: &Caller, id: CourseId) -> Result<Course, ServiceError> {
        caller.authorize(Action::List, ResourceKind::Course)?;
        self.get(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("course", &id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        caller: &Caller,
        id: CourseId,
        update: CourseUpdate,
    ) -> Result<Course, ServiceError> {
        caller.authorize(Action::Edit, ResourceKind::Course)?;
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn delete_by_id(
        &self,
        caller: &Caller,
        id: CourseId,
    ) -> Result<CourseId, ServiceError> {
        caller.authorize(Action::Delete, ResourceKind::Course)?;
        self.delete(id).await
    }
}
