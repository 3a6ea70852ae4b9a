//! # ActorClient Trait
//!
//! Provides a common interface for resource‑specific clients, adding default `get`, `delete`,
//! `list` and `count` methods built on top of a generic `ResourceClient`.
use crate::{ActorEntity, FrameworkError, ResourceClient, StoreFilter};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the standard store operations.
///
/// Implementors only supply access to the inner [`ResourceClient`] and a mapping from
/// [`FrameworkError`] into their own error type.
///
/// ```rust,ignore
/// #[derive(Clone)]
/// pub struct CourseClient {
///     inner: ResourceClient<Course>,
/// }
///
/// #[async_trait]
/// impl ActorClient<Course> for CourseClient {
///     type Error = ServiceError;
///
///     fn inner(&self) -> &ResourceClient<Course> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         ServiceError::from_framework(e, "course")
///     }
/// }
///
/// // get(), delete(), list() and count() are now available on CourseClient.
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Delete an entity by ID, returning the deleted ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<T::Id, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }

    /// List the entities selected by `filter`.
    #[tracing::instrument(skip(self))]
    async fn list(&self, filter: StoreFilter) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list(filter).await.map_err(Self::map_error)
    }

    /// Count all stored entities.
    #[tracing::instrument(skip(self))]
    async fn count(&self) -> Result<usize, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().count().await.map_err(Self::map_error)
    }
}
