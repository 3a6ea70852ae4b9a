//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that owns the rows of one
//! entity type. It is the "Server" side of the Actor Model: messages are processed
//! one at a time, so every request is atomic at the row level without locks.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// The generic actor that manages a collection of entities.
///
/// The actor owns the store and the receiver end of the channel. Each instance runs
/// in its own Tokio task and processes its messages sequentially, so the store needs
/// no `Mutex`. Concurrent updates to the same row are applied in arrival order and the
/// last writer wins.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client`
///     (interface).
/// 2.  **Wire**: Pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: Spawn the actor's run loop in a background task.
///
/// ```rust
/// use resource_actor::{ActorEntity, FieldValue, Fields, ResourceActor};
/// use async_trait::async_trait;
/// use uuid::Uuid;
///
/// #[derive(Clone, Debug)] struct Tag { id: Uuid, label: String }
/// #[derive(Debug)] struct TagCreate { label: String }
/// #[derive(Debug)] struct TagUpdate;
/// #[derive(Debug)] struct TagError;
/// impl std::fmt::Display for TagError {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "tag error")
///     }
/// }
/// impl std::error::Error for TagError {}
///
/// impl Fields for Tag {
///     fn field(&self, name: &str) -> Option<FieldValue> {
///         (name == "label").then(|| self.label.as_str().into())
///     }
/// }
///
/// #[async_trait]
/// impl ActorEntity for Tag {
///     type Id = Uuid;
///     type Create = TagCreate;
///     type Update = TagUpdate;
///     type Context = ();
///     type Error = TagError;
///
///     fn from_create_params(id: Uuid, params: TagCreate, _: &()) -> Result<Self, TagError> {
///         Ok(Self { id, label: params.label })
///     }
///     async fn on_update(&mut self, _: TagUpdate, _: &()) -> Result<(), TagError> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Tag>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let tag = client.create(TagCreate { label: "rust".into() }).await.unwrap();
///     assert_eq!(client.count().await.unwrap(), 1);
///     assert_eq!(client.delete(tag.id).await.unwrap(), tag.id);
/// }
/// ```
///
/// # Operations
///
/// * **Create**: generates a fresh id, builds the row with `from_create_params`, runs
///   `on_create`, checks the unique key, stores the row and returns it.
/// * **Get**: returns a clone of the row, or `None`.
/// * **Update**: runs `on_update` on a copy, checks the unique key against other rows,
///   then swaps the copy in and returns it.
/// * **Delete**: runs `on_delete`, removes the row and returns its id.
/// * **List**: evaluates a [`StoreFilter`](crate::StoreFilter) over the rows in insertion order.
/// * **Count**: returns the number of rows.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    /// Insertion order of the ids in `store`.
    order: Vec<T::Id>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the MPSC channel. When the channel is full,
    /// calls on the client wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            order: Vec::new(),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// The `context` argument is injected into every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // Just the type name ("Course" rather than "course_admin::model::course::Course")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(Uuid::new_v4());
                    let result = self.create(id.clone(), params, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, size = self.store.len(), "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = self.update(&id, update, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Updated"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let result = self.delete(id, &context).await;
                    match &result {
                        Ok(id) => info!(entity_type, %id, size = self.store.len(), "Deleted"),
                        Err(e) => warn!(entity_type, error = %e, "Delete failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::List { filter, respond_to } => {
                    debug!(entity_type, ?filter, "List");
                    let rows = self.order.iter().filter_map(|id| self.store.get(id));
                    let result = filter.apply(rows);
                    match &result {
                        Ok(items) => debug!(entity_type, count = items.len(), "Listed"),
                        Err(e) => warn!(entity_type, error = %e, "List failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Count { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "Count");
                    let _ = respond_to.send(Ok(self.store.len()));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn create(
        &mut self,
        id: T::Id,
        params: T::Create,
        context: &T::Context,
    ) -> Result<T, FrameworkError> {
        let mut item = T::from_create_params(id.clone(), params, context)
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
        item.on_create(context)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
        self.check_unique(&item, None)?;

        self.store.insert(id.clone(), item.clone());
        self.order.push(id);
        Ok(item)
    }

    async fn update(
        &mut self,
        id: &T::Id,
        update: T::Update,
        context: &T::Context,
    ) -> Result<T, FrameworkError> {
        let mut draft = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        draft
            .on_update(update, context)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
        self.check_unique(&draft, Some(id))?;

        self.store.insert(id.clone(), draft.clone());
        Ok(draft)
    }

    async fn delete(&mut self, id: T::Id, context: &T::Context) -> Result<T::Id, FrameworkError> {
        let item = self
            .store
            .get(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.on_delete(context)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;

        self.store.remove(&id);
        self.order.retain(|existing| existing != &id);
        Ok(id)
    }

    /// Fails if another row (other than `except`) already holds `item`'s unique key.
    fn check_unique(&self, item: &T, except: Option<&T::Id>) -> Result<(), FrameworkError> {
        let Some(key) = item.unique_key() else {
            return Ok(());
        };
        let taken = self
            .store
            .iter()
            .filter(|(id, _)| Some(*id) != except)
            .any(|(_, other)| other.unique_key().as_deref() == Some(key.as_str()));
        if taken {
            return Err(FrameworkError::Conflict(key));
        }
        Ok(())
    }
}
