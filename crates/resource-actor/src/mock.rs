//! # Mock Clients
//!
//! [`MockClient<T>`] hands out a real [`ResourceClient<T>`] whose requests are answered
//! from a queue of expectations instead of a running actor. It lets you test code that
//! depends on another resource (for example an entity hook that looks up its parent row)
//! without spawning that resource's actor.
//!
//! | | MockClient | Real Actor |
//! |---|---|---|
//! | **State** | None, answers come from expectations | Real store |
//! | **Use Case** | Isolating the code under test from a dependency | Testing the actor itself or the full system |
//! | **Error Injection** | Easy (`return_err`) | Needs specific state |
//!
//! ```rust
//! use resource_actor::mock::MockClient;
//! use resource_actor::{ActorEntity, FieldValue, Fields, FrameworkError};
//! use async_trait::async_trait;
//! use uuid::Uuid;
//!
//! #[derive(Clone, Debug)] struct Tag { id: Uuid }
//! #[derive(Debug)] struct TagCreate;
//! #[derive(Debug)] struct TagUpdate;
//! #[derive(Debug, thiserror::Error)] #[error("tag error")] struct TagError;
//! impl Fields for Tag { fn field(&self, _: &str) -> Option<FieldValue> { None } }
//!
//! #[async_trait]
//! impl ActorEntity for Tag {
//!     type Id = Uuid; type Create = TagCreate; type Update = TagUpdate;
//!     type Context = (); type Error = TagError;
//!     fn from_create_params(id: Uuid, _: TagCreate, _: &()) -> Result<Self, TagError> {
//!         Ok(Self { id })
//!     }
//!     async fn on_update(&mut self, _: TagUpdate, _: &()) -> Result<(), TagError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let id = Uuid::new_v4();
//!     let mut mock = MockClient::<Tag>::new();
//!     mock.expect_get(id).return_ok(Some(Tag { id }));
//!     mock.expect_delete(id).return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert!(client.get(id).await.unwrap().is_some());
//!     assert!(matches!(client.delete(id).await, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! For lower-level assertions on the exact request payload, use [`create_mock_client`]
//! together with the `expect_*` receiver helpers.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::filter::StoreFilter;
use crate::message::{ResourceRequest, Response};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the answer to give.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<T::Id, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Count {
        response: Result<usize, FrameworkError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations are consumed in the order they were declared. A request that does not
/// match the next expectation (wrong kind or wrong id) stops the mock, and the caller
/// sees [`FrameworkError::ActorDropped`].
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get { id: expected, response }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update { id: expected, response }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { id, respond_to },
                        Some(Expectation::Delete { id: expected, response }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::List { respond_to, .. },
                        Some(Expectation::List { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Count { respond_to },
                        Some(Expectation::Count { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        tracing::error!("Unexpected request or expectation mismatch");
                        break;
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(|response| Expectation::Create { response })
    }

    /// Expects an `update` operation.
    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    /// Expects a `delete` operation.
    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, T::Id> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    /// Expects a `list` operation.
    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::List { response })
    }

    /// Expects a `count` operation.
    pub fn expect_count(&mut self) -> ExpectationBuilder<T, usize> {
        self.builder(|response| Expectation::Count { response })
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }

    fn builder<R>(
        &self,
        make: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            make: Box::new(make),
            expectations: self.expectations.clone(),
        }
    }
}

/// Builder that completes an expectation with its answer.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    make: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
    expectations: Expectations<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.make)(response);
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

// =============================================================================
// RECEIVER HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// Use this when the test needs to inspect the request payload itself (for example the
/// [`StoreFilter`] a list call produced) before answering it.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Returns the next request if it is a Create request.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Returns the next request if it is a Get request.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Returns the next request if it is a List request.
pub async fn expect_list<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(StoreFilter, Response<Vec<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::List { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{FieldValue, Fields};
    use async_trait::async_trait;
    use uuid::Uuid;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: Uuid,
        title: String,
    }

    #[derive(Debug)]
    struct NoteCreate {
        title: String,
    }

    #[derive(Debug)]
    struct NoteUpdate;

    #[derive(Debug, thiserror::Error)]
    #[error("Note error")]
    struct NoteError;

    impl Fields for Note {
        fn field(&self, name: &str) -> Option<FieldValue> {
            (name == "title").then(|| self.title.as_str().into())
        }
    }

    #[async_trait]
    impl ActorEntity for Note {
        type Id = Uuid;
        type Create = NoteCreate;
        type Update = NoteUpdate;
        type Context = ();
        type Error = NoteError;

        fn from_create_params(id: Uuid, params: NoteCreate, _: &()) -> Result<Self, NoteError> {
            Ok(Self {
                id,
                title: params.title,
            })
        }

        async fn on_update(&mut self, _: NoteUpdate, _: &()) -> Result<(), NoteError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_receiver_helpers() {
        let (client, mut receiver) = create_mock_client::<Note>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(NoteCreate {
                    title: "Week 1".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.title, "Week 1");
        let id = Uuid::new_v4();
        responder
            .send(Ok(Note {
                id,
                title: payload.title,
            }))
            .unwrap();

        let created = create_task.await.unwrap().unwrap();
        assert_eq!(created.id, id);
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let id = Uuid::new_v4();
        let note = Note {
            id,
            title: "Week 1".to_string(),
        };

        let mut mock = MockClient::<Note>::new();
        mock.expect_create().return_ok(note.clone());
        mock.expect_get(id).return_ok(Some(note.clone()));
        mock.expect_count().return_ok(1);
        mock.expect_delete(id).return_ok(id);

        let client = mock.client();
        let created = client
            .create(NoteCreate {
                title: "Week 1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created, note);
        assert_eq!(client.get(id).await.unwrap(), Some(note));
        assert_eq!(client.count().await.unwrap(), 1);
        assert_eq!(client.delete(id).await.unwrap(), id);

        mock.verify();
    }

    #[tokio::test]
    async fn test_mismatched_request_drops_the_response() {
        let mut mock = MockClient::<Note>::new();
        mock.expect_count().return_ok(3);

        let result = mock.client().get(Uuid::new_v4()).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }
}
