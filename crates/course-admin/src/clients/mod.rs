//! # Resource Service Clients
//!
//! One client per resource. Each wraps a [`ResourceClient`](resource_actor::ResourceClient),
//! inherits `get`/`delete`/`list`/`count` from [`ActorClient`](resource_actor::ActorClient),
//! and adds the service operations. Service operations take the [`Caller`](crate::auth::Caller)
//! and re-check the Authorization Gate before anything reaches the store.

pub mod content_client;
pub mod course_client;
pub mod user_client;

pub use content_client::ContentClient;
pub use course_client::CourseClient;
pub use user_client::UserClient;
