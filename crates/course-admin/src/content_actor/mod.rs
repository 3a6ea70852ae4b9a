//! # Content Actor
//!
//! Stores course contents. Its context is the [`CourseClient`]: a content can only be
//! created under a course that exists.
//!
//! ```rust,ignore
//! let (course_actor, course_client) = course_actor::new(32);
//! let (content_actor, content_client) = content_actor::new(32);
//!
//! tokio::spawn(course_actor.run(()));
//! tokio::spawn(content_actor.run(course_client.clone()));
//! ```

pub mod entity;

use crate::clients::ContentClient;
use crate::model::Content;
use resource_actor::ResourceActor;

/// Creates a new Content actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Content>, ContentClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    let client = ContentClient::new(generic_client);

    (actor, client)
}
