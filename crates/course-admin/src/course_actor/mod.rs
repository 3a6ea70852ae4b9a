//! # Course Actor
//!
//! Stores courses. Courses have no dependencies, so the actor runs with `()` as its
//! context. Deleting a course leaves its contents in place.

pub mod entity;

use crate::clients::CourseClient;
use crate::model::Course;
use resource_actor::ResourceActor;

/// Creates a new Course actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Course>, CourseClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    let client = CourseClient::new(generic_client);

    (actor, client)
}
