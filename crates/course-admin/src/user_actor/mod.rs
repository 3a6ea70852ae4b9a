//! # User Actor
//!
//! Stores user accounts. The actor's context is the [`PasswordEncoder`] used to hash
//! credentials on create and to verify the old password on a password change.
//!
//! ```rust,ignore
//! let (actor, client) = user_actor::new(32);
//! let encoder: Arc<dyn PasswordEncoder> = Arc::new(Sha256Encoder);
//! tokio::spawn(actor.run(encoder));
//! ```
//!
//! Usernames are the entity's unique key, so a duplicate registration or a rename
//! onto a taken username fails inside the actor, atomically with the write.

pub mod entity;

use crate::clients::UserClient;
use crate::model::User;
use resource_actor::ResourceActor;

/// Creates a new User actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<User>, UserClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    let client = UserClient::new(generic_client);

    (actor, client)
}
