//! # Generic Messages
//!
//! This module defines the generic message types used for communication between
//! the `ResourceClient` and `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::filter::StoreFilter;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// The variants map to the resource lifecycle:
///
/// - **Create**: builds a row from [`ActorEntity::Create`] and returns it with its new id.
/// - **Get**: fetches the current state of a row by id.
/// - **Update**: applies [`ActorEntity::Update`] and returns the new state.
/// - **Delete**: removes a row permanently and returns its id.
/// - **List**: returns the rows selected by a [`StoreFilter`].
/// - **Count**: returns the number of stored rows.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<T::Id>,
    },
    List {
        filter: StoreFilter,
        respond_to: Response<Vec<T>>,
    },
    Count {
        respond_to: Response<usize>,
    },
}
