//! # ActorEntity Trait
//!
//! The `ActorEntity` trait defines the contract that every resource (User, Course, Content, …)
//! must implement to be managed by the generic `ResourceActor`. It specifies associated types
//! for IDs, DTOs, context, and errors, and provides lifecycle hooks (`on_create`, `on_update`,
//! `on_delete`). Implementing this trait gives any domain model the same
//! create / get / update / delete / list / count surface.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//! - [`ActorEntity::unique_key`]
//!
//! The defaults do nothing (`Ok(())` / `None`).

use crate::fields::Fields;
use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use uuid::Uuid;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// Hooks are async and receive the `Context` handed to `ResourceActor::run`, so
/// dependencies (other clients, a password encoder) are bound when the actor
/// starts rather than when it is constructed.
#[async_trait]
pub trait ActorEntity: Fields + Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Built from a fresh random UUID for every created row.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<Uuid>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance. Absent fields are left untouched.
    type Update: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One error type covers every hook of the entity. Hook errors are boxed into
    /// [`FrameworkError::EntityError`](crate::FrameworkError::EntityError) on the way out.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(
        id: Self::Id,
        params: Self::Create,
        ctx: &Self::Context,
    ) -> Result<Self, Self::Error>;

    /// Case-sensitive key that must be unique across the store, if any.
    fn unique_key(&self) -> Option<String> {
        None
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is built and before it is stored.
    /// Use this hook for validation that needs the context (e.g. checking other actors).
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies an update request.
    ///
    /// Runs on a copy of the stored row. The copy replaces the stored row only if
    /// this returns `Ok`, so a failing hook never leaves a partial write behind.
    async fn on_update(&mut self, update: Self::Update, ctx: &Self::Context)
        -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the system.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
