//! # Resource Actor
//!
//! Generic building blocks for storing resources behind actors. Every resource type
//! (users, courses, course contents, …) gets the same surface, written once:
//! create, get, update, delete, list with filters, and count.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`] + [`Fields`]) - the domain row, its DTOs and hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - one Tokio task that owns the rows of a type
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - type-safe, cloneable handles
//!
//! List requests carry a [`StoreFilter`]: conjunctive match [`Clause`]s, a list of
//! [`SortKey`]s and an optional limit. Rows expose their fields by name through
//! [`Fields`], which is what lets one filter engine serve every entity.
//!
//! ## Context Injection
//!
//! Dependencies are injected when the actor starts (`actor.run(ctx)`), not when it is
//! built. An entity whose rows belong to another resource takes that resource's
//! client as its `Context` and can look the parent up in `on_create`.
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Messages are processed **sequentially** within an actor, so each request is
//!   atomic for the row it touches
//! - Different actors run in **parallel**
//! - There is no version token: concurrent updates of one row are last-writer-wins
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from a queue of expectations, for testing code
//! that depends on another resource without spawning its actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod fields;
pub mod filter;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use fields::{FieldValue, Fields};
pub use filter::{Clause, SortDirection, SortKey, StoreFilter};
pub use message::{ResourceRequest, Response};
