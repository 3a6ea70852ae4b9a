//! # Framework Errors
//!
//! This module defines the common error types used throughout the store engine.
//! Entity-specific failures raised inside lifecycle hooks travel boxed in
//! [`FrameworkError::EntityError`] so that clients can downcast them back to
//! their own error type.

/// Errors that can occur within the store engine itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    /// Another row already holds the entity's unique key.
    #[error("Unique key already taken: {0}")]
    Conflict(String),
    /// A filter clause or sort key names a field the entity does not expose.
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}
