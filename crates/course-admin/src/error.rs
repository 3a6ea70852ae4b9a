//! Error types shared by every resource service.

use resource_actor::FrameworkError;
use thiserror::Error;

/// Fallback shown to the user when a failure carries no usable message.
pub const GENERIC_ERROR_MESSAGE: &str = "Ocurrió un error";

/// Failures a resource service reports to its caller.
///
/// The display text is the user-facing message and is surfaced verbatim, except for
/// [`ServiceError::Transient`], whose text is for logs only.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    /// Missing or malformed input, caught before persistence.
    #[error("{0}")]
    Validation(String),

    /// A unique key (e.g. a username) is already taken.
    #[error("{0}")]
    Conflict(String),

    /// No row matches the requested id.
    #[error("{0}")]
    NotFound(String),

    /// A business rule rejected the request (e.g. wrong old password).
    #[error("{0}")]
    BadRequest(String),

    /// The caller could not be identified.
    #[error("{0}")]
    Unauthenticated(String),

    /// The caller's role does not allow the action.
    #[error("{0}")]
    Forbidden(String),

    /// Infrastructure failure (actor gone, channel dropped, unexpected error).
    #[error("{0}")]
    Transient(String),
}

impl ServiceError {
    /// Maps an engine error for `resource` (e.g. "course") into a service error.
    ///
    /// Entity hook errors are recovered by downcasting; anything that is not a
    /// `ServiceError` is treated as transient.
    pub fn from_framework(e: FrameworkError, resource: &str) -> Self {
        match e {
            FrameworkError::NotFound(id) => ServiceError::not_found(resource, &id),
            FrameworkError::Conflict(key) => {
                ServiceError::Conflict(format!("{resource} {key} already exists"))
            }
            FrameworkError::UnknownField(field) => {
                ServiceError::BadRequest(format!("Cannot filter or sort {resource} by {field}"))
            }
            FrameworkError::EntityError(inner) => match inner.downcast::<ServiceError>() {
                Ok(service_error) => *service_error,
                Err(other) => ServiceError::Transient(other.to_string()),
            },
            FrameworkError::ActorClosed | FrameworkError::ActorDropped => {
                ServiceError::Transient(e.to_string())
            }
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ServiceError::NotFound(format!("Could not find {resource} with matching id {id}"))
    }

    pub fn required(field: &str) -> Self {
        ServiceError::Validation(format!("{field} is required"))
    }

    /// The message to show in the UI for this error.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Transient(_) => GENERIC_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

/// Fails with a validation error when `value` is blank.
pub fn require_text(field: &str, value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::required(field));
    }
    Ok(())
}

/// Replaces `target` with `value` when one is provided, rejecting blank text.
pub fn update_text(
    field: &str,
    target: &mut String,
    value: Option<String>,
) -> Result<(), ServiceError> {
    if let Some(value) = value {
        require_text(field, &value)?;
        *target = value;
    }
    Ok(())
}
