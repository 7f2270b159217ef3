use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::validation::{FieldErrors, FormError};

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(String),
    #[error("User already exists: {0}")]
    AlreadyExists(String),
    #[error("User validation error: {0}")]
    ValidationError(FormError),
    #[error("User rejected by directory: {0}")]
    Rejected(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl UserError {
    /// Field errors to render back on the form, if this is one.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            UserError::ValidationError(error) => error.field_errors(),
            _ => None,
        }
    }
}

impl From<FormError> for UserError {
    fn from(error: FormError) -> Self {
        UserError::ValidationError(error)
    }
}

impl From<FrameworkError> for UserError {
    fn from(error: FrameworkError) -> Self {
        match error {
            FrameworkError::NotFound(id) => UserError::NotFound(id),
            FrameworkError::Conflict(login) => UserError::AlreadyExists(login),
            FrameworkError::Rejected(reason) => UserError::Rejected(reason),
            FrameworkError::ActorClosed | FrameworkError::ActorDropped => {
                UserError::ActorCommunicationError(error.to_string())
            }
        }
    }
}
