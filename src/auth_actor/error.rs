use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during authentication.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("User with this email already exists: {0}")]
    EmailTaken(String),
    #[error("Signup validation error: {0}")]
    Validation(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(#[from] FrameworkError),
}
