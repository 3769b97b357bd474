use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during course operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CourseError {
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(#[from] FrameworkError),
}
