use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Cart operations always succeed; only the channel can fail.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(#[from] FrameworkError),
}
