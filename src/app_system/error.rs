use thiserror::Error;

use crate::config::ConfigError;
use crate::storage::StorageError;

/// Errors raised while starting or stopping the platform.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Actor task failed: {0}")]
    ActorTask(#[from] tokio::task::JoinError),
}
