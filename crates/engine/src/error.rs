use thiserror::Error;

use crate::core::ConfigError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid game configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("game loop has stopped")]
    Closed,

    #[error("command queue is full")]
    Busy,

    #[error("game loop task failed: {0}")]
    Join(String),
}
