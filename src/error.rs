use crate::config::ConfigError;
use crate::cortex::CortexError;
use thiserror::Error;

/// Top-level bridge errors.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cortex client error: {0}")]
    Cortex(#[from] CortexError),

    #[error("Session already started")]
    AlreadyStarted,

    #[error("Session is closed")]
    Closed,
}

pub type BridgeResult<T> = Result<T, BridgeError>;
