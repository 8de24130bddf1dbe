use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Transport failed: {0}")]
    Transport(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
