use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    #[error("Format error: {0}")]
    FormatError(String),
    #[error("Tag {0} not found")]
    NotFound(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Amount resolution error: {0}")]
    ResolutionError(String),
    #[error("Decode error: {0}")]
    DecodeError(String),
    #[error("Gateway error: {0}")]
    GatewayError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PaymentError>;
