use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    RfcError(#[from] recur_rfc::error::RfcError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
