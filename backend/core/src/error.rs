use thiserror::Error as ThisError;

use crate::store::StoreError;

/// Errors surfaced by the service layer. The request-handling layer maps
/// these onto status codes.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        Error::Validation(errors.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
