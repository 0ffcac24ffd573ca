use thiserror::Error;

use crate::forms::FormErrors;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The caller did not present a valid editorial token.
    #[error("unauthorized")]
    Unauthorized,
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// Submitted data failed validation.
    #[error("{0}")]
    Form(FormErrors),
    /// The request body could not be read.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// The request body exceeded the configured upload limit.
    #[error("payload too large")]
    PayloadTooLarge,
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
