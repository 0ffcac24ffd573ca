//! Conversions between the error types of the server layers.

use crate::domain::types::TypeConstraintError;
use crate::forms::{FormErrors, FormReadError};
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::BadRequest(val.to_string())
    }
}

impl From<FormErrors> for ServiceError {
    fn from(val: FormErrors) -> Self {
        ServiceError::Form(val)
    }
}

impl From<FormReadError> for ServiceError {
    fn from(val: FormReadError) -> Self {
        match val {
            FormReadError::TooLarge(_) => ServiceError::PayloadTooLarge,
            other => ServiceError::BadRequest(other.to_string()),
        }
    }
}
