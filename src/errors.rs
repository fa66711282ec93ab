//! Core error types for the equity grant tracker.
//!
//! This module defines the crate-root error enum. Module-specific errors
//! (`GrantError`) are converted into this type at the public surface.

use thiserror::Error;

use crate::grants::GrantError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the grant tracking core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Grant error: {0}")]
    Grant(#[from] GrantError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Validation errors for imported payloads.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::MalformedPayload(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
