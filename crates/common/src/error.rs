//! Common error types shared across crates.

use thiserror::Error;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::Internal`] → 500
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was malformed: invalid JSON body, undecodable envelope, or
    /// a payload that cannot be decrypted. Terminal for the caller; replaying
    /// the same payload against the same key cannot succeed.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The response payload could not be serialised or encrypted.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::Internal(_) => 500,
        }
    }
}
