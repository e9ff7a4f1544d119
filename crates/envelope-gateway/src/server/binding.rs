//! Binding between HTTP bodies and encrypted payloads.
//!
//! Inbound, the [`Sealed`] extractor reads the `payload` field from the JSON
//! body, decodes the envelope, decrypts it, and deserialises the plaintext
//! into the target domain type. Outbound, [`seal`] serialises a domain value,
//! encrypts it under a fresh IV, and wraps it back into a
//! [`SealedBody`]. Both directions use the [`SecretKey`] injected through
//! application state.
//!
//! Failure mapping follows the wire contract: every inbound failure is a
//! `400` whose body carries a human-readable cause, and outbound failures
//! are a `500` with a generic message. Outbound causes go to the log, never
//! to the caller.

use axum::{
    async_trait,
    extract::{FromRef, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use common::protocol::{ErrorBody, SealedBody};
use common::ServiceError;

use crate::crypto::{cipher, Envelope};
use crate::key::SecretKey;

/// Boundary error that renders as the wire `{"error": ...}` body.
///
/// Wraps [`ServiceError`] so handlers and extractors can bubble failures
/// with `?` and let Axum produce the response.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl ApiError {
    /// A 400 with the given cause.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(ServiceError::BadRequest(message.into()))
    }

    /// A 500 with the given message.
    pub fn internal(message: impl Into<String>) -> Self {
        Self(ServiceError::Internal(message.into()))
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorBody::new(self.0.to_string()))).into_response()
    }
}

/// Extractor for endpoints whose request body is an encrypted envelope.
///
/// ```rust,ignore
/// async fn update_budget(Sealed(budget): Sealed<Budget>) -> Json<Ack> { ... }
/// ```
///
/// Extraction runs the whole inbound chain: bind the JSON body, decode the
/// `payload` envelope, decrypt it, and deserialise the plaintext into `T`.
/// Any failure along the chain rejects the request with a `400` carrying the
/// failing step's cause, so handlers only ever see a well-formed `T`.
pub struct Sealed<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Sealed<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
    SecretKey: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let key = SecretKey::from_ref(state);

        let Json(body): Json<SealedBody> = Json::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("invalid envelope body: {e}")))?;

        let envelope = Envelope::decode(&body.payload)
            .map_err(|e| ApiError::bad_request(format!("cannot decode payload: {e}")))?;

        let plaintext = cipher::decrypt(key.as_bytes(), &envelope)
            .map_err(|e| ApiError::bad_request(format!("cannot decrypt payload: {e}")))?;

        let value = serde_json::from_slice(&plaintext)
            .map_err(|e| ApiError::bad_request(format!("cannot deserialise payload: {e}")))?;

        Ok(Sealed(value))
    }
}

/// Seal a domain value into the wire envelope.
///
/// Serialises `value`, encrypts it under a fresh IV, and returns the
/// `{"payload": ...}` body ready to send.
///
/// # Errors
///
/// Returns a 500-mapped [`ApiError`] if serialisation or encryption fails.
/// The cause is logged here rather than echoed to the caller.
pub fn seal<T: Serialize>(key: &SecretKey, value: &T) -> Result<SealedBody, ApiError> {
    let plaintext = serde_json::to_vec(value).map_err(|e| {
        warn!(error = %e, "response payload serialisation failed");
        ApiError::internal("failed to seal response payload")
    })?;

    let envelope = cipher::encrypt(key.as_bytes(), &plaintext).map_err(|e| {
        warn!(error = %e, "response payload encryption failed");
        ApiError::internal("failed to seal response payload")
    })?;

    Ok(SealedBody {
        payload: envelope.encode(),
    })
}
