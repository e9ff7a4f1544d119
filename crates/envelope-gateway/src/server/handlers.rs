//! Axum request handlers for all service endpoints.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::Value;

use common::protocol::{ErrorBody, HealthResponse, OpenResponse, SealRequest, SealedBody};

use super::binding::{seal, ApiError, Sealed};
use super::state::AppState;

/// `POST /seal` — wrap a plaintext JSON value in an encrypted envelope.
///
/// The response `payload` is `base64(IV || ciphertext)` under an IV generated
/// for this call; sealing the same value twice yields different envelopes.
pub async fn seal_payload(
    State(state): State<AppState>,
    Json(req): Json<SealRequest>,
) -> Result<Json<SealedBody>, ApiError> {
    Ok(Json(seal(&state.key, &req.payload)?))
}

/// `POST /open` — decrypt an envelope back to its plaintext JSON value.
///
/// The whole inbound chain (body binding, envelope decoding, decryption,
/// deserialisation) runs inside the [`Sealed`] extractor; any failure is
/// rejected as `400 {"error": ...}` before this handler executes.
pub async fn open_payload(Sealed(value): Sealed<Value>) -> Json<OpenResponse> {
    Json(OpenResponse { payload: value })
}

/// `POST /echo` — open an envelope and re-seal its content under a fresh IV.
///
/// Exercises both binding directions in one call. Client integrations use it
/// to verify their side of the wire contract end to end.
pub async fn echo_payload(
    State(state): State<AppState>,
    Sealed(value): Sealed<Value>,
) -> Result<Json<SealedBody>, ApiError> {
    Ok(Json(seal(&state.key, &value)?))
}

/// `GET /health` — liveness check.
///
/// The key is validated before the router is built, so a serving process is
/// a ready process and the answer is always `200 OK`.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
    })
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorBody::new("the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}
