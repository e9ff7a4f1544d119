//! Request and response types exchanged with API clients.
//!
//! These types are serialised as JSON. Anything sensitive travels inside a
//! [`SealedBody`]; plaintext JSON only ever appears in the bodies of the
//! seal/open service operations themselves.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Sealed payload body
// ---------------------------------------------------------------------------

/// Body of any request or response whose content is encrypted.
///
/// The `payload` field holds `base64(IV || ciphertext)` in the standard
/// alphabet with padding. This string is the only wire representation of an
/// encrypted body; there is no alternate encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SealedBody {
    /// Base64 of the 16-byte IV followed by the AES-CBC ciphertext.
    pub payload: String,
}

// ---------------------------------------------------------------------------
// Seal / open endpoints
// ---------------------------------------------------------------------------

/// Request body for `POST /seal`.
///
/// The `payload` field contains the plaintext JSON value to protect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SealRequest {
    /// Arbitrary JSON value to encrypt.
    pub payload: serde_json::Value,
}

/// Successful response body for `POST /open`.
///
/// The `payload` field mirrors the JSON value recovered from the envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenResponse {
    /// Decrypted JSON value.
    pub payload: serde_json::Value,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable description of the failure, safe to expose to callers.
    pub error: String,
}

impl ErrorBody {
    /// Construct an [`ErrorBody`] from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status, `"ok"` whenever the process is serving.
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sealed_body_round_trip() {
        let body = SealedBody {
            payload: "AAAAAAAAAAAAAAAAAAAAAA==".into(),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(
            json,
            r#"{"payload":"AAAAAAAAAAAAAAAAAAAAAA=="}"#,
            "field must serialise as `payload`",
        );
        let decoded: SealedBody = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.payload, body.payload);
    }

    #[test]
    fn seal_request_round_trip() {
        let req = SealRequest {
            payload: json!({"descricao": "mercado", "valor": 231.90}),
        };
        let json = serde_json::to_string(&req).unwrap();
        let decoded: SealRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.payload["descricao"], "mercado");
    }

    #[test]
    fn error_body_uses_the_error_field() {
        let e = ErrorBody::new("cannot decode payload");
        let json = serde_json::to_string(&e).unwrap();
        assert_eq!(json, r#"{"error":"cannot decode payload"}"#);
    }

    #[test]
    fn health_response_serde() {
        let h = HealthResponse { status: "ok".into() };
        let json = serde_json::to_string(&h).unwrap();
        let decoded: HealthResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.status, "ok");
    }
}
