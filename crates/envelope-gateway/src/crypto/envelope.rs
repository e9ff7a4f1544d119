//! The transport envelope: `base64(IV || ciphertext)`.
//!
//! An [`Envelope`] is the parsed form of the `payload` string that clients
//! send and receive. Encoding concatenates the 16-byte IV with the ciphertext
//! and base64-encodes the result (standard alphabet, with padding). Decoding
//! reverses that single step; the decoded bytes are the final
//! `IV || ciphertext` sequence and no further decoding pass applies.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

/// Byte length of an AES-CBC initialisation vector (one cipher block).
pub const IV_LEN: usize = 16;

/// Errors produced when decoding an envelope string.
///
/// Both variants render with a `malformed envelope` prefix so callers can
/// surface a single failure mode for any undecodable payload.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The payload is not valid standard-alphabet base64.
    #[error("malformed envelope: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// The decoded bytes are too short to contain an IV.
    #[error("malformed envelope: decoded to {0} bytes, shorter than one IV")]
    TooShort(usize),
}

/// A parsed `(IV, ciphertext)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Per-message initialisation vector.
    pub iv: [u8; IV_LEN],
    /// AES-CBC ciphertext; a positive multiple of 16 bytes once sealed.
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Encode this envelope to its canonical wire string.
    pub fn encode(&self) -> String {
        let mut bytes = Vec::with_capacity(IV_LEN + self.ciphertext.len());
        bytes.extend_from_slice(&self.iv);
        bytes.extend_from_slice(&self.ciphertext);
        STANDARD.encode(bytes)
    }

    /// Parse a wire string back into an [`Envelope`].
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::InvalidBase64`] if the string is not valid
    /// base64, and [`EnvelopeError::TooShort`] if the decoded bytes cannot
    /// contain a full 16-byte IV. A payload that decodes to exactly 16 bytes
    /// parses into an envelope with an empty ciphertext, which the cipher
    /// layer then rejects.
    pub fn decode(payload: &str) -> Result<Self, EnvelopeError> {
        let bytes = STANDARD.decode(payload)?;
        if bytes.len() < IV_LEN {
            return Err(EnvelopeError::TooShort(bytes.len()));
        }

        let mut iv = [0u8; IV_LEN];
        iv.copy_from_slice(&bytes[..IV_LEN]);

        Ok(Self {
            iv,
            ciphertext: bytes[IV_LEN..].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_round_trip() {
        let envelope = Envelope {
            iv: [7u8; IV_LEN],
            ciphertext: vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16],
        };
        let wire = envelope.encode();
        let parsed = Envelope::decode(&wire).unwrap();
        assert_eq!(parsed, envelope);
    }

    #[test]
    fn encode_uses_standard_alphabet_with_padding() {
        let envelope = Envelope {
            iv: [0xFB; IV_LEN],
            ciphertext: vec![0xFF; 16],
        };
        let wire = envelope.encode();
        // 32 bytes encode to 44 characters, the last one a pad.
        assert_eq!(wire.len(), 44);
        assert!(wire.ends_with('='));
        assert!(wire.contains('+') || wire.contains('/'));
        assert!(!wire.contains('-') && !wire.contains('_'));
    }

    #[test]
    fn decode_splits_iv_and_ciphertext() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&[9u8; IV_LEN]);
        bytes.extend_from_slice(&[3u8; 32]);
        let wire = STANDARD.encode(&bytes);

        let parsed = Envelope::decode(&wire).unwrap();
        assert_eq!(parsed.iv, [9u8; IV_LEN]);
        assert_eq!(parsed.ciphertext, vec![3u8; 32]);
    }

    #[test]
    fn decode_rejects_invalid_base64() {
        let err = Envelope::decode("not base64!!").unwrap_err();
        assert!(matches!(err, EnvelopeError::InvalidBase64(_)));
        assert!(err.to_string().starts_with("malformed envelope"));
    }

    #[test]
    fn decode_rejects_url_safe_alphabet() {
        // 18 bytes of 0xFB..0xFF territory encoded url-safe uses `-` and `_`,
        // which the standard alphabet must refuse.
        use base64::engine::general_purpose::URL_SAFE;
        let wire = URL_SAFE.encode([0xFBu8; 18]);
        assert!(wire.contains('-'));
        assert!(Envelope::decode(&wire).is_err());
    }

    #[test]
    fn decode_rejects_short_payload() {
        let wire = STANDARD.encode([1u8; 10]);
        let err = Envelope::decode(&wire).unwrap_err();
        assert!(matches!(err, EnvelopeError::TooShort(10)));
        assert!(err.to_string().starts_with("malformed envelope"));
    }

    #[test]
    fn decode_accepts_exactly_one_iv() {
        // An IV with nothing after it parses; rejecting the empty ciphertext
        // is the cipher layer's job.
        let wire = STANDARD.encode([5u8; IV_LEN]);
        let parsed = Envelope::decode(&wire).unwrap();
        assert_eq!(parsed.iv, [5u8; IV_LEN]);
        assert!(parsed.ciphertext.is_empty());
    }
}
