//! AES-CBC payload encryption primitives and the transport envelope.
//!
//! This module is intentionally free of HTTP dependencies. It provides the
//! low-level encrypt/decrypt operations and the wire format used by the
//! server's payload binding.
//!
//! # Wire format
//!
//! ```text
//! payload = base64(IV[16] || ciphertext)
//! ```
//!
//! One canonical format, everywhere: the IV is generated fresh per
//! encryption, the ciphertext is PKCS7-padded AES-CBC, and the base64 uses
//! the standard alphabet with padding. Decoding performs exactly one base64
//! pass over the payload string.

pub mod cipher;
pub mod envelope;

pub use envelope::Envelope;
