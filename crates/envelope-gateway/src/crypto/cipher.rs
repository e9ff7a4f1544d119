//! AES-CBC encryption and decryption of payload bytes.
//!
//! Plaintext is padded with PKCS7 and encrypted under a fresh random 16-byte
//! IV generated per call via the OS CSPRNG. Key length selects the variant:
//! 16, 24, or 32 bytes for AES-128, AES-192, or AES-256.
//!
//! **CBC carries no authentication tag.** A wrong key or tampered ciphertext
//! surfaces only as a padding failure, so `decrypt` treats any padding
//! violation as terminal and never returns best-effort plaintext.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

use super::envelope::{Envelope, IV_LEN};

/// AES block size in bytes; every valid ciphertext is a positive multiple.
pub const BLOCK_LEN: usize = 16;

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes192CbcEnc = cbc::Encryptor<aes::Aes192>;
type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;
type Aes192CbcDec = cbc::Decryptor<aes::Aes192>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The key is not 16, 24, or 32 bytes.
    #[error("invalid key size: {0} bytes (expected 16, 24, or 32)")]
    InvalidKeySize(usize),

    /// The ciphertext is empty or not a multiple of the block size.
    #[error("invalid ciphertext length: {0} bytes (expected a positive multiple of {BLOCK_LEN})")]
    InvalidCiphertextLength(usize),

    /// PKCS7 unpadding failed: wrong key or corrupted ciphertext.
    #[error("invalid padding: wrong key or corrupted ciphertext")]
    InvalidPadding,
}

/// Whether `len` is a valid AES key length.
pub fn is_valid_key_len(len: usize) -> bool {
    matches!(len, 16 | 24 | 32)
}

/// Encrypt `plaintext` into an [`Envelope`] under a fresh random IV.
///
/// The plaintext is PKCS7-padded, so the ciphertext is always a positive
/// multiple of [`BLOCK_LEN`]: block-aligned input (the empty payload
/// included) gains one full padding block.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeySize`] if `key` is not 16, 24, or 32
/// bytes. Key material is never touched before that check passes.
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<Envelope, CipherError> {
    if !is_valid_key_len(key.len()) {
        return Err(CipherError::InvalidKeySize(key.len()));
    }

    let iv = random_iv();
    let ciphertext = match key.len() {
        16 => encrypt_with::<Aes128CbcEnc>(key, &iv, plaintext)?,
        24 => encrypt_with::<Aes192CbcEnc>(key, &iv, plaintext)?,
        _ => encrypt_with::<Aes256CbcEnc>(key, &iv, plaintext)?,
    };

    Ok(Envelope { iv, ciphertext })
}

/// Decrypt an [`Envelope`] back to plaintext bytes.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeySize`] if `key` is not 16, 24, or 32
/// bytes; this is checked before anything else, so a bad key never reaches
/// the cipher. Returns [`CipherError::InvalidCiphertextLength`] if the
/// ciphertext is empty or unaligned, and [`CipherError::InvalidPadding`] if
/// PKCS7 unpadding fails after decryption (wrong key or corrupted data).
pub fn decrypt(key: &[u8], envelope: &Envelope) -> Result<Vec<u8>, CipherError> {
    if !is_valid_key_len(key.len()) {
        return Err(CipherError::InvalidKeySize(key.len()));
    }

    let ciphertext = &envelope.ciphertext;
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        return Err(CipherError::InvalidCiphertextLength(ciphertext.len()));
    }

    match key.len() {
        16 => decrypt_with::<Aes128CbcDec>(key, &envelope.iv, ciphertext),
        24 => decrypt_with::<Aes192CbcDec>(key, &envelope.iv, ciphertext),
        _ => decrypt_with::<Aes256CbcDec>(key, &envelope.iv, ciphertext),
    }
}

fn encrypt_with<E>(key: &[u8], iv: &[u8; IV_LEN], plaintext: &[u8]) -> Result<Vec<u8>, CipherError>
where
    E: KeyIvInit + BlockEncryptMut,
{
    let enc = E::new_from_slices(key, iv).map_err(|_| CipherError::InvalidKeySize(key.len()))?;
    Ok(enc.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

fn decrypt_with<D>(key: &[u8], iv: &[u8; IV_LEN], ciphertext: &[u8]) -> Result<Vec<u8>, CipherError>
where
    D: KeyIvInit + BlockDecryptMut,
{
    let dec = D::new_from_slices(key, iv).map_err(|_| CipherError::InvalidKeySize(key.len()))?;
    dec.decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CipherError::InvalidPadding)
}

// OsRng for a cryptographically secure per-message IV.
fn random_iv() -> [u8; IV_LEN] {
    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut iv);
    iv
}
