//! crypto/types.rs
//! Shared sizes and error types for the cipher and MAC layers.

use crate::crypto::aead::CipherSuite;

/// Accepted AES key sizes: AES-128, AES-192, AES-256.
pub const AES_KEY_LENS: &[usize] = &[16, 24, 32];

/// ChaCha20-Poly1305 takes a 256-bit key only.
pub const CHACHA_KEY_LEN: usize = 32;
pub const CHACHA_KEY_LENS: &[usize] = &[CHACHA_KEY_LEN];

/// Standard 12-byte nonce length for AES-GCM and ChaCha20-Poly1305.
pub const NONCE_LEN_12: usize = 12;

/// Fixed AEAD tag length (bytes).
pub const TAG_LEN: usize = 16;

#[derive(Debug, thiserror::Error)]
pub enum NonceError {
    /// The entropy source refused to produce bytes.
    #[error("entropy source failure: {0}")]
    Entropy(String),

    /// Requested nonce length is unsupported.
    #[error("invalid nonce length: requested={requested}, supported={supported}")]
    InvalidNonceLen { requested: usize, supported: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    /// Key length not accepted by the selected cipher.
    #[error("invalid key length for {suite:?}: expected one of {expected:?}, actual={actual}")]
    InvalidKeyLen { suite: CipherSuite, expected: &'static [usize], actual: usize },

    /// Ciphertext cannot even hold the nonce prefix.
    #[error("ciphertext too short: {actual} < nonce length {nonce_len}")]
    CiphertextTooShort { nonce_len: usize, actual: usize },

    /// AEAD tag mismatch. Does not say whether the key or the data was wrong.
    #[error("AEAD tag mismatch")]
    TagMismatch,

    /// Nonce generation failed.
    #[error(transparent)]
    Nonce(#[from] NonceError),

    /// Sealing failed inside the AEAD backend.
    #[error("crypto failure: {0}")]
    Failure(String),
}
