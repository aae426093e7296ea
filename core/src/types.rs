//! types.rs
//! Top-level error for codec, signer and CSRF operations.
//!
//! Layer errors (`CryptoError`, `EnvelopeError`, `KeySourceError`,
//! `NonceError`) funnel in through `From`, so `?` works across layers.

use crate::crypto::{CryptoError, NonceError};
use crate::envelope::EnvelopeError;
use crate::key_source::KeySourceError;

/// How an error should surface to an untrusted caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The token was presented but is not genuine.
    Forbidden,
    /// Anything else: configuration, transport, entropy, framing.
    ServerError,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Bad key length, over-long version label, missing builder field.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Key source failure, passed through untouched.
    #[error(transparent)]
    Transport(#[from] KeySourceError),

    /// TLV framing failure on an untrusted envelope.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(EnvelopeError),

    /// AEAD tag did not verify. Deliberately says nothing more.
    #[error("authentication failed")]
    Authentication,

    /// Ciphertext shorter than the nonce, or the backend failed to seal.
    #[error("cipher error: {0}")]
    Cipher(CryptoError),

    /// CSPRNG failure.
    #[error("entropy error: {0}")]
    Entropy(String),

    /// Token string failed to decode.
    #[error("token encoding error: {0}")]
    Encoding(String),
}

impl TokenError {
    pub fn disposition(&self) -> Disposition {
        match self {
            TokenError::Authentication => Disposition::Forbidden,
            _ => Disposition::ServerError,
        }
    }

    /// HTTP status a web layer would map this error to.
    pub fn status_code(&self) -> u16 {
        match self.disposition() {
            Disposition::Forbidden => 403,
            Disposition::ServerError => 500,
        }
    }
}

impl From<EnvelopeError> for TokenError {
    fn from(e: EnvelopeError) -> Self {
        if e.is_encode_side() {
            TokenError::Configuration(e.to_string())
        } else {
            TokenError::MalformedEnvelope(e)
        }
    }
}

impl From<CryptoError> for TokenError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::InvalidKeyLen { .. } => TokenError::Configuration(e.to_string()),
            CryptoError::TagMismatch => TokenError::Authentication,
            CryptoError::Nonce(n) => n.into(),
            other => TokenError::Cipher(other),
        }
    }
}

impl From<NonceError> for TokenError {
    fn from(e: NonceError) -> Self {
        match e {
            NonceError::Entropy(msg) => TokenError::Entropy(msg),
            other => TokenError::Configuration(other.to_string()),
        }
    }
}
