//! crypto/nonce.rs
//! Random nonce generation.
//!
//! Design:
//! - Every seal and every salted signature draws a fresh nonce from a CSPRNG.
//! - Nothing is derived or counted, so no state is shared between calls and
//!   encoders/signers stay safe for concurrent use.
//!
//! Security notes:
//! - Reusing a nonce under the same AEAD key breaks confidentiality and
//!   integrity. Never cache or replay the output of these helpers.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::crypto::types::{NonceError, NONCE_LEN_12};

/// Source of nonce bytes.
///
/// The default is [`OsNonceSource`]. Other sources exist so tests can pin a
/// nonce and reproduce a fixed signature; production code should not swap it.
pub trait NonceSource: Send + Sync {
    /// Fill `dst` entirely with fresh bytes.
    fn fill(&self, dst: &mut [u8]) -> Result<(), NonceError>;
}

/// Operating-system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsNonceSource;

impl NonceSource for OsNonceSource {
    #[inline]
    fn fill(&self, dst: &mut [u8]) -> Result<(), NonceError> {
        OsRng
            .try_fill_bytes(dst)
            .map_err(|e| NonceError::Entropy(e.to_string()))
    }
}

/// Draw a fresh AEAD nonce of the requested length.
///
/// Only 12-byte nonces are supported (AES-GCM, ChaCha20-Poly1305).
#[inline]
pub fn random_nonce(nonce_len: usize) -> Result<[u8; NONCE_LEN_12], NonceError> {
    validate_nonce_len(nonce_len)?;
    let mut nonce = [0u8; NONCE_LEN_12];
    OsNonceSource.fill(&mut nonce)?;
    Ok(nonce)
}

/// Draw `size` bytes from `source`. A size of zero yields an empty nonce.
#[inline]
pub fn draw_nonce(source: &dyn NonceSource, size: u8) -> Result<Vec<u8>, NonceError> {
    let mut nonce = vec![0u8; size as usize];
    if size > 0 {
        source.fill(&mut nonce)?;
    }
    Ok(nonce)
}

/// Validate requested AEAD nonce length.
#[inline]
pub fn validate_nonce_len(nonce_len: usize) -> Result<(), NonceError> {
    if nonce_len != NONCE_LEN_12 {
        return Err(NonceError::InvalidNonceLen { requested: nonce_len, supported: NONCE_LEN_12 });
    }
    Ok(())
}
