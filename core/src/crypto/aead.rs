//! crypto/aead.rs
//! AEAD interface for AES-GCM and ChaCha20-Poly1305.
//!
//! Design notes:
//! - AES accepts 16/24/32-byte keys, ChaCha20-Poly1305 exactly 32.
//! - Both use 12-byte nonces drawn at random per seal.
//! - Output layout is `nonce ‖ ciphertext ‖ tag`; the nonce travels in clear.
//! - Tag verification fails closed (no partial plaintext).
//! - No associated data is bound. The envelope version prefix is therefore
//!   not authenticated; see DESIGN.md.

use std::fmt;

use serde::{Deserialize, Serialize};

// AEAD traits come from aes_gcm's re-export; chacha20poly1305 shares the same `aead` crate.
use aes_gcm::aead::consts::U12;
use aes_gcm::aead::{Aead, KeyInit};

// Concrete AEAD types
use aes_gcm::aes::Aes192;
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm, Nonce as AesNonce};
use chacha20poly1305::{ChaCha20Poly1305, Nonce as ChaNonce};

use crate::crypto::nonce::random_nonce;
use crate::crypto::types::{CryptoError, AES_KEY_LENS, CHACHA_KEY_LEN, CHACHA_KEY_LENS, NONCE_LEN_12};

/// AES-192 in GCM mode with the standard 96-bit nonce.
pub type Aes192Gcm = AesGcm<Aes192, U12>;

/// Cipher suites (construction-time choice).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CipherSuite {
    /// AES in Galois/Counter Mode; key size picks AES-128/192/256.
    AesGcm,
    /// ChaCha20-Poly1305 with a 256-bit key.
    #[default]
    #[serde(rename = "chacha20_poly1305")]
    ChaCha20Poly1305,
}

impl CipherSuite {
    /// Key sizes accepted by this suite.
    pub fn key_lens(self) -> &'static [usize] {
        match self {
            CipherSuite::AesGcm => AES_KEY_LENS,
            CipherSuite::ChaCha20Poly1305 => CHACHA_KEY_LENS,
        }
    }

    /// Nonce size required by this suite.
    pub fn nonce_len(self) -> usize {
        NONCE_LEN_12
    }
}

/// Encrypt/decrypt with a key bound at construction.
pub trait Cipher: Send + Sync {
    /// Seal `plaintext` under a fresh random nonce. Returns `nonce ‖ sealed`.
    fn encode(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError>;

    /// Open a blob produced by [`Cipher::encode`].
    fn decode(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError>;
}

/// Encrypt/decrypt with a key supplied per call.
pub trait CipherWithKey: Send + Sync {
    fn encode_with_key(&self, key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError>;

    fn decode_with_key(&self, key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError>;
}

/// Unified AEAD cipher implementation with its key bound.
#[derive(Clone)]
pub enum AeadImpl {
    Aes128Gcm(Aes128Gcm),
    Aes192Gcm(Aes192Gcm),
    Aes256Gcm(Aes256Gcm),
    ChaCha(ChaCha20Poly1305),
}

impl fmt::Debug for AeadImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key schedules.
        let name = match self {
            AeadImpl::Aes128Gcm(_) => "Aes128Gcm",
            AeadImpl::Aes192Gcm(_) => "Aes192Gcm",
            AeadImpl::Aes256Gcm(_) => "Aes256Gcm",
            AeadImpl::ChaCha(_) => "ChaCha20Poly1305",
        };
        f.debug_tuple("AeadImpl").field(&name).finish()
    }
}

impl AeadImpl {
    /// Construct the AEAD for `suite` from raw key bytes.
    pub fn new(suite: CipherSuite, key: &[u8]) -> Result<Self, CryptoError> {
        let invalid = || CryptoError::InvalidKeyLen {
            suite,
            expected: suite.key_lens(),
            actual: key.len(),
        };

        match (suite, key.len()) {
            (CipherSuite::AesGcm, 16) => {
                Ok(Self::Aes128Gcm(Aes128Gcm::new_from_slice(key).map_err(|_| invalid())?))
            }
            (CipherSuite::AesGcm, 24) => {
                Ok(Self::Aes192Gcm(Aes192Gcm::new_from_slice(key).map_err(|_| invalid())?))
            }
            (CipherSuite::AesGcm, 32) => {
                Ok(Self::Aes256Gcm(Aes256Gcm::new_from_slice(key).map_err(|_| invalid())?))
            }
            (CipherSuite::ChaCha20Poly1305, CHACHA_KEY_LEN) => {
                Ok(Self::ChaCha(ChaCha20Poly1305::new_from_slice(key).map_err(|_| invalid())?))
            }
            _ => Err(invalid()),
        }
    }

    pub fn suite(&self) -> CipherSuite {
        match self {
            AeadImpl::ChaCha(_) => CipherSuite::ChaCha20Poly1305,
            _ => CipherSuite::AesGcm,
        }
    }

    #[inline]
    pub fn nonce_len(&self) -> usize {
        self.suite().nonce_len()
    }

    /// AEAD seal with an explicit nonce. No associated data.
    pub fn seal(&self, nonce_12: &[u8; NONCE_LEN_12], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let sealed = match self {
            AeadImpl::Aes128Gcm(c) => c.encrypt(AesNonce::from_slice(nonce_12), plaintext),
            AeadImpl::Aes192Gcm(c) => c.encrypt(AesNonce::from_slice(nonce_12), plaintext),
            AeadImpl::Aes256Gcm(c) => c.encrypt(AesNonce::from_slice(nonce_12), plaintext),
            AeadImpl::ChaCha(c) => c.encrypt(ChaNonce::from_slice(nonce_12), plaintext),
        };
        sealed.map_err(|_| CryptoError::Failure(format!("{:?} seal failed", self.suite())))
    }

    /// AEAD open with an explicit nonce. Any failure is a tag mismatch.
    pub fn open(&self, nonce_12: &[u8], ciphertext_and_tag: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if nonce_12.len() != NONCE_LEN_12 {
            return Err(CryptoError::CiphertextTooShort { nonce_len: NONCE_LEN_12, actual: nonce_12.len() });
        }

        let opened = match self {
            AeadImpl::Aes128Gcm(c) => c.decrypt(AesNonce::from_slice(nonce_12), ciphertext_and_tag),
            AeadImpl::Aes192Gcm(c) => c.decrypt(AesNonce::from_slice(nonce_12), ciphertext_and_tag),
            AeadImpl::Aes256Gcm(c) => c.decrypt(AesNonce::from_slice(nonce_12), ciphertext_and_tag),
            AeadImpl::ChaCha(c) => c.decrypt(ChaNonce::from_slice(nonce_12), ciphertext_and_tag),
        };
        opened.map_err(|_| CryptoError::TagMismatch)
    }
}

impl Cipher for AeadImpl {
    fn encode(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let nonce = random_nonce(self.nonce_len())?;
        let sealed = self.seal(&nonce, plaintext)?;

        let mut out = Vec::with_capacity(nonce.len() + sealed.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&sealed);
        Ok(out)
    }

    fn decode(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let nonce_len = self.nonce_len();
        if ciphertext.len() < nonce_len {
            return Err(CryptoError::CiphertextTooShort { nonce_len, actual: ciphertext.len() });
        }

        let (nonce, sealed) = ciphertext.split_at(nonce_len);
        self.open(nonce, sealed)
    }
}

/// A bare suite takes its key per call.
impl CipherWithKey for CipherSuite {
    fn encode_with_key(&self, key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        AeadImpl::new(*self, key)?.encode(plaintext)
    }

    fn decode_with_key(&self, key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        AeadImpl::new(*self, key)?.decode(ciphertext)
    }
}
