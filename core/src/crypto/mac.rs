//! crypto/mac.rs
//! Keyed HMAC over `payload ‖ nonce` with a pluggable hash.
//!
//! The MAC input is exactly the payload bytes followed by the nonce bytes,
//! with no separators or length prefixes, so signatures stay byte-compatible
//! with every deployment that already issued tokens.

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512, Sha512_224, Sha512_256};

use crate::crypto::types::CryptoError;

/// Supported HMAC hash functions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlg {
    Sha1,
    Sha224,
    #[default]
    Sha256,
    Sha384,
    Sha512,
    Sha512_224,
    Sha512_256,
}

impl HashAlg {
    /// MAC length in bytes.
    pub fn output_len(self) -> usize {
        match self {
            HashAlg::Sha1 => 20,
            HashAlg::Sha224 | HashAlg::Sha512_224 => 28,
            HashAlg::Sha256 | HashAlg::Sha512_256 => 32,
            HashAlg::Sha384 => 48,
            HashAlg::Sha512 => 64,
        }
    }
}

/// Internal keyed hashing state.
enum MacState {
    Sha1(Hmac<Sha1>),
    Sha224(Hmac<Sha224>),
    Sha256(Hmac<Sha256>),
    Sha384(Hmac<Sha384>),
    Sha512(Hmac<Sha512>),
    Sha512_224(Hmac<Sha512_224>),
    Sha512_256(Hmac<Sha512_256>),
}

macro_rules! keyed {
    ($variant:ident, $key:expr) => {
        <Hmac<$variant> as Mac>::new_from_slice($key)
            .map(MacState::$variant)
            .map_err(|_| CryptoError::Failure("HMAC rejected key".into()))
    };
}

impl MacState {
    fn new(alg: HashAlg, key: &[u8]) -> Result<Self, CryptoError> {
        match alg {
            HashAlg::Sha1 => keyed!(Sha1, key),
            HashAlg::Sha224 => keyed!(Sha224, key),
            HashAlg::Sha256 => keyed!(Sha256, key),
            HashAlg::Sha384 => keyed!(Sha384, key),
            HashAlg::Sha512 => keyed!(Sha512, key),
            HashAlg::Sha512_224 => keyed!(Sha512_224, key),
            HashAlg::Sha512_256 => keyed!(Sha512_256, key),
        }
    }

    #[inline]
    fn update(&mut self, data: &[u8]) {
        match self {
            MacState::Sha1(m) => m.update(data),
            MacState::Sha224(m) => m.update(data),
            MacState::Sha256(m) => m.update(data),
            MacState::Sha384(m) => m.update(data),
            MacState::Sha512(m) => m.update(data),
            MacState::Sha512_224(m) => m.update(data),
            MacState::Sha512_256(m) => m.update(data),
        }
    }

    #[inline]
    fn finalize(self) -> Vec<u8> {
        match self {
            MacState::Sha1(m) => m.finalize().into_bytes().to_vec(),
            MacState::Sha224(m) => m.finalize().into_bytes().to_vec(),
            MacState::Sha256(m) => m.finalize().into_bytes().to_vec(),
            MacState::Sha384(m) => m.finalize().into_bytes().to_vec(),
            MacState::Sha512(m) => m.finalize().into_bytes().to_vec(),
            MacState::Sha512_224(m) => m.finalize().into_bytes().to_vec(),
            MacState::Sha512_256(m) => m.finalize().into_bytes().to_vec(),
        }
    }

    /// Constant-time comparison against `expected`. Length mismatch is `false`.
    #[inline]
    fn verify(self, expected: &[u8]) -> bool {
        match self {
            MacState::Sha1(m) => m.verify_slice(expected).is_ok(),
            MacState::Sha224(m) => m.verify_slice(expected).is_ok(),
            MacState::Sha256(m) => m.verify_slice(expected).is_ok(),
            MacState::Sha384(m) => m.verify_slice(expected).is_ok(),
            MacState::Sha512(m) => m.verify_slice(expected).is_ok(),
            MacState::Sha512_224(m) => m.verify_slice(expected).is_ok(),
            MacState::Sha512_256(m) => m.verify_slice(expected).is_ok(),
        }
    }
}

/// `HMAC(alg, key, payload ‖ nonce)`.
pub fn compute_mac(alg: HashAlg, key: &[u8], payload: &[u8], nonce: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let mut state = MacState::new(alg, key)?;
    state.update(payload);
    state.update(nonce);
    Ok(state.finalize())
}

/// Recompute the MAC and compare it to `expected` in constant time.
pub fn verify_mac(
    alg: HashAlg,
    key: &[u8],
    payload: &[u8],
    nonce: &[u8],
    expected: &[u8],
) -> Result<bool, CryptoError> {
    let mut state = MacState::new(alg, key)?;
    state.update(payload);
    state.update(nonce);
    Ok(state.verify(expected))
}
