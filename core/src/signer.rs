//! signer.rs
//! HMAC token signer.
//!
//! Wire: `[0x01 ‖ len ‖ version] [0x02 ‖ len ‖ nonce] 0x00 ‖ HMAC(key, payload ‖ nonce)`
//!
//! The payload itself is not carried; `verify` needs it back from the caller.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::crypto::{compute_mac, draw_nonce, verify_mac, HashAlg, NonceSource, OsNonceSource};
use crate::envelope::{decode_envelope, encode_envelope, ParseOptions};
use crate::key_source::KeySource;
use crate::types::TokenError;

pub struct TokenSigner<K> {
    hash: HashAlg,
    keys: K,
    nonces: Arc<dyn NonceSource>,
}

impl<K: fmt::Debug> fmt::Debug for TokenSigner<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("hash", &self.hash)
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

impl<K: KeySource> TokenSigner<K> {
    pub fn new(hash: HashAlg, keys: K) -> Self {
        Self { hash, keys, nonces: Arc::new(OsNonceSource) }
    }

    pub fn builder() -> SignerBuilder<K> {
        SignerBuilder::default()
    }

    pub fn hash(&self) -> HashAlg {
        self.hash
    }

    pub fn key_source(&self) -> &K {
        &self.keys
    }

    /// Sign `payload` under the current key.
    ///
    /// With `nonce_size == 0` the signature is deterministic: the same payload
    /// under the same key always yields the same bytes. With a non-zero size a
    /// fresh random nonce of that many bytes is mixed into the MAC and carried
    /// in the envelope, so repeated signatures are unlinkable.
    ///
    /// For CSRF tokens the caller must fold a session-bound value (the
    /// session id) into `payload` and pass a non-zero `nonce_size`. Nothing
    /// here can check either.
    pub async fn sign(&self, payload: &[u8], nonce_size: u8) -> Result<Vec<u8>, TokenError> {
        let nonce = draw_nonce(self.nonces.as_ref(), nonce_size)?;
        let resolved = self.keys.resolve(None).await?;

        let mac = compute_mac(self.hash, resolved.key(), payload, &nonce)?;
        let signature = encode_envelope(resolved.version(), Some(&nonce), &mac)?;

        debug!(
            op = "sign",
            hash = ?self.hash,
            versioned = resolved.version().is_some(),
            nonce_len = nonce.len(),
            "payload signed"
        );
        Ok(signature)
    }

    /// Check `signature` against `payload`.
    ///
    /// `Ok(false)` means well-formed but not genuine. Framing problems and key
    /// source failures are errors.
    pub async fn verify(&self, signature: &[u8], payload: &[u8]) -> Result<bool, TokenError> {
        let view = decode_envelope(signature, ParseOptions::signer(self.keys.version_kind()))?;
        let resolved = self.keys.resolve(view.version.as_ref()).await?;

        let nonce = view.nonce.unwrap_or_default();
        let ok = verify_mac(self.hash, resolved.key(), payload, nonce, view.payload)?;

        debug!(
            op = "verify",
            hash = ?self.hash,
            versioned = view.version.is_some(),
            salted = !nonce.is_empty(),
            ok,
            "signature checked"
        );
        Ok(ok)
    }
}

/// Builder for [`TokenSigner`]. Only the key source is required.
pub struct SignerBuilder<K> {
    hash: HashAlg,
    keys: Option<K>,
    nonces: Option<Arc<dyn NonceSource>>,
}

impl<K> Default for SignerBuilder<K> {
    fn default() -> Self {
        Self { hash: HashAlg::default(), keys: None, nonces: None }
    }
}

impl<K: KeySource> SignerBuilder<K> {
    pub fn hash(mut self, hash: HashAlg) -> Self {
        self.hash = hash;
        self
    }

    pub fn key_source(mut self, keys: K) -> Self {
        self.keys = Some(keys);
        self
    }

    /// Replace the OS CSPRNG. Meant for reproducing fixed signatures in tests.
    pub fn nonce_source(mut self, nonces: Arc<dyn NonceSource>) -> Self {
        self.nonces = Some(nonces);
        self
    }

    pub fn build(self) -> Result<TokenSigner<K>, TokenError> {
        let keys = self
            .keys
            .ok_or_else(|| TokenError::Configuration("signer requires a key source".into()))?;
        Ok(TokenSigner {
            hash: self.hash,
            keys,
            nonces: self.nonces.unwrap_or_else(|| Arc::new(OsNonceSource)),
        })
    }
}
