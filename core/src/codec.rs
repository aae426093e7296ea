//! codec.rs
//! Versioned envelope codec: AEAD ciphertext behind a TLV key-version entry.
//!
//! Wire: `[0x01 ‖ len ‖ version] 0x00 ‖ nonce ‖ ciphertext ‖ tag`

use tracing::debug;

use crate::crypto::{CipherSuite, CipherWithKey, CryptoError};
use crate::encoding::TokenEncoding;
use crate::envelope::{decode_envelope, encode_envelope, ParseOptions};
use crate::key_source::KeySource;
use crate::types::TokenError;

/// Encrypts opaque tokens under the key source's current key and decrypts
/// them under whichever key version they were issued with.
///
/// Immutable after construction; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct EnvelopeCodec<K> {
    cipher: CipherSuite,
    encoding: TokenEncoding,
    keys: K,
}

impl<K: KeySource> EnvelopeCodec<K> {
    pub fn new(cipher: CipherSuite, keys: K) -> Self {
        Self { cipher, encoding: TokenEncoding::default(), keys }
    }

    pub fn builder() -> CodecBuilder<K> {
        CodecBuilder::default()
    }

    pub fn cipher(&self) -> CipherSuite {
        self.cipher
    }

    pub fn encoding(&self) -> TokenEncoding {
        self.encoding
    }

    pub fn key_source(&self) -> &K {
        &self.keys
    }

    /// 🔐 Encrypt `plaintext` under the current key.
    pub async fn encode(&self, plaintext: &[u8]) -> Result<Vec<u8>, TokenError> {
        let resolved = self.keys.resolve(None).await?;
        if let Some(v) = resolved.version() {
            if v.kind() != self.keys.version_kind() {
                return Err(TokenError::Configuration(format!(
                    "key source returned a {:?} version but declares {:?}",
                    v.kind(),
                    self.keys.version_kind()
                )));
            }
        }

        let ciphertext = self.cipher.encode_with_key(resolved.key(), plaintext)?;
        let envelope = encode_envelope(resolved.version(), None, &ciphertext)?;

        debug!(
            op = "encode",
            cipher = ?self.cipher,
            versioned = resolved.version().is_some(),
            envelope_len = envelope.len(),
            "envelope sealed"
        );
        Ok(envelope)
    }

    /// 🔓 Decrypt an envelope under the key version it records.
    ///
    /// Returns the whole plaintext or an error, never a partial result.
    pub async fn decode(&self, envelope: &[u8]) -> Result<Vec<u8>, TokenError> {
        let view = decode_envelope(envelope, ParseOptions::codec(self.keys.version_kind()))?;
        let resolved = self.keys.resolve(view.version.as_ref()).await?;

        match self.cipher.decode_with_key(resolved.key(), view.payload) {
            Ok(plaintext) => {
                debug!(
                    op = "decode",
                    cipher = ?self.cipher,
                    versioned = view.version.is_some(),
                    envelope_len = envelope.len(),
                    "envelope opened"
                );
                Ok(plaintext)
            }
            Err(CryptoError::TagMismatch) => {
                debug!(op = "decode", versioned = view.version.is_some(), "authentication failed");
                Err(TokenError::Authentication)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn encode_to_string(&self, plaintext: &[u8]) -> Result<String, TokenError> {
        let envelope = self.encode(plaintext).await?;
        Ok(self.encoding.encode_to_string(&envelope))
    }

    pub async fn decode_string(&self, token: &str) -> Result<Vec<u8>, TokenError> {
        let envelope = self.encoding.decode_string(token)?;
        self.decode(&envelope).await
    }
}

/// Builder for [`EnvelopeCodec`]. Only the key source is required.
#[derive(Debug, Clone)]
pub struct CodecBuilder<K> {
    cipher: CipherSuite,
    encoding: TokenEncoding,
    keys: Option<K>,
}

impl<K> Default for CodecBuilder<K> {
    fn default() -> Self {
        Self { cipher: CipherSuite::default(), encoding: TokenEncoding::default(), keys: None }
    }
}

impl<K: KeySource> CodecBuilder<K> {
    pub fn cipher(mut self, cipher: CipherSuite) -> Self {
        self.cipher = cipher;
        self
    }

    pub fn encoding(mut self, encoding: TokenEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn key_source(mut self, keys: K) -> Self {
        self.keys = Some(keys);
        self
    }

    pub fn build(self) -> Result<EnvelopeCodec<K>, TokenError> {
        let keys = self
            .keys
            .ok_or_else(|| TokenError::Configuration("codec requires a key source".into()))?;
        Ok(EnvelopeCodec { cipher: self.cipher, encoding: self.encoding, keys })
    }
}
