//! config.rs
//! Serializable settings, applied once when building codecs and signers.

use serde::{Deserialize, Serialize};

use crate::codec::EnvelopeCodec;
use crate::constants::csrf::DEFAULT_NONCE_SIZE;
use crate::crypto::{CipherSuite, HashAlg};
use crate::csrf::CsrfTokens;
use crate::encoding::TokenEncoding;
use crate::key_source::KeySource;
use crate::signer::TokenSigner;
use crate::types::TokenError;

/// Token settings.
///
/// ```json
/// { "cipher": "aes_gcm", "hash": "sha512", "encoding": "hex", "csrf_nonce_size": 32 }
/// ```
///
/// Every field is optional; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TokenConfig {
    pub cipher: CipherSuite,
    pub hash: HashAlg,
    pub encoding: TokenEncoding,
    pub csrf_nonce_size: u8,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            cipher: CipherSuite::default(),
            hash: HashAlg::default(),
            encoding: TokenEncoding::default(),
            csrf_nonce_size: DEFAULT_NONCE_SIZE,
        }
    }
}

impl TokenConfig {
    pub fn validate(&self) -> Result<(), TokenError> {
        if self.csrf_nonce_size == 0 {
            return Err(TokenError::Configuration("csrf_nonce_size must be non-zero".into()));
        }
        Ok(())
    }

    pub fn codec<K: KeySource>(&self, keys: K) -> Result<EnvelopeCodec<K>, TokenError> {
        EnvelopeCodec::builder()
            .cipher(self.cipher)
            .encoding(self.encoding)
            .key_source(keys)
            .build()
    }

    pub fn signer<K: KeySource>(&self, keys: K) -> Result<TokenSigner<K>, TokenError> {
        TokenSigner::builder().hash(self.hash).key_source(keys).build()
    }

    pub fn csrf<K: KeySource>(&self, keys: K) -> Result<CsrfTokens<K>, TokenError> {
        self.validate()?;
        CsrfTokens::new(self.signer(keys)?)
            .with_encoding(self.encoding)
            .with_nonce_size(self.csrf_nonce_size)
    }
}
