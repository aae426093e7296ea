//! csrf.rs
//! Session-bound CSRF tokens on top of [`TokenSigner`].
//!
//! A token is `sign(session_id, nonce)` rendered as text. It is only valid for
//! the session it was issued to, and two tokens for the same session never
//! look alike.

use subtle::ConstantTimeEq;

use crate::constants::csrf::{DEFAULT_NONCE_SIZE, GUARDED_METHODS};
use crate::encoding::TokenEncoding;
use crate::key_source::KeySource;
use crate::signer::TokenSigner;
use crate::types::TokenError;

pub use crate::constants::csrf::{DEFAULT_COOKIE_NAME, DEFAULT_FORM_NAME, DEFAULT_HEADER_NAME};

#[derive(Debug)]
pub struct CsrfTokens<K> {
    signer: TokenSigner<K>,
    encoding: TokenEncoding,
    nonce_size: u8,
}

impl<K: KeySource> CsrfTokens<K> {
    pub fn new(signer: TokenSigner<K>) -> Self {
        Self { signer, encoding: TokenEncoding::default(), nonce_size: DEFAULT_NONCE_SIZE }
    }

    pub fn with_encoding(mut self, encoding: TokenEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Zero is rejected: an unsalted CSRF token is replayable.
    pub fn with_nonce_size(mut self, nonce_size: u8) -> Result<Self, TokenError> {
        if nonce_size == 0 {
            return Err(TokenError::Configuration("CSRF nonce size must be non-zero".into()));
        }
        self.nonce_size = nonce_size;
        Ok(self)
    }

    pub fn nonce_size(&self) -> u8 {
        self.nonce_size
    }

    pub fn encoding(&self) -> TokenEncoding {
        self.encoding
    }

    pub fn signer(&self) -> &TokenSigner<K> {
        &self.signer
    }

    /// Issue a fresh token bound to `session_id`.
    pub async fn issue(&self, session_id: &str) -> Result<String, TokenError> {
        let signature = self.signer.sign(session_id.as_bytes(), self.nonce_size).await?;
        Ok(self.encoding.encode_to_string(&signature))
    }

    /// `Ok(false)` when the token is well-formed but was not issued for
    /// `session_id` (or not by us).
    pub async fn validate(&self, token: &str, session_id: &str) -> Result<bool, TokenError> {
        let signature = self.encoding.decode_string(token)?;
        self.signer.verify(&signature, session_id.as_bytes()).await
    }
}

/// Double-submit check: every submitted copy equals the first one.
///
/// Comparison is constant-time per copy. An empty `first` never matches.
pub fn double_submit_matches(first: &str, rest: &[&str]) -> bool {
    if first.is_empty() {
        return false;
    }
    rest.iter()
        .fold(true, |all, other| all & bool::from(first.as_bytes().ct_eq(other.as_bytes())))
}

/// Whether requests with this HTTP method must carry a CSRF token.
///
/// Methods are case-sensitive: `"post"` is not `POST`.
pub fn requires_csrf(method: &str) -> bool {
    GUARDED_METHODS.iter().any(|m| *m == method)
}
