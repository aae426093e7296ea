//! opaque-token
//!
//! Opaque, tamper-evident tokens for untrusted callers.
//! Versioned envelope encryption plus HMAC signing, with key rotation.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

// Primitives and wire format
pub mod crypto;
pub mod envelope;
pub mod key_source;
pub mod encoding;

// Services
pub mod codec;
pub mod signer;
pub mod csrf;
pub mod config;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::codec::{CodecBuilder, EnvelopeCodec};
    pub use crate::config::TokenConfig;
    pub use crate::crypto::{Cipher, CipherSuite, CipherWithKey, HashAlg, NonceSource};
    pub use crate::csrf::{double_submit_matches, requires_csrf, CsrfTokens};
    pub use crate::encoding::TokenEncoding;
    pub use crate::envelope::{KeyVersion, VersionKind};
    pub use crate::key_source::{
        KeySource, KeySourceError, ParameterStoreKeySource, ResolvedKey, SecretDecoder,
        SecretStoreKeySource, StaticKey,
    };
    pub use crate::signer::{SignerBuilder, TokenSigner};
    pub use crate::types::{Disposition, TokenError};
}
