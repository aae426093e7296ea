//! key_source/types.rs
//! The key-source contract.
//!
//! Contract:
//! - `resolve(None)` returns the current key and its version.
//! - `resolve(Some(v))` returns the exact key that was current under `v`,
//!   even after rotation. Decoders always take this path when the envelope
//!   carries a version.
//! - Errors are opaque to the core and bubble up unchanged. Retries and
//!   caching belong to the implementation, never to the caller.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::envelope::{KeyVersion, VersionKind};

/// Opaque failure from a key source (network, permissions, decoding).
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct KeySourceError(Box<dyn StdError + Send + Sync + 'static>);

impl KeySourceError {
    pub fn new<E>(err: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        Self(err.into())
    }

    /// Error from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self(message.into().into())
    }

    /// Borrow the wrapped error, e.g. to downcast to a transport type.
    pub fn inner(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.0.as_ref()
    }
}

/// Key bytes plus the version they were resolved under.
///
/// Key bytes are wiped on drop and never printed.
#[derive(Clone)]
pub struct ResolvedKey {
    key: Zeroizing<Vec<u8>>,
    version: Option<KeyVersion>,
}

impl ResolvedKey {
    pub fn new(key: impl Into<Vec<u8>>, version: Option<KeyVersion>) -> Self {
        Self { key: Zeroizing::new(key.into()), version }
    }

    #[inline]
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    #[inline]
    pub fn version(&self) -> Option<&KeyVersion> {
        self.version.as_ref()
    }
}

impl fmt::Debug for ResolvedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedKey")
            .field("key", &format_args!("<{} bytes redacted>", self.key.len()))
            .field("version", &self.version)
            .finish()
    }
}

/// Where keys come from.
///
/// Implementations may perform network I/O. Cancellation is dropping the
/// returned future; deadlines are the caller wrapping it in a timeout.
#[async_trait]
pub trait KeySource: Send + Sync {
    /// Resolve the current key (`None`) or the key active under `version`.
    async fn resolve(&self, version: Option<&KeyVersion>) -> Result<ResolvedKey, KeySourceError>;

    /// How this source's versions are written to the envelope.
    fn version_kind(&self) -> VersionKind {
        VersionKind::Label
    }
}

#[async_trait]
impl<K: KeySource + ?Sized> KeySource for Arc<K> {
    async fn resolve(&self, version: Option<&KeyVersion>) -> Result<ResolvedKey, KeySourceError> {
        (**self).resolve(version).await
    }

    fn version_kind(&self) -> VersionKind {
        (**self).version_kind()
    }
}

#[async_trait]
impl<K: KeySource + ?Sized> KeySource for Box<K> {
    async fn resolve(&self, version: Option<&KeyVersion>) -> Result<ResolvedKey, KeySourceError> {
        (**self).resolve(version).await
    }

    fn version_kind(&self) -> VersionKind {
        (**self).version_kind()
    }
}
