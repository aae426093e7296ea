//! key_source/static_key.rs
//! In-memory key with an optional fixed version.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::envelope::{KeyVersion, VersionKind};
use crate::key_source::types::{KeySource, KeySourceError, ResolvedKey};

/// A single key that never rotates.
///
/// The bytes are copied at construction, so later changes to the caller's
/// buffer do not leak into issued tokens.
#[derive(Clone)]
pub struct StaticKey {
    key: Zeroizing<Vec<u8>>,
    version: Option<KeyVersion>,
}

impl StaticKey {
    pub fn new(key: &[u8]) -> Self {
        Self { key: Zeroizing::new(key.to_vec()), version: None }
    }

    /// Key that stamps `version` on every envelope it produces.
    pub fn with_version(key: &[u8], version: impl Into<KeyVersion>) -> Self {
        Self { key: Zeroizing::new(key.to_vec()), version: Some(version.into()) }
    }

    pub fn version(&self) -> Option<&KeyVersion> {
        self.version.as_ref()
    }
}

impl std::fmt::Debug for StaticKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticKey")
            .field("key", &"<redacted>")
            .field("version", &self.version)
            .finish()
    }
}

#[async_trait]
impl KeySource for StaticKey {
    /// Any requested version resolves to the one key; a version it never
    /// issued is rejected.
    async fn resolve(&self, version: Option<&KeyVersion>) -> Result<ResolvedKey, KeySourceError> {
        match (version, &self.version) {
            (Some(asked), Some(own)) if asked != own => {
                Err(KeySourceError::msg(format!("unknown key version {}", asked)))
            }
            (Some(asked), None) => Err(KeySourceError::msg(format!("unknown key version {}", asked))),
            _ => Ok(ResolvedKey::new(self.key.to_vec(), self.version.clone())),
        }
    }

    fn version_kind(&self) -> VersionKind {
        self.version.as_ref().map_or(VersionKind::Label, KeyVersion::kind)
    }
}
