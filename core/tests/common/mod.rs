//! Shared test fixtures: a rotatable, request-recording key source and a
//! pinned nonce source.
#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use opaque_token::crypto::{NonceError, NonceSource};
use opaque_token::envelope::{KeyVersion, VersionKind};
use opaque_token::key_source::{KeySource, KeySourceError, ResolvedKey};

/// Key used by every interop fixture.
pub const FIXTURE_KEY: &[u8] = b"onvIzKsW6Ec2Q5VqS49zrNlmvrvibh8e";
pub const FIXTURE_PAYLOAD: &[u8] = b"hello, world!";

struct Ring {
    keys: Vec<(KeyVersion, Vec<u8>)>,
    current: usize,
    requests: Vec<Option<KeyVersion>>,
}

/// In-memory key ring. Records every version it was asked for.
pub struct RotatingKeys {
    kind: VersionKind,
    ring: Mutex<Ring>,
}

impl RotatingKeys {
    pub fn new(kind: VersionKind, version: impl Into<KeyVersion>, key: &[u8]) -> Self {
        Self {
            kind,
            ring: Mutex::new(Ring {
                keys: vec![(version.into(), key.to_vec())],
                current: 0,
                requests: Vec::new(),
            }),
        }
    }

    pub fn labelled(label: &str, key: &[u8]) -> Self {
        Self::new(VersionKind::Label, label, key)
    }

    pub fn numbered(n: u64, key: &[u8]) -> Self {
        Self::new(VersionKind::Number, n, key)
    }

    /// Add a key and make it current. Older keys stay resolvable.
    pub fn rotate(&self, version: impl Into<KeyVersion>, key: &[u8]) {
        let mut ring = self.ring.lock().unwrap();
        ring.keys.push((version.into(), key.to_vec()));
        ring.current = ring.keys.len() - 1;
    }

    /// Forget a version entirely.
    pub fn revoke(&self, version: &KeyVersion) {
        let mut ring = self.ring.lock().unwrap();
        let current = ring.keys[ring.current].0.clone();
        ring.keys.retain(|(v, _)| v != version);
        ring.current = ring.keys.iter().position(|(v, _)| *v == current).unwrap_or(0);
    }

    pub fn requests(&self) -> Vec<Option<KeyVersion>> {
        self.ring.lock().unwrap().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.ring.lock().unwrap().requests.clear();
    }
}

#[async_trait]
impl KeySource for RotatingKeys {
    async fn resolve(&self, version: Option<&KeyVersion>) -> Result<ResolvedKey, KeySourceError> {
        let mut ring = self.ring.lock().unwrap();
        ring.requests.push(version.cloned());

        let (v, key) = match version {
            None => ring.keys.get(ring.current).cloned(),
            Some(wanted) => ring.keys.iter().find(|(v, _)| v == wanted).cloned(),
        }
        .ok_or_else(|| KeySourceError::msg("no such key version"))?;

        Ok(ResolvedKey::new(key, Some(v)))
    }

    fn version_kind(&self) -> VersionKind {
        self.kind
    }
}

#[derive(Debug, thiserror::Error)]
#[error("store unreachable")]
pub struct Unreachable;

/// Key source that always fails.
pub struct BrokenKeys;

#[async_trait]
impl KeySource for BrokenKeys {
    async fn resolve(&self, _version: Option<&KeyVersion>) -> Result<ResolvedKey, KeySourceError> {
        Err(KeySourceError::new(Unreachable))
    }
}

/// Nonce source that repeats a fixed byte string.
pub struct FixedNonce(pub Vec<u8>);

impl NonceSource for FixedNonce {
    fn fill(&self, dst: &mut [u8]) -> Result<(), NonceError> {
        for (i, b) in dst.iter_mut().enumerate() {
            *b = self.0[i % self.0.len()];
        }
        Ok(())
    }
}

/// Nonce source whose entropy pool is exhausted.
pub struct DeadEntropy;

impl NonceSource for DeadEntropy {
    fn fill(&self, _dst: &mut [u8]) -> Result<(), NonceError> {
        Err(NonceError::Entropy("pool exhausted".into()))
    }
}
