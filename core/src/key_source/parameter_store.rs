//! key_source/parameter_store.rs
//! Keys held in a parameter store under numbered versions.
//!
//! Selector rules when building the parameter name:
//! - pinned non-zero number `n` -> `"{name}:{n}"`
//! - else a configured label    -> `"{name}:{label}"`
//! - else the bare name
//!
//! A returned version of `0` means the store reported none.

use async_trait::async_trait;
use tracing::trace;

use crate::envelope::{KeyVersion, VersionKind};
use crate::key_source::decoder::SecretDecoder;
use crate::key_source::types::{KeySource, KeySourceError, ResolvedKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterRequest<'a> {
    /// Fully qualified name, including any `:version` or `:label` selector.
    pub name: &'a str,
    pub with_decryption: Option<bool>,
}

#[derive(Clone, Default)]
pub struct ParameterValue {
    pub value: String,
    pub version: u64,
}

impl std::fmt::Debug for ParameterValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterValue")
            .field("value", &"<redacted>")
            .field("version", &self.version)
            .finish()
    }
}

#[async_trait]
pub trait ParameterStoreClient: Send + Sync {
    async fn get_parameter(&self, request: ParameterRequest<'_>) -> Result<ParameterValue, KeySourceError>;
}

/// Key source over a [`ParameterStoreClient`]. Versions are numbers.
#[derive(Debug, Clone)]
pub struct ParameterStoreKeySource<C> {
    client: C,
    name: String,
    with_decryption: Option<bool>,
    label: Option<String>,
    decoder: SecretDecoder,
}

impl<C: ParameterStoreClient> ParameterStoreKeySource<C> {
    pub fn new(client: C, name: impl Into<String>) -> Self {
        Self {
            client,
            name: name.into(),
            with_decryption: None,
            label: None,
            decoder: SecretDecoder::default(),
        }
    }

    pub fn with_decryption(mut self, decrypt: bool) -> Self {
        self.with_decryption = Some(decrypt);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_decoder(mut self, decoder: SecretDecoder) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Parameter name for a lookup pinned to `version` (0 = unpinned).
    pub fn selector(&self, version: u64) -> String {
        match (version, &self.label) {
            (0, Some(label)) => format!("{}:{}", self.name, label),
            (0, None) => self.name.clone(),
            (n, _) => format!("{}:{}", self.name, n),
        }
    }
}

#[async_trait]
impl<C: ParameterStoreClient> KeySource for ParameterStoreKeySource<C> {
    async fn resolve(&self, version: Option<&KeyVersion>) -> Result<ResolvedKey, KeySourceError> {
        let pinned = match version {
            None => 0,
            Some(KeyVersion::Number(n)) => *n,
            Some(other @ KeyVersion::Label(_)) => {
                return Err(KeySourceError::msg(format!(
                    "parameter store versions are numbers, got label {}",
                    other
                )));
            }
        };

        let name = self.selector(pinned);
        trace!(parameter = %name, "fetching parameter");
        let param = self
            .client
            .get_parameter(ParameterRequest { name: &name, with_decryption: self.with_decryption })
            .await?;

        let key = self.decoder.decode(&param.value).map_err(KeySourceError::new)?;
        let version = (param.version != 0).then_some(KeyVersion::Number(param.version));
        Ok(ResolvedKey::new(key, version))
    }

    fn version_kind(&self) -> VersionKind {
        VersionKind::Number
    }
}
