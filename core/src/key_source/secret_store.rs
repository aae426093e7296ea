//! key_source/secret_store.rs
//! Keys held in a secret store, one secret id with many version ids.
//!
//! The store client is supplied by the caller; only the request/response
//! shape lives here.

use async_trait::async_trait;
use tracing::trace;

use crate::envelope::{KeyVersion, VersionKind};
use crate::key_source::decoder::SecretDecoder;
use crate::key_source::types::{KeySource, KeySourceError, ResolvedKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretRequest<'a> {
    pub secret_id: &'a str,
    /// Exact version id; `None` asks for the current one.
    pub version_id: Option<&'a str>,
    pub version_stage: Option<&'a str>,
}

#[derive(Clone, Default)]
pub struct SecretValue {
    pub binary: Option<Vec<u8>>,
    pub string: Option<String>,
    pub version_id: Option<String>,
}

impl std::fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretValue")
            .field("binary", &self.binary.as_ref().map(|_| "<redacted>"))
            .field("string", &self.string.as_ref().map(|_| "<redacted>"))
            .field("version_id", &self.version_id)
            .finish()
    }
}

#[async_trait]
pub trait SecretStoreClient: Send + Sync {
    async fn get_secret_value(&self, request: SecretRequest<'_>) -> Result<SecretValue, KeySourceError>;
}

/// Key source over a [`SecretStoreClient`]. Versions are labels.
#[derive(Debug, Clone)]
pub struct SecretStoreKeySource<C> {
    client: C,
    secret_id: String,
    version_stage: Option<String>,
    decoder: SecretDecoder,
}

impl<C: SecretStoreClient> SecretStoreKeySource<C> {
    pub fn new(client: C, secret_id: impl Into<String>) -> Self {
        Self {
            client,
            secret_id: secret_id.into(),
            version_stage: None,
            decoder: SecretDecoder::default(),
        }
    }

    pub fn with_version_stage(mut self, stage: impl Into<String>) -> Self {
        self.version_stage = Some(stage.into());
        self
    }

    pub fn with_decoder(mut self, decoder: SecretDecoder) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

#[async_trait]
impl<C: SecretStoreClient> KeySource for SecretStoreKeySource<C> {
    async fn resolve(&self, version: Option<&KeyVersion>) -> Result<ResolvedKey, KeySourceError> {
        let version_id = match version {
            None => None,
            Some(KeyVersion::Label(id)) => Some(id.as_str()),
            Some(other @ KeyVersion::Number(_)) => {
                return Err(KeySourceError::msg(format!(
                    "secret store versions are labels, got number {}",
                    other
                )));
            }
        };

        trace!(secret_id = %self.secret_id, pinned = version_id.is_some(), "fetching secret");
        let value = self
            .client
            .get_secret_value(SecretRequest {
                secret_id: &self.secret_id,
                version_id,
                version_stage: self.version_stage.as_deref(),
            })
            .await?;

        let key = match (value.string, value.binary) {
            (Some(s), _) => self.decoder.decode(&s).map_err(KeySourceError::new)?,
            (None, Some(b)) => b,
            (None, None) => {
                return Err(KeySourceError::msg(format!(
                    "secret {} has neither string nor binary value",
                    self.secret_id
                )));
            }
        };

        Ok(ResolvedKey::new(key, value.version_id.map(KeyVersion::Label)))
    }

    fn version_kind(&self) -> VersionKind {
        VersionKind::Label
    }
}
