//! Content backend selection.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::pinata::{DEFAULT_API_URL, DEFAULT_GATEWAY_URL};
use crate::{ContentError, ContentStore, FsContentStore, PinataContentStore};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentBackend {
    #[default]
    Fs,
    Pinata,
}

/// The `[content]` table of the CLI configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentConfig {
    #[serde(default)]
    pub backend: ContentBackend,
    /// Blob directory for the `fs` backend.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_api_url")]
    pub pinata_api_url: String,
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,
    /// Bearer token for the Pinata API. Prefer `DIMS_PINATA_JWT` over the file.
    #[serde(default)]
    pub pinata_jwt: Option<String>,
}

fn default_dir() -> PathBuf {
    PathBuf::from("./dims_data/content")
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_gateway_url() -> String {
    DEFAULT_GATEWAY_URL.to_string()
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            backend: ContentBackend::default(),
            dir: default_dir(),
            pinata_api_url: default_api_url(),
            gateway_url: default_gateway_url(),
            pinata_jwt: None,
        }
    }
}

impl ContentConfig {
    /// Build the configured store.
    pub async fn build(&self) -> Result<Arc<dyn ContentStore>, ContentError> {
        match self.backend {
            ContentBackend::Fs => Ok(Arc::new(FsContentStore::open(&self.dir).await?)),
            ContentBackend::Pinata => {
                let jwt = self.pinata_jwt.as_deref().ok_or_else(|| {
                    ContentError::Config("the pinata backend needs pinata_jwt".into())
                })?;
                Ok(Arc::new(PinataContentStore::new(
                    &self.pinata_api_url,
                    &self.gateway_url,
                    jwt,
                )?))
            }
        }
    }
}
