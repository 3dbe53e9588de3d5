//! Pinata pinning service with an IPFS gateway for reads.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use dims_types::ContentId;

use crate::{ContentError, ContentStore};

pub const DEFAULT_API_URL: &str = "https://api.pinata.cloud";
pub const DEFAULT_GATEWAY_URL: &str = "https://ipfs.io";

/// Default timeout for pin and fetch requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Uploads with `POST {api}/pinning/pinFileToIPFS` and fetches with
/// `GET {gateway}/ipfs/{cid}`.
pub struct PinataContentStore {
    http_client: reqwest::Client,
    api_url: String,
    gateway_url: String,
    jwt: String,
}

/// The subset of Pinata's pin response we use.
#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

impl PinataContentStore {
    pub fn new(
        api_url: impl Into<String>,
        gateway_url: impl Into<String>,
        jwt: impl Into<String>,
    ) -> Result<Self, ContentError> {
        Self::with_timeout(api_url, gateway_url, jwt, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        api_url: impl Into<String>,
        gateway_url: impl Into<String>,
        jwt: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ContentError> {
        let jwt = jwt.into();
        if jwt.trim().is_empty() {
            return Err(ContentError::Config("pinata JWT is empty".into()));
        }
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .map_err(|e| ContentError::Config(e.to_string()))?;
        Ok(Self {
            http_client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            gateway_url: gateway_url.into().trim_end_matches('/').to_string(),
            jwt,
        })
    }

    pub fn pin_url(&self) -> String {
        format!("{}/pinning/pinFileToIPFS", self.api_url)
    }

    pub fn gateway_url_for(&self, id: &ContentId) -> String {
        format!("{}/ipfs/{}", self.gateway_url, id)
    }
}

fn map_send_error(e: reqwest::Error) -> ContentError {
    if e.is_timeout() {
        ContentError::Unavailable(format!("request timed out: {e}"))
    } else if e.is_connect() {
        ContentError::Unavailable(format!("connection failed: {e}"))
    } else {
        ContentError::RequestFailed(e.to_string())
    }
}

#[async_trait]
impl ContentStore for PinataContentStore {
    async fn put(&self, bytes: &[u8]) -> Result<ContentId, ContentError> {
        let form = Form::new().part("file", Part::bytes(bytes.to_vec()).file_name("proof"));
        let response = self
            .http_client
            .post(self.pin_url())
            .bearer_auth(&self.jwt)
            .multipart(form)
            .send()
            .await
            .map_err(map_send_error)?;

        if !response.status().is_success() {
            return Err(ContentError::RequestFailed(format!(
                "pin failed with HTTP status {}",
                response.status()
            )));
        }

        let pinned: PinResponse = response.json().await.map_err(|e| {
            ContentError::InvalidResponse(format!("failed to parse pin response: {e}"))
        })?;
        let id = ContentId::new(pinned.ipfs_hash)
            .map_err(|e| ContentError::InvalidResponse(e.to_string()))?;
        tracing::debug!(%id, bytes = bytes.len(), "pinned content");
        Ok(id)
    }

    async fn get(&self, id: &ContentId) -> Result<Vec<u8>, ContentError> {
        let url = self.gateway_url_for(id);
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(map_send_error)?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ContentError::NotFound(id.clone()));
        }
        if !response.status().is_success() {
            return Err(ContentError::Unavailable(format!(
                "gateway returned HTTP status {}",
                response.status()
            )));
        }

        let bytes = response.bytes().await.map_err(map_send_error)?;
        tracing::debug!(%id, bytes = bytes.len(), "fetched content from gateway");
        Ok(bytes.to_vec())
    }

    fn name(&self) -> &'static str {
        "pinata"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dims_types::ErrorKind;

    #[test]
    fn urls_are_normalised() {
        let store =
            PinataContentStore::new("https://api.example/", "https://gw.example//", "jwt").unwrap();
        assert_eq!(store.pin_url(), "https://api.example/pinning/pinFileToIPFS");
        let id = ContentId::new("QmProof").unwrap();
        assert_eq!(store.gateway_url_for(&id), "https://gw.example/ipfs/QmProof");
    }

    #[test]
    fn empty_jwt_is_rejected() {
        assert!(matches!(
            PinataContentStore::new(DEFAULT_API_URL, DEFAULT_GATEWAY_URL, "  "),
            Err(ContentError::Config(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_gateway_is_unavailable() {
        let store = PinataContentStore::with_timeout(
            "http://127.0.0.1:1",
            "http://127.0.0.1:1",
            "jwt",
            Duration::from_secs(2),
        )
        .unwrap();
        let err = store.get(&ContentId::new("QmProof").unwrap()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unavailable);
    }
}
