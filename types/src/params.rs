//! Registry parameters, fixed at genesis.

use serde::{Deserialize, Serialize};

use crate::ContentId;

/// Parameters governing registry validation and badge metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryParams {
    /// Maximum length of the `name` attribute, in bytes.
    pub max_name_len: usize,
    /// Maximum length of the `email` attribute, in bytes.
    pub max_email_len: usize,
    /// Prefix prepended to a content id to form a badge metadata URI.
    pub metadata_uri_prefix: String,
    /// Badge collection name.
    pub badge_name: String,
    /// Badge collection symbol.
    pub badge_symbol: String,
}

impl RegistryParams {
    pub fn dims_defaults() -> Self {
        Self {
            max_name_len: 128,
            max_email_len: 254,
            metadata_uri_prefix: "ipfs://".to_string(),
            badge_name: "IdentityBadge".to_string(),
            badge_symbol: "IDB".to_string(),
        }
    }

    /// Metadata URI for a badge backed by the given proof blob.
    pub fn metadata_uri(&self, content_id: &ContentId) -> String {
        format!("{}{}", self.metadata_uri_prefix, content_id)
    }
}

impl Default for RegistryParams {
    fn default() -> Self {
        Self::dims_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_uri_uses_ipfs_scheme() {
        let params = RegistryParams::default();
        let cid = ContentId::new("QmProof").unwrap();
        assert_eq!(params.metadata_uri(&cid), "ipfs://QmProof");
    }
}
