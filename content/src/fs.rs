//! Local directory content store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use dims_crypto::content_id_for;
use dims_types::ContentId;

use crate::{ContentError, ContentStore};

/// Stores each blob as `{dir}/{content id}`, where the id is derived from
/// the Blake2b digest of the bytes. Writing the same bytes twice is a no-op.
pub struct FsContentStore {
    dir: PathBuf,
}

impl FsContentStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, ContentError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Ids from other backends may contain path separators; only ids made of
    /// `[A-Za-z0-9_-]` map to a file here.
    fn path_for(&self, id: &ContentId) -> Option<PathBuf> {
        let safe = id
            .as_str()
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        safe.then(|| self.dir.join(id.as_str()))
    }
}

#[async_trait]
impl ContentStore for FsContentStore {
    async fn put(&self, bytes: &[u8]) -> Result<ContentId, ContentError> {
        let id = content_id_for(bytes);
        let path = self
            .path_for(&id)
            .ok_or_else(|| ContentError::Config(format!("unusable content id {id}")))?;
        if tokio::fs::try_exists(&path).await? {
            tracing::debug!(%id, "content already stored");
            return Ok(id);
        }

        let tmp = path.with_extension("tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        tracing::debug!(%id, bytes = bytes.len(), "stored content");
        Ok(id)
    }

    async fn get(&self, id: &ContentId) -> Result<Vec<u8>, ContentError> {
        let Some(path) = self.path_for(id) else {
            return Err(ContentError::NotFound(id.clone()));
        };
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                tracing::debug!(%id, bytes = bytes.len(), "fetched content");
                Ok(bytes)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ContentError::NotFound(id.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &'static str {
        "fs"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsContentStore::open(dir.path().join("blobs")).await.unwrap();
        let id = store.put(b"driver licence").await.unwrap();
        assert!(id.as_str().starts_with("b2-"));
        assert_eq!(store.get(&id).await.unwrap(), b"driver licence");
    }

    #[tokio::test]
    async fn same_bytes_same_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsContentStore::open(dir.path()).await.unwrap();
        let a = store.put(b"x").await.unwrap();
        let b = store.put(b"x").await.unwrap();
        assert_eq!(a, b);
        assert_ne!(a, store.put(b"y").await.unwrap());
    }

    #[tokio::test]
    async fn missing_and_foreign_ids_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsContentStore::open(dir.path()).await.unwrap();
        let missing = ContentId::new("b2-00").unwrap();
        assert!(matches!(store.get(&missing).await, Err(ContentError::NotFound(_))));
        let escape = ContentId::new("../etc/passwd").unwrap();
        assert!(matches!(store.get(&escape).await, Err(ContentError::NotFound(_))));
    }
}
