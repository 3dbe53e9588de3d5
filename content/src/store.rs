use async_trait::async_trait;

use dims_types::ContentId;

use crate::ContentError;

/// Content-addressed blob storage.
///
/// `get(put(b)) == b` for every byte string `b`.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Store `bytes` and return the id to fetch them by.
    async fn put(&self, bytes: &[u8]) -> Result<ContentId, ContentError>;

    /// Fetch previously stored bytes.
    async fn get(&self, id: &ContentId) -> Result<Vec<u8>, ContentError>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}

#[async_trait]
impl<T: ContentStore + ?Sized> ContentStore for std::sync::Arc<T> {
    async fn put(&self, bytes: &[u8]) -> Result<ContentId, ContentError> {
        (**self).put(bytes).await
    }

    async fn get(&self, id: &ContentId) -> Result<Vec<u8>, ContentError> {
        (**self).get(id).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

#[async_trait]
impl<T: ContentStore + ?Sized> ContentStore for Box<T> {
    async fn put(&self, bytes: &[u8]) -> Result<ContentId, ContentError> {
        (**self).put(bytes).await
    }

    async fn get(&self, id: &ContentId) -> Result<Vec<u8>, ContentError> {
        (**self).get(id).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
