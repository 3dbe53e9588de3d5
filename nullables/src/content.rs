//! Nullable content store: in-memory blobs with fault injection.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use dims_content::{ContentError, ContentStore};
use dims_types::ContentId;

/// An in-memory [`ContentStore`] keyed by the Blake2b content id.
///
/// Tests can make the store unavailable or swap the bytes behind an id to
/// simulate a tampered pin.
#[derive(Default)]
pub struct NullContentStore {
    blobs: Mutex<HashMap<ContentId, Vec<u8>>>,
    unavailable: AtomicBool,
}

impl NullContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `put` and `get` fail with `Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Replace the bytes stored under `id`.
    pub fn tamper(&self, id: &ContentId, bytes: &[u8]) -> Result<(), ContentError> {
        self.blobs
            .lock()
            .map_err(|_| ContentError::Unavailable("content store lock poisoned".into()))?
            .insert(id.clone(), bytes.to_vec());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.blobs.lock().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), ContentError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ContentError::Unavailable("null content store is offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ContentStore for NullContentStore {
    async fn put(&self, bytes: &[u8]) -> Result<ContentId, ContentError> {
        self.check_available()?;
        let id = dims_crypto::content_id_for(bytes);
        self.blobs
            .lock()
            .map_err(|_| ContentError::Unavailable("content store lock poisoned".into()))?
            .insert(id.clone(), bytes.to_vec());
        Ok(id)
    }

    async fn get(&self, id: &ContentId) -> Result<Vec<u8>, ContentError> {
        self.check_available()?;
        self.blobs
            .lock()
            .map_err(|_| ContentError::Unavailable("content store lock poisoned".into()))?
            .get(id)
            .cloned()
            .ok_or_else(|| ContentError::NotFound(id.clone()))
    }

    fn name(&self) -> &'static str {
        "null"
    }
}
