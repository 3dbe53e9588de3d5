//! Metadata storage trait.

use crate::StoreError;

/// Generic key-value store for bookkeeping that doesn't belong in any
/// domain-specific store (deployment record, schema version).
///
/// Unlike the domain stores, writes here go straight to the backend; they
/// happen only during genesis and migration, outside any transition.
pub trait MetaStore {
    fn put_meta(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    fn get_meta(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Current database schema version; `0` for a fresh database.
    fn get_schema_version(&self) -> Result<u32, StoreError> {
        match self.get_meta(SCHEMA_VERSION_KEY)? {
            None => Ok(0),
            Some(bytes) => {
                let arr: [u8; 4] = bytes.as_slice().try_into().map_err(|_| {
                    StoreError::Corruption("schema_version has unexpected byte length".into())
                })?;
                Ok(u32::from_le_bytes(arr))
            }
        }
    }

    fn set_schema_version(&self, version: u32) -> Result<(), StoreError> {
        self.put_meta(SCHEMA_VERSION_KEY, &version.to_le_bytes())
    }
}

pub const SCHEMA_VERSION_KEY: &str = "schema_version";
