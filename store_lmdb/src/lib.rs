//! LMDB storage backend for DIMS.
//!
//! Implements all storage traits from `dims-store` using the `heed` LMDB
//! bindings. Each logical store maps to one or more named databases within a
//! single environment, and [`StateStore::commit`](dims_store::StateStore::commit)
//! applies a whole transition inside one LMDB write transaction.

pub mod badge;
pub mod environment;
pub mod error;
pub mod event_log;
pub mod identity;
pub mod integrity;
pub mod meta;
pub mod migration;
pub mod receipt;
pub mod verified;
pub mod write_batch;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use integrity::{check_data_dir, check_integrity, IntegrityReport};
pub use migration::{Migrator, CURRENT_SCHEMA_VERSION};
pub use write_batch::WriteBatch;

/// Decode a bincode value stored under `what`.
pub(crate) fn decode<T: serde::de::DeserializeOwned>(
    bytes: &[u8],
    what: &str,
) -> Result<T, LmdbError> {
    bincode::deserialize(bytes).map_err(|e| LmdbError::Serialization(format!("{what}: {e}")))
}

pub(crate) fn address_from_key(key: &[u8]) -> Result<dims_types::AccountAddress, LmdbError> {
    let bytes: [u8; 20] = key
        .try_into()
        .map_err(|_| LmdbError::Corruption(format!("address key of length {}", key.len())))?;
    Ok(dims_types::AccountAddress::new(bytes))
}
