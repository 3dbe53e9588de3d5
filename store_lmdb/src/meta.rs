//! LMDB implementation of MetaStore.

use dims_store::meta::MetaStore;
use dims_store::StoreError;

use crate::{LmdbEnvironment, LmdbError};

/// Meta key holding the next token id as big-endian `u64`.
pub(crate) const TOKEN_COUNTER_KEY: &[u8] = b"token_counter";

impl MetaStore for LmdbEnvironment {
    fn put_meta(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.meta_db
            .put(&mut wtxn, key.as_bytes(), value)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn get_meta(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .meta_db
            .get(&rtxn, key.as_bytes())
            .map_err(LmdbError::from)?;
        Ok(val.map(|v| v.to_vec()))
    }
}

pub(crate) fn decode_counter(bytes: Option<&[u8]>) -> Result<u64, LmdbError> {
    match bytes {
        None => Ok(0),
        Some(b) => {
            let arr: [u8; 8] = b
                .try_into()
                .map_err(|_| {
                    LmdbError::Corruption("token_counter has unexpected byte length".into())
                })?;
            Ok(u64::from_be_bytes(arr))
        }
    }
}
