//! LMDB implementation of VerifiedIndexStore.

use dims_store::verified::VerifiedIndexStore;
use dims_store::StoreError;
use dims_types::AccountAddress;

use crate::{address_from_key, LmdbEnvironment, LmdbError};

impl VerifiedIndexStore for LmdbEnvironment {
    fn verified_users(&self) -> Result<Vec<AccountAddress>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let iter = self.verified_db.iter(&rtxn).map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for entry in iter {
            let (_index, val) = entry.map_err(LmdbError::from)?;
            results.push(address_from_key(val)?);
        }
        Ok(results)
    }

    fn was_ever_verified(&self, address: &AccountAddress) -> Result<bool, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self
            .verified_set_db
            .get(&rtxn, address.as_bytes())
            .map_err(LmdbError::from)?
            .is_some())
    }

    fn verified_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.verified_db.len(&rtxn).map_err(LmdbError::from)?)
    }
}
