//! LMDB implementation of IdentityStore.
//!
//! Keyed by the raw 20 address bytes.

use dims_store::identity::{IdentityRecord, IdentityStore};
use dims_store::StoreError;
use dims_types::AccountAddress;

use crate::{decode, LmdbEnvironment, LmdbError};

impl IdentityStore for LmdbEnvironment {
    fn get_identity(&self, owner: &AccountAddress) -> Result<Option<IdentityRecord>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        match self
            .identities_db
            .get(&rtxn, owner.as_bytes())
            .map_err(LmdbError::from)?
        {
            Some(bytes) => Ok(Some(decode(bytes, "identity record")?)),
            None => Ok(None),
        }
    }

    fn identity_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.identities_db.len(&rtxn).map_err(LmdbError::from)?)
    }

    fn iter_identities(&self) -> Result<Vec<IdentityRecord>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let iter = self.identities_db.iter(&rtxn).map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for entry in iter {
            let (_key, val) = entry.map_err(LmdbError::from)?;
            results.push(decode(val, "identity record")?);
        }
        Ok(results)
    }
}
