//! LMDB implementation of BadgeStore.
//!
//! `badges` holds the live tokens by id; `badge_owners` is the
//! owner → token id index. The token counter lives in `meta` and is never
//! decremented.

use dims_store::badge::{BadgeStore, BadgeToken};
use dims_store::StoreError;
use dims_types::{AccountAddress, TokenId};

use crate::meta::{decode_counter, TOKEN_COUNTER_KEY};
use crate::{decode, LmdbEnvironment, LmdbError};

impl BadgeStore for LmdbEnvironment {
    fn get_badge(&self, token_id: TokenId) -> Result<Option<BadgeToken>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        match self
            .badges_db
            .get(&rtxn, &token_id.as_u64())
            .map_err(LmdbError::from)?
        {
            Some(bytes) => Ok(Some(decode(bytes, "badge")?)),
            None => Ok(None),
        }
    }

    fn badge_of_owner(&self, owner: &AccountAddress) -> Result<Option<TokenId>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let id = self
            .badge_owners_db
            .get(&rtxn, owner.as_bytes())
            .map_err(LmdbError::from)?;
        Ok(id.map(TokenId::new))
    }

    fn token_counter(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let bytes = self
            .meta_db
            .get(&rtxn, TOKEN_COUNTER_KEY)
            .map_err(LmdbError::from)?;
        Ok(decode_counter(bytes)?)
    }

    fn live_badge_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.badges_db.len(&rtxn).map_err(LmdbError::from)?)
    }

    fn iter_badges(&self) -> Result<Vec<BadgeToken>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let iter = self.badges_db.iter(&rtxn).map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for entry in iter {
            let (_id, val) = entry.map_err(LmdbError::from)?;
            results.push(decode(val, "badge")?);
        }
        Ok(results)
    }
}
