//! Write batching. Groups every change of one transition into a single LMDB
//! write transaction.
//!
//! If the batch is dropped without calling [`WriteBatch::commit`], all
//! operations are rolled back (the underlying LMDB transaction is aborted).

use heed::RwTxn;

use dims_store::{BadgeToken, IdentityRecord, StateStore, StoreError, WriteSet};
use dims_types::{AccountAddress, Receipt, SequencedEvent, TokenId, TxHash};

use crate::environment::LmdbEnvironment;
use crate::meta::TOKEN_COUNTER_KEY;
use crate::LmdbError;

pub struct WriteBatch<'a> {
    txn: RwTxn<'a>,
    env: &'a LmdbEnvironment,
}

impl<'a> WriteBatch<'a> {
    pub(crate) fn new(env: &'a LmdbEnvironment) -> Result<Self, StoreError> {
        let txn = env.env().write_txn().map_err(LmdbError::from)?;
        Ok(Self { txn, env })
    }

    // ── Identities ──────────────────────────────────────────────────────

    pub fn put_identity(&mut self, record: &IdentityRecord) -> Result<(), StoreError> {
        let bytes = bincode::serialize(record).map_err(LmdbError::from)?;
        self.env
            .identities_db
            .put(&mut self.txn, record.owner.as_bytes(), &bytes)
            .map_err(LmdbError::from)?;
        Ok(())
    }

    // ── Badges ──────────────────────────────────────────────────────────

    pub fn put_badge(&mut self, badge: &BadgeToken) -> Result<(), StoreError> {
        let bytes = bincode::serialize(badge).map_err(LmdbError::from)?;
        self.env
            .badges_db
            .put(&mut self.txn, &badge.token_id.as_u64(), &bytes)
            .map_err(LmdbError::from)?;
        Ok(())
    }

    pub fn delete_badge(&mut self, token_id: TokenId) -> Result<(), StoreError> {
        self.env
            .badges_db
            .delete(&mut self.txn, &token_id.as_u64())
            .map_err(LmdbError::from)?;
        Ok(())
    }

    pub fn set_owner_index(
        &mut self,
        owner: &AccountAddress,
        token_id: Option<TokenId>,
    ) -> Result<(), StoreError> {
        match token_id {
            Some(id) => self
                .env
                .badge_owners_db
                .put(&mut self.txn, owner.as_bytes(), &id.as_u64())
                .map_err(LmdbError::from)?,
            None => {
                self.env
                    .badge_owners_db
                    .delete(&mut self.txn, owner.as_bytes())
                    .map_err(LmdbError::from)?;
            }
        }
        Ok(())
    }

    pub fn set_token_counter(&mut self, counter: u64) -> Result<(), StoreError> {
        self.env
            .meta_db
            .put(&mut self.txn, TOKEN_COUNTER_KEY, &counter.to_be_bytes())
            .map_err(LmdbError::from)?;
        Ok(())
    }

    // ── Verified index ──────────────────────────────────────────────────

    /// Append an address to the verified index. Already-present addresses
    /// are skipped.
    pub fn append_verified(&mut self, address: &AccountAddress) -> Result<(), StoreError> {
        let present = self
            .env
            .verified_set_db
            .get(&self.txn, address.as_bytes())
            .map_err(LmdbError::from)?
            .is_some();
        if present {
            return Ok(());
        }
        let index = self.env.verified_db.len(&self.txn).map_err(LmdbError::from)?;
        self.env
            .verified_db
            .put(&mut self.txn, &index, address.as_bytes())
            .map_err(LmdbError::from)?;
        self.env
            .verified_set_db
            .put(&mut self.txn, address.as_bytes(), &[])
            .map_err(LmdbError::from)?;
        Ok(())
    }

    // ── Events and receipts ─────────────────────────────────────────────

    pub fn append_event(&mut self, event: &SequencedEvent) -> Result<(), StoreError> {
        let bytes = bincode::serialize(event).map_err(LmdbError::from)?;
        self.env
            .events_db
            .put(&mut self.txn, &event.sequence, &bytes)
            .map_err(LmdbError::from)?;
        Ok(())
    }

    pub fn event_count(&self) -> Result<u64, StoreError> {
        Ok(self.env.events_db.len(&self.txn).map_err(LmdbError::from)?)
    }

    pub fn put_receipt(&mut self, receipt: &Receipt) -> Result<(), StoreError> {
        let bytes = bincode::serialize(receipt).map_err(LmdbError::from)?;
        self.env
            .receipts_db
            .put(&mut self.txn, receipt.tx_hash.as_bytes(), &bytes)
            .map_err(LmdbError::from)?;
        Ok(())
    }

    /// Stage every change in `writes`.
    pub fn apply(&mut self, writes: &WriteSet) -> Result<(), StoreError> {
        for record in writes.identities.values() {
            self.put_identity(record)?;
        }
        for (token_id, staged) in &writes.badges {
            match staged {
                Some(badge) => self.put_badge(badge)?,
                None => self.delete_badge(*token_id)?,
            }
        }
        for (owner, token_id) in &writes.owner_index {
            self.set_owner_index(owner, *token_id)?;
        }
        if let Some(counter) = writes.token_counter {
            self.set_token_counter(counter)?;
        }
        for address in &writes.verified_appends {
            self.append_verified(address)?;
        }

        let tx_hash = writes.receipt.as_ref().map_or(TxHash::ZERO, |r| r.tx_hash);
        let mut sequence = self.event_count()?;
        for event in &writes.events {
            self.append_event(&SequencedEvent {
                sequence,
                tx_hash,
                event: event.clone(),
            })?;
            sequence += 1;
        }
        if let Some(receipt) = &writes.receipt {
            self.put_receipt(receipt)?;
        }
        Ok(())
    }

    /// Commit all batched operations in a single write transaction.
    pub fn commit(self) -> Result<(), StoreError> {
        self.txn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}

impl StateStore for LmdbEnvironment {
    fn commit(&self, writes: &WriteSet) -> Result<(), StoreError> {
        let mut batch = self.write_batch()?;
        batch.apply(writes)?;
        batch.commit()?;
        tracing::trace!(
            identities = writes.identities.len(),
            badges = writes.badges.len(),
            events = writes.events.len(),
            "committed write set"
        );
        Ok(())
    }
}
