//! Nullable store: thread-safe in-memory ledger state for testing.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use dims_store::{
    BadgeStore, BadgeToken, EventLogStore, IdentityRecord, IdentityStore, MetaStore,
    ReceiptStore, StateStore, StoreError, VerifiedIndexStore, WriteSet,
};
use dims_types::{AccountAddress, Receipt, SequencedEvent, TokenId, TxHash};

#[derive(Default)]
struct State {
    identities: BTreeMap<AccountAddress, IdentityRecord>,
    badges: BTreeMap<TokenId, BadgeToken>,
    owners: HashMap<AccountAddress, TokenId>,
    token_counter: u64,
    verified: Vec<AccountAddress>,
    verified_set: HashSet<AccountAddress>,
    events: Vec<SequencedEvent>,
    receipts: HashMap<TxHash, Receipt>,
    meta: HashMap<String, Vec<u8>>,
}

/// An in-memory [`StateStore`].
///
/// All tables sit behind one mutex, so a commit is atomic with respect to
/// every reader. [`NullStore::fail_commits`] makes commits fail without
/// touching state, for exercising rollback paths.
#[derive(Default)]
pub struct NullStore {
    state: Mutex<State>,
    fail_commits: AtomicBool,
}

impl NullStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent commit fail with a backend error.
    pub fn fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }

    fn state(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::Backend("null store lock poisoned".into()))
    }
}

impl IdentityStore for NullStore {
    fn get_identity(&self, owner: &AccountAddress) -> Result<Option<IdentityRecord>, StoreError> {
        Ok(self.state()?.identities.get(owner).cloned())
    }

    fn identity_count(&self) -> Result<u64, StoreError> {
        Ok(self.state()?.identities.len() as u64)
    }

    fn iter_identities(&self) -> Result<Vec<IdentityRecord>, StoreError> {
        Ok(self.state()?.identities.values().cloned().collect())
    }
}

impl BadgeStore for NullStore {
    fn get_badge(&self, token_id: TokenId) -> Result<Option<BadgeToken>, StoreError> {
        Ok(self.state()?.badges.get(&token_id).cloned())
    }

    fn badge_of_owner(&self, owner: &AccountAddress) -> Result<Option<TokenId>, StoreError> {
        Ok(self.state()?.owners.get(owner).copied())
    }

    fn token_counter(&self) -> Result<u64, StoreError> {
        Ok(self.state()?.token_counter)
    }

    fn live_badge_count(&self) -> Result<u64, StoreError> {
        Ok(self.state()?.badges.len() as u64)
    }

    fn iter_badges(&self) -> Result<Vec<BadgeToken>, StoreError> {
        Ok(self.state()?.badges.values().cloned().collect())
    }
}

impl VerifiedIndexStore for NullStore {
    fn verified_users(&self) -> Result<Vec<AccountAddress>, StoreError> {
        Ok(self.state()?.verified.clone())
    }

    fn was_ever_verified(&self, address: &AccountAddress) -> Result<bool, StoreError> {
        Ok(self.state()?.verified_set.contains(address))
    }
}

impl EventLogStore for NullStore {
    fn event_count(&self) -> Result<u64, StoreError> {
        Ok(self.state()?.events.len() as u64)
    }

    fn events_since(&self, from: u64, limit: usize) -> Result<Vec<SequencedEvent>, StoreError> {
        let state = self.state()?;
        Ok(state
            .events
            .iter()
            .skip_while(|e| e.sequence < from)
            .take(limit)
            .cloned()
            .collect())
    }
}

impl ReceiptStore for NullStore {
    fn get_receipt(&self, hash: &TxHash) -> Result<Option<Receipt>, StoreError> {
        Ok(self.state()?.receipts.get(hash).cloned())
    }

    fn transaction_count(&self) -> Result<u64, StoreError> {
        Ok(self.state()?.receipts.len() as u64)
    }
}

impl MetaStore for NullStore {
    fn put_meta(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.state()?.meta.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn get_meta(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.state()?.meta.get(key).cloned())
    }
}

impl StateStore for NullStore {
    fn commit(&self, writes: &WriteSet) -> Result<(), StoreError> {
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(StoreError::CommitRejected("injected commit failure".into()));
        }

        let mut state = self.state()?;
        for (owner, record) in &writes.identities {
            state.identities.insert(*owner, record.clone());
        }
        for (token_id, staged) in &writes.badges {
            match staged {
                Some(badge) => {
                    state.badges.insert(*token_id, badge.clone());
                }
                None => {
                    state.badges.remove(token_id);
                }
            }
        }
        for (owner, token_id) in &writes.owner_index {
            match token_id {
                Some(id) => {
                    state.owners.insert(*owner, *id);
                }
                None => {
                    state.owners.remove(owner);
                }
            }
        }
        if let Some(counter) = writes.token_counter {
            state.token_counter = counter;
        }
        for address in &writes.verified_appends {
            if state.verified_set.insert(*address) {
                state.verified.push(*address);
            }
        }

        let tx_hash = writes.receipt.as_ref().map_or(TxHash::ZERO, |r| r.tx_hash);
        for event in &writes.events {
            let sequence = state.events.len() as u64;
            state.events.push(SequencedEvent {
                sequence,
                tx_hash,
                event: event.clone(),
            });
        }
        if let Some(receipt) = &writes.receipt {
            state.receipts.insert(receipt.tx_hash, receipt.clone());
        }
        Ok(())
    }
}
