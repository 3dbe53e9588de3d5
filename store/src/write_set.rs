//! Staged state changes.
//!
//! A transition function never writes to a backend directly. It reads and
//! writes through an [`Overlay`], which layers pending changes over a base
//! [`StateView`]. When the transition succeeds the ledger hands the overlay's
//! [`WriteSet`] to [`StateStore::commit`](crate::StateStore::commit); when it
//! fails the overlay is dropped and the base is untouched.

use std::collections::{BTreeMap, BTreeSet};

use dims_types::{AccountAddress, DomainEvent, Receipt, TokenId};

use crate::{
    BadgeStore, BadgeToken, IdentityRecord, IdentityStore, StateView, StoreError,
    VerifiedIndexStore,
};

/// The complete set of changes produced by one transition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteSet {
    pub identities: BTreeMap<AccountAddress, IdentityRecord>,
    /// `None` marks a burned token.
    pub badges: BTreeMap<TokenId, Option<BadgeToken>>,
    /// `None` clears the owner's index entry.
    pub owner_index: BTreeMap<AccountAddress, Option<TokenId>>,
    pub token_counter: Option<u64>,
    pub verified_appends: Vec<AccountAddress>,
    pub events: Vec<DomainEvent>,
    pub receipt: Option<Receipt>,
}

impl WriteSet {
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
            && self.badges.is_empty()
            && self.owner_index.is_empty()
            && self.token_counter.is_none()
            && self.verified_appends.is_empty()
            && self.events.is_empty()
            && self.receipt.is_none()
    }
}

/// Pending changes layered over a base view.
pub struct Overlay<'a, S: StateView + ?Sized> {
    base: &'a S,
    writes: WriteSet,
}

impl<'a, S: StateView + ?Sized> Overlay<'a, S> {
    pub fn new(base: &'a S) -> Self {
        Self {
            base,
            writes: WriteSet::default(),
        }
    }

    pub fn put_identity(&mut self, record: IdentityRecord) {
        self.writes.identities.insert(record.owner, record);
    }

    /// Stage a minted badge and its owner index entry.
    pub fn put_badge(&mut self, badge: BadgeToken) {
        self.writes
            .owner_index
            .insert(badge.owner, Some(badge.token_id));
        self.writes.badges.insert(badge.token_id, Some(badge));
    }

    /// Stage the removal of a badge and its owner index entry.
    pub fn remove_badge(&mut self, token_id: TokenId, owner: AccountAddress) {
        self.writes.badges.insert(token_id, None);
        self.writes.owner_index.insert(owner, None);
    }

    pub fn set_token_counter(&mut self, counter: u64) {
        self.writes.token_counter = Some(counter);
    }

    /// Append to the verified index unless the address is already present.
    ///
    /// Returns whether the address was appended.
    pub fn append_verified(&mut self, address: AccountAddress) -> Result<bool, StoreError> {
        if self.was_ever_verified(&address)? {
            return Ok(false);
        }
        self.writes.verified_appends.push(address);
        Ok(true)
    }

    pub fn emit(&mut self, event: DomainEvent) {
        self.writes.events.push(event);
    }

    pub fn events(&self) -> &[DomainEvent] {
        &self.writes.events
    }

    pub fn set_receipt(&mut self, receipt: Receipt) {
        self.writes.receipt = Some(receipt);
    }

    pub fn writes(&self) -> &WriteSet {
        &self.writes
    }

    pub fn into_writes(self) -> WriteSet {
        self.writes
    }
}

impl<S: StateView + ?Sized> IdentityStore for Overlay<'_, S> {
    fn get_identity(&self, owner: &AccountAddress) -> Result<Option<IdentityRecord>, StoreError> {
        match self.writes.identities.get(owner) {
            Some(record) => Ok(Some(record.clone())),
            None => self.base.get_identity(owner),
        }
    }

    fn identity_count(&self) -> Result<u64, StoreError> {
        let mut count = self.base.identity_count()?;
        for owner in self.writes.identities.keys() {
            if !self.base.identity_exists(owner)? {
                count += 1;
            }
        }
        Ok(count)
    }

    fn iter_identities(&self) -> Result<Vec<IdentityRecord>, StoreError> {
        let mut merged: BTreeMap<AccountAddress, IdentityRecord> = self
            .base
            .iter_identities()?
            .into_iter()
            .map(|r| (r.owner, r))
            .collect();
        for (owner, record) in &self.writes.identities {
            merged.insert(*owner, record.clone());
        }
        Ok(merged.into_values().collect())
    }
}

impl<S: StateView + ?Sized> BadgeStore for Overlay<'_, S> {
    fn get_badge(&self, token_id: TokenId) -> Result<Option<BadgeToken>, StoreError> {
        match self.writes.badges.get(&token_id) {
            Some(staged) => Ok(staged.clone()),
            None => self.base.get_badge(token_id),
        }
    }

    fn badge_of_owner(&self, owner: &AccountAddress) -> Result<Option<TokenId>, StoreError> {
        match self.writes.owner_index.get(owner) {
            Some(staged) => Ok(*staged),
            None => self.base.badge_of_owner(owner),
        }
    }

    fn token_counter(&self) -> Result<u64, StoreError> {
        match self.writes.token_counter {
            Some(counter) => Ok(counter),
            None => self.base.token_counter(),
        }
    }

    fn live_badge_count(&self) -> Result<u64, StoreError> {
        let mut count = self.base.live_badge_count()?;
        for (token_id, staged) in &self.writes.badges {
            let in_base = self.base.get_badge(*token_id)?.is_some();
            match (in_base, staged.is_some()) {
                (false, true) => count += 1,
                (true, false) => count = count.saturating_sub(1),
                _ => {}
            }
        }
        Ok(count)
    }

    fn iter_badges(&self) -> Result<Vec<BadgeToken>, StoreError> {
        let mut merged: BTreeMap<TokenId, BadgeToken> = self
            .base
            .iter_badges()?
            .into_iter()
            .map(|b| (b.token_id, b))
            .collect();
        for (token_id, staged) in &self.writes.badges {
            match staged {
                Some(badge) => {
                    merged.insert(*token_id, badge.clone());
                }
                None => {
                    merged.remove(token_id);
                }
            }
        }
        Ok(merged.into_values().collect())
    }
}

impl<S: StateView + ?Sized> VerifiedIndexStore for Overlay<'_, S> {
    fn verified_users(&self) -> Result<Vec<AccountAddress>, StoreError> {
        let mut users = self.base.verified_users()?;
        users.extend(self.writes.verified_appends.iter().copied());
        Ok(users)
    }

    fn was_ever_verified(&self, address: &AccountAddress) -> Result<bool, StoreError> {
        if self.writes.verified_appends.contains(address) {
            return Ok(true);
        }
        self.base.was_ever_verified(address)
    }

    fn verified_count(&self) -> Result<u64, StoreError> {
        Ok(self.base.verified_count()? + self.writes.verified_appends.len() as u64)
    }
}

/// Owners named by more than one live badge in `badges`.
///
/// Used by backends and tests to check the one-badge-per-owner invariant.
pub fn duplicate_badge_owners(badges: &[BadgeToken]) -> Vec<AccountAddress> {
    let mut seen = BTreeSet::new();
    let mut duplicates = BTreeSet::new();
    for badge in badges {
        if !seen.insert(badge.owner) {
            duplicates.insert(badge.owner);
        }
    }
    duplicates.into_iter().collect()
}
