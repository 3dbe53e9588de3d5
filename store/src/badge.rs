//! Badge token storage trait.

use crate::StoreError;
use dims_types::{AccountAddress, TokenId, Timestamp};
use serde::{Deserialize, Serialize};

/// A live badge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeToken {
    pub token_id: TokenId,
    pub owner: AccountAddress,
    pub metadata_uri: String,
    pub minted_at: Timestamp,
}

/// Trait for reading badges.
///
/// Backends keep an owner → token id index next to the token table so that
/// [`BadgeStore::badge_of_owner`] is a point lookup.
pub trait BadgeStore {
    fn get_badge(&self, token_id: TokenId) -> Result<Option<BadgeToken>, StoreError>;

    fn badge_of_owner(&self, owner: &AccountAddress) -> Result<Option<TokenId>, StoreError>;

    /// Number of token ids ever allocated; the next mint receives this id.
    fn token_counter(&self) -> Result<u64, StoreError>;

    /// Number of badges currently live.
    fn live_badge_count(&self) -> Result<u64, StoreError>;

    fn iter_badges(&self) -> Result<Vec<BadgeToken>, StoreError>;
}
