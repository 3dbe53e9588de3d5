//! Identity record storage trait.

use crate::StoreError;
use dims_types::{AccountAddress, ContentId, FileHash, IdentityStatus, Timestamp};
use serde::{Deserialize, Serialize};

/// The registry's persisted entry for one address.
///
/// Absence of a record is the `Unregistered` status; a stored record is never
/// `Unregistered`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// The registering address. Immutable after creation.
    pub owner: AccountAddress,
    pub name: String,
    pub email: String,
    /// Back-reference to the proof blob in the content store.
    pub content_id: ContentId,
    /// SHA-256 commitment over the proof blob.
    pub file_hash: FileHash,
    pub status: IdentityStatus,
    pub registered_at: Timestamp,
    pub verified_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
    /// Number of successful registrations by this address.
    pub registrations: u32,
}

/// Trait for reading identity records.
pub trait IdentityStore {
    fn get_identity(&self, owner: &AccountAddress) -> Result<Option<IdentityRecord>, StoreError>;

    fn identity_count(&self) -> Result<u64, StoreError>;

    fn iter_identities(&self) -> Result<Vec<IdentityRecord>, StoreError>;

    fn identity_exists(&self, owner: &AccountAddress) -> Result<bool, StoreError> {
        self.get_identity(owner).map(|r| r.is_some())
    }
}
