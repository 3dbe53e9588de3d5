//! Verified user index storage trait.

use crate::StoreError;
use dims_types::AccountAddress;

/// Append-only, insertion-ordered list of addresses that have ever been
/// verified. Each address appears at most once.
pub trait VerifiedIndexStore {
    fn verified_users(&self) -> Result<Vec<AccountAddress>, StoreError>;

    fn was_ever_verified(&self, address: &AccountAddress) -> Result<bool, StoreError>;

    fn verified_count(&self) -> Result<u64, StoreError> {
        self.verified_users().map(|v| v.len() as u64)
    }
}
