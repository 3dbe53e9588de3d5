//! Transaction receipt storage trait.

use crate::StoreError;
use dims_types::{Receipt, TxHash};

pub trait ReceiptStore {
    fn get_receipt(&self, hash: &TxHash) -> Result<Option<Receipt>, StoreError>;

    /// Number of applied transactions; the next one receives this sequence.
    fn transaction_count(&self) -> Result<u64, StoreError>;
}
