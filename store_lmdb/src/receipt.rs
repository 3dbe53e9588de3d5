//! LMDB implementation of ReceiptStore.

use dims_store::receipt::ReceiptStore;
use dims_store::StoreError;
use dims_types::{Receipt, TxHash};

use crate::{decode, LmdbEnvironment, LmdbError};

impl ReceiptStore for LmdbEnvironment {
    fn get_receipt(&self, hash: &TxHash) -> Result<Option<Receipt>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        match self
            .receipts_db
            .get(&rtxn, hash.as_bytes())
            .map_err(LmdbError::from)?
        {
            Some(bytes) => Ok(Some(decode(bytes, "receipt")?)),
            None => Ok(None),
        }
    }

    fn transaction_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.receipts_db.len(&rtxn).map_err(LmdbError::from)?)
    }
}
