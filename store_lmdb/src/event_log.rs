//! LMDB implementation of EventLogStore.

use dims_store::event_log::EventLogStore;
use dims_store::StoreError;
use dims_types::SequencedEvent;

use crate::{decode, LmdbEnvironment, LmdbError};

impl EventLogStore for LmdbEnvironment {
    fn event_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.events_db.len(&rtxn).map_err(LmdbError::from)?)
    }

    fn events_since(&self, from: u64, limit: usize) -> Result<Vec<SequencedEvent>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let iter = self
            .events_db
            .range(&rtxn, &(from..))
            .map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for entry in iter.take(limit) {
            let (_seq, val) = entry.map_err(LmdbError::from)?;
            results.push(decode(val, "event")?);
        }
        Ok(results)
    }
}
