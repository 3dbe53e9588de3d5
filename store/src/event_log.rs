//! Event log storage trait.

use crate::StoreError;
use dims_types::SequencedEvent;

/// Globally ordered log of domain events.
pub trait EventLogStore {
    fn event_count(&self) -> Result<u64, StoreError>;

    /// Up to `limit` events with `sequence >= from`, in order.
    fn events_since(&self, from: u64, limit: usize) -> Result<Vec<SequencedEvent>, StoreError>;
}
