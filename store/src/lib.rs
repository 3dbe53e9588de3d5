//! Abstract storage traits for DIMS ledger state.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. The traits are read-only: state changes are staged in an
//! [`Overlay`] and applied with [`StateStore::commit`] as one [`WriteSet`],
//! so a transition either lands whole or not at all.

pub mod badge;
pub mod error;
pub mod event_log;
pub mod identity;
pub mod meta;
pub mod receipt;
pub mod verified;
pub mod write_set;

pub use badge::{BadgeStore, BadgeToken};
pub use error::StoreError;
pub use event_log::EventLogStore;
pub use identity::{IdentityRecord, IdentityStore};
pub use meta::MetaStore;
pub use receipt::ReceiptStore;
pub use verified::VerifiedIndexStore;
pub use write_set::{Overlay, WriteSet};

/// The state a transition function can read.
pub trait StateView: IdentityStore + BadgeStore + VerifiedIndexStore {}

impl<T: IdentityStore + BadgeStore + VerifiedIndexStore + ?Sized> StateView for T {}

/// A complete ledger storage backend.
pub trait StateStore:
    StateView + EventLogStore + ReceiptStore + MetaStore + Send + Sync
{
    /// Apply every change in `writes` atomically.
    ///
    /// Events are appended to the event log in order, numbered from the
    /// current [`EventLogStore::event_count`].
    fn commit(&self, writes: &WriteSet) -> Result<(), StoreError>;
}
