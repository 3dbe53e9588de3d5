//! The DIMS ledger.
//!
//! A single-writer, totally ordered transaction log over a [`StateStore`].
//! Every write arrives as a signed transaction; the ledger authenticates it,
//! runs the registry transition against an overlay, and commits the result
//! together with its receipt and events in one atomic step. Rejected
//! transactions leave no state behind.
//!
//! [`StateStore`]: dims_store::StateStore

pub mod error;
pub mod event_bus;
pub mod genesis;
pub mod ledger;

pub use error::LedgerError;
pub use event_bus::EventBus;
pub use genesis::{Deployment, GenesisConfig, DEPLOYMENT_KEY};
pub use ledger::Ledger;
