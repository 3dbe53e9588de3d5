//! Content integrity checking.
//!
//! Before an admin verifies an identity, the proof blob is fetched from the
//! content store and its SHA-256 digest compared with the file hash the
//! registrant committed to on-chain. The ledger never performs this check
//! itself: it is a gate in the admin workflow, and an admin can bypass it.

pub mod checker;
pub mod error;

pub use checker::{IntegrityChecker, IntegrityOutcome};
pub use error::IntegrityError;
