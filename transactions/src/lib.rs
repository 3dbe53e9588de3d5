//! Ledger calls and the signed transaction envelope.
//!
//! Call types:
//! - **Register**: submit `(name, email, contentId, fileHash)` for the signer's address
//! - **Verify**: admin approves a pending identity (mints a badge)
//! - **Revoke**: admin revokes a pending or verified identity (burns the badge)
//! - **UpdateProof**: owner or admin re-points a pending identity at a new blob

pub mod call;
pub mod error;
pub mod transaction;

pub use call::Call;
pub use error::TransactionError;
pub use transaction::{SignedTransaction, Transaction};
