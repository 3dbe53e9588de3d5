//! Client workflows.
//!
//! - [`IdentityClient`]: a registrant hashes a proof file, stores it, and
//!   registers the resulting commitment
//! - [`AdminClient`]: an admin reviews a pending identity against its
//!   commitment and only then verifies it
//!
//! Both talk to the ledger through [`LedgerApi`] and wait for confirmation
//! with [`await_receipt`], which gives up after a configured timeout.

pub mod admin;
pub mod api;
pub mod confirm;
pub mod error;
pub mod registrant;
pub mod signer;

pub use admin::AdminClient;
pub use api::LedgerApi;
pub use confirm::{await_receipt, submit_and_confirm, ClientConfig};
pub use error::ClientError;
pub use registrant::IdentityClient;
pub use signer::Signer;
