//! Fundamental types for the DIMS identity registry.
//!
//! This crate defines the value types shared across every other crate in the
//! workspace: account addresses, content identifiers, digests, badge token ids,
//! identity status, domain events, keys, registry parameters, and timestamps.

pub mod address;
pub mod content;
pub mod error;
pub mod event;
pub mod hash;
pub mod keys;
pub mod params;
mod serde_text;
pub mod state;
pub mod time;
pub mod token;

pub use address::AccountAddress;
pub use content::ContentId;
pub use error::{ErrorKind, ParseError};
pub use event::{DomainEvent, Receipt, SequencedEvent};
pub use hash::{FileHash, TxHash};
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use params::RegistryParams;
pub use state::IdentityStatus;
pub use time::{Clock, SystemClock, Timestamp};
pub use token::TokenId;
