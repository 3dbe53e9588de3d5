//! Identity registry.
//!
//! Owns identity records and the verified index, and drives the badge
//! issuer. Every transition reads and writes through a
//! [`dims_store::Overlay`]; nothing reaches storage until the ledger commits
//! the overlay, so a failed transition leaves no trace.
//!
//! ```text
//! Unregistered ──register──► Pending ──verify──► Verified
//!       ▲                      │                    │
//!       │                   revoke               revoke
//!       │                      ▼                    ▼
//!       └──────register─── Revoked ◄────────────────┘
//! ```

pub mod context;
pub mod error;
pub mod registry;
pub mod validation;

pub use context::TxContext;
pub use error::RegistryError;
pub use registry::{IdentityRegistry, Registration};
