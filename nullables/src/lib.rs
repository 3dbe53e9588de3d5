//! In-memory stand-ins for the ledger's outside world.
//!
//! [`NullStore`] replaces LMDB, [`NullContentStore`] replaces the filesystem
//! and Pinata backends, and [`NullClock`] replaces wall-clock time. Each one
//! can be steered from a test: commits can be made to fail, blobs can be
//! tampered with or made unreachable, and time moves only when advanced.

pub mod clock;
pub mod content;
pub mod store;

pub use clock::NullClock;
pub use content::NullContentStore;
pub use store::NullStore;
