//! Content-addressed storage for identity proof blobs.
//!
//! The registry only ever sees the opaque [`ContentId`](dims_types::ContentId)
//! a store returns. Two backends are provided:
//! - [`FsContentStore`]: a local directory keyed by Blake2b digest
//! - [`PinataContentStore`]: pins to IPFS through the Pinata API and fetches
//!   through an IPFS gateway

pub mod config;
pub mod error;
pub mod fs;
pub mod pinata;
pub mod store;

pub use config::{ContentBackend, ContentConfig};
pub use error::ContentError;
pub use fs::FsContentStore;
pub use pinata::PinataContentStore;
pub use store::ContentStore;
