//! Cryptographic primitives for DIMS.
//!
//! - **SHA-256** for file content commitments (the on-chain `fileHash`)
//! - **Blake2b** for transaction hashes, local content ids, and address derivation
//! - **Ed25519** for transaction signing and signature verification

pub mod address;
pub mod hash;
pub mod keys;
pub mod sign;

pub use address::{contract_address, derive_address};
pub use hash::{blake2b_256, blake2b_256_multi, content_id_for, file_hash, random_nonce, sha256};
pub use keys::{generate_keypair, keypair_from_private, keypair_from_seed, public_from_private};
pub use sign::{sign_digest, verify_digest};
