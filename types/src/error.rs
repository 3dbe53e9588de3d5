//! Parse errors and the error taxonomy shared across crates.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Failure to parse one of the textual forms defined in this crate.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid account address: {0}")]
    InvalidAddress(String),

    #[error("invalid content digest: {0}")]
    InvalidHash(String),

    #[error("invalid content id: {0}")]
    InvalidContentId(String),
}

/// Coarse classification of every domain failure.
///
/// Each crate's error enum maps onto one of these through a `kind()` method so
/// that callers can pick a corrective action without matching on every variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Malformed input, rejected before any state mutation.
    Validation,
    /// The current status does not allow the requested transition.
    StateConflict,
    /// No record or token exists for the given key.
    NotFound,
    /// The caller lacks the required capability.
    Unauthorized,
    /// External content could not be fetched.
    Unavailable,
    /// Retrieved content does not hash to the on-chain commitment.
    IntegrityMismatch,
    /// Storage, signature, or other infrastructure failure.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Validation => "validation",
            Self::StateConflict => "state-conflict",
            Self::NotFound => "not-found",
            Self::Unauthorized => "unauthorized",
            Self::Unavailable => "unavailable",
            Self::IntegrityMismatch => "integrity-mismatch",
            Self::Internal => "internal",
        };
        f.write_str(s)
    }
}
