//! Identity lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The verification status of an identity.
///
/// `Unregistered` is never persisted: it is the status of an address with no
/// record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentityStatus {
    /// No record exists for this address.
    Unregistered,
    /// Registered; awaiting an admin decision.
    Pending,
    /// Verified by the admin; holds a live badge.
    Verified,
    /// Revoked by the admin; may register again.
    Revoked,
}

impl IdentityStatus {
    /// Whether `register` is allowed from this status.
    pub fn can_register(&self) -> bool {
        matches!(self, Self::Unregistered | Self::Revoked)
    }

    /// Whether `revoke` is allowed from this status.
    pub fn can_revoke(&self) -> bool {
        matches!(self, Self::Pending | Self::Verified)
    }

    /// Whether a badge must exist for an identity in this status.
    pub fn holds_badge(&self) -> bool {
        matches!(self, Self::Verified)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unregistered => "unregistered",
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Revoked => "revoked",
        }
    }
}

impl fmt::Display for IdentityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
