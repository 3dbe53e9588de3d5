//! The state-transition functions a transaction can invoke.

use dims_types::{AccountAddress, ContentId, FileHash};
use serde::{Deserialize, Serialize};

/// One ledger write.
///
/// The caller is never part of the call: it is the address derived from the
/// transaction's signing key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Call {
    Register {
        name: String,
        email: String,
        content_id: ContentId,
        file_hash: FileHash,
    },
    Verify {
        target: AccountAddress,
    },
    Revoke {
        target: AccountAddress,
    },
    UpdateProof {
        target: AccountAddress,
        content_id: ContentId,
    },
}

impl Call {
    /// Function name as exposed on the ledger surface.
    pub fn function(&self) -> &'static str {
        match self {
            Self::Register { .. } => "register",
            Self::Verify { .. } => "verify",
            Self::Revoke { .. } => "revoke",
            Self::UpdateProof { .. } => "updateProof",
        }
    }

    /// The account whose record the call touches, when it names one explicitly.
    pub fn target(&self) -> Option<&AccountAddress> {
        match self {
            Self::Register { .. } => None,
            Self::Verify { target } | Self::Revoke { target } => Some(target),
            Self::UpdateProof { target, .. } => Some(target),
        }
    }
}
