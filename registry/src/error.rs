use dims_badge::BadgeError;
use dims_store::StoreError;
use dims_types::{AccountAddress, ErrorKind, IdentityStatus};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{0} already has a pending registration")]
    AlreadyPending(AccountAddress),

    #[error("{0} is already verified")]
    AlreadyVerified(AccountAddress),

    #[error("{address} is {actual}, expected {expected}")]
    InvalidState {
        address: AccountAddress,
        expected: &'static str,
        actual: IdentityStatus,
    },

    #[error("{0} has never registered")]
    NotFound(AccountAddress),

    #[error("{caller} is not authorized to {action}")]
    Unauthorized {
        caller: AccountAddress,
        action: &'static str,
    },

    #[error("badge error: {0}")]
    Badge(#[from] BadgeError),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::Validation,
            Self::AlreadyPending(_) | Self::AlreadyVerified(_) | Self::InvalidState { .. } => {
                ErrorKind::StateConflict
            }
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::Badge(e) => e.kind(),
            Self::Storage(_) => ErrorKind::Internal,
        }
    }
}
