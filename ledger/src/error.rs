use dims_badge::BadgeError;
use dims_registry::RegistryError;
use dims_store::StoreError;
use dims_types::{AccountAddress, ErrorKind, TxHash};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid transaction: {0}")]
    InvalidSignature(String),

    #[error("transaction {0} has already been applied")]
    DuplicateTransaction(TxHash),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Badge(#[from] BadgeError),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("ledger was deployed by {stored}, not {requested}")]
    GenesisMismatch {
        stored: AccountAddress,
        requested: AccountAddress,
    },

    #[error("ledger was deployed with different registry parameters")]
    ParamsMismatch,

    #[error("no deployment found; initialise the ledger first")]
    NotDeployed,

    #[error("deployment record is unreadable: {0}")]
    CorruptDeployment(String),

    #[error("ledger write lock poisoned")]
    LockPoisoned,
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Registry(e) => e.kind(),
            Self::Badge(e) => e.kind(),
            Self::DuplicateTransaction(_) | Self::GenesisMismatch { .. } | Self::ParamsMismatch => {
                ErrorKind::StateConflict
            }
            Self::NotDeployed => ErrorKind::NotFound,
            Self::InvalidSignature(_)
            | Self::Storage(_)
            | Self::CorruptDeployment(_)
            | Self::LockPoisoned => ErrorKind::Internal,
        }
    }
}
