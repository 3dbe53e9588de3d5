use std::time::Duration;

use dims_content::ContentError;
use dims_integrity::IntegrityError;
use dims_ledger::LedgerError;
use dims_transactions::TransactionError;
use dims_types::{ErrorKind, TxHash};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("content store: {0}")]
    Content(#[from] ContentError),

    #[error("integrity check failed: {0}")]
    Integrity(#[from] IntegrityError),

    #[error("transaction: {0}")]
    Transaction(#[from] TransactionError),

    #[error("transaction {tx_hash} not confirmed after {waited:?}")]
    ConfirmationTimeout { tx_hash: TxHash, waited: Duration },

    #[error("randomness unavailable: {0}")]
    Random(String),
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Ledger(e) => e.kind(),
            Self::Content(e) => e.kind(),
            Self::Integrity(e) => e.kind(),
            Self::ConfirmationTimeout { .. } => ErrorKind::Unavailable,
            Self::Transaction(_) | Self::Random(_) => ErrorKind::Internal,
        }
    }
}
