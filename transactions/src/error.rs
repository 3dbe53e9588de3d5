use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("invalid signature for transaction {0}")]
    InvalidSignature(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<bincode::Error> for TransactionError {
    fn from(e: bincode::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
