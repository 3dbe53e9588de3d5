use dims_types::{ErrorKind, FileHash};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IntegrityError {
    #[error("content hashes to {computed}, expected {expected}")]
    Mismatch {
        expected: FileHash,
        computed: FileHash,
    },

    #[error("content unavailable: {0}")]
    Unavailable(String),
}

impl IntegrityError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Mismatch { .. } => ErrorKind::IntegrityMismatch,
            Self::Unavailable(_) => ErrorKind::Unavailable,
        }
    }
}
