use dims_store::StoreError;
use dims_types::{AccountAddress, ErrorKind, TokenId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BadgeError {
    #[error("{caller} is not the badge minter")]
    UnauthorizedMinter { caller: AccountAddress },

    #[error("{owner} already holds badge {token_id}")]
    DuplicateBadge {
        owner: AccountAddress,
        token_id: TokenId,
    },

    #[error("invalid badge metadata: {0}")]
    InvalidMetadata(String),

    #[error("token {0} does not exist")]
    TokenNotFound(TokenId),

    #[error("{0} holds no badge")]
    NoBadge(AccountAddress),

    #[error("token counter exhausted")]
    CounterOverflow,

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl BadgeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnauthorizedMinter { .. } => ErrorKind::Unauthorized,
            Self::DuplicateBadge { .. } => ErrorKind::StateConflict,
            Self::InvalidMetadata(_) => ErrorKind::Validation,
            Self::TokenNotFound(_) | Self::NoBadge(_) => ErrorKind::NotFound,
            Self::CounterOverflow | Self::Storage(_) => ErrorKind::Internal,
        }
    }
}
