use dims_types::{ContentId, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content {0} not found")]
    NotFound(ContentId),

    #[error("content store unavailable: {0}")]
    Unavailable(String),

    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("content store misconfigured: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContentError {
    /// Every failure to fetch is `Unavailable` to the integrity gate.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_)
            | Self::Unavailable(_)
            | Self::RequestFailed(_)
            | Self::InvalidResponse(_)
            | Self::Io(_) => ErrorKind::Unavailable,
            Self::Config(_) => ErrorKind::Validation,
        }
    }
}
