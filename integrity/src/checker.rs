use dims_content::ContentStore;
use dims_crypto::file_hash;
use dims_types::{ContentId, FileHash, ParseError};

use crate::IntegrityError;

/// Result of checking a blob against its commitment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IntegrityOutcome {
    Match,
    Mismatch {
        expected: FileHash,
        computed: FileHash,
    },
    /// The blob could not be fetched; no decision may be taken.
    Unavailable { reason: String },
}

impl IntegrityOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }

    /// `Ok` only for [`IntegrityOutcome::Match`].
    pub fn into_result(self) -> Result<(), IntegrityError> {
        match self {
            Self::Match => Ok(()),
            Self::Mismatch { expected, computed } => {
                Err(IntegrityError::Mismatch { expected, computed })
            }
            Self::Unavailable { reason } => Err(IntegrityError::Unavailable(reason)),
        }
    }
}

pub struct IntegrityChecker<C> {
    store: C,
}

impl<C: ContentStore> IntegrityChecker<C> {
    pub fn new(store: C) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &C {
        &self.store
    }

    /// Fetch `id` and compare its digest with `expected`.
    pub async fn verify_content(&self, id: &ContentId, expected: &FileHash) -> IntegrityOutcome {
        match self.store.get(id).await {
            Ok(bytes) => {
                let outcome = Self::verify_bytes(&bytes, expected);
                tracing::debug!(
                    %id,
                    backend = self.store.name(),
                    matched = outcome.is_match(),
                    "checked content integrity"
                );
                outcome
            }
            Err(e) => {
                tracing::debug!(
                    %id,
                    backend = self.store.name(),
                    error = %e,
                    "content fetch failed"
                );
                IntegrityOutcome::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// As [`verify_content`](Self::verify_content), with the commitment given
    /// as hex in either case.
    pub async fn verify_content_hex(
        &self,
        id: &ContentId,
        expected_hex: &str,
    ) -> Result<IntegrityOutcome, ParseError> {
        let expected = FileHash::from_hex(expected_hex)?;
        Ok(self.verify_content(id, &expected).await)
    }

    /// Compare the SHA-256 digest of `bytes` with `expected`.
    pub fn verify_bytes(bytes: &[u8], expected: &FileHash) -> IntegrityOutcome {
        let computed = file_hash(bytes);
        if computed == *expected {
            IntegrityOutcome::Match
        } else {
            IntegrityOutcome::Mismatch {
                expected: *expected,
                computed,
            }
        }
    }
}
