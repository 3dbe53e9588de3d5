//! Opaque content identifiers returned by content-addressed storage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ParseError;

/// A reference to a blob held by a content store (an IPFS CID, for example).
///
/// The registry treats the value as an opaque token. The only structure imposed
/// is that it is non-empty, contains no whitespace, and is at most
/// [`ContentId::MAX_LEN`] bytes.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContentId(String);

impl ContentId {
    pub const MAX_LEN: usize = 128;

    /// Validate and wrap a raw identifier.
    pub fn new(raw: impl Into<String>) -> Result<Self, ParseError> {
        let id = Self(raw.into());
        id.validate()?;
        Ok(id)
    }

    /// Check the well-formedness rules.
    ///
    /// Values arriving through deserialization bypass [`ContentId::new`], so
    /// transition functions call this again before persisting.
    pub fn validate(&self) -> Result<(), ParseError> {
        if self.0.is_empty() {
            return Err(ParseError::InvalidContentId("empty".into()));
        }
        if self.0.len() > Self::MAX_LEN {
            return Err(ParseError::InvalidContentId(format!(
                "{} bytes exceeds maximum of {}",
                self.0.len(),
                Self::MAX_LEN
            )));
        }
        if self.0.chars().any(char::is_whitespace) {
            return Err(ParseError::InvalidContentId(
                "contains whitespace".into(),
            ));
        }
        Ok(())
    }

    /// Build an id from a short tag and a 32-byte digest: `{tag}{hex(digest)}`.
    ///
    /// `tag` must be a few visible ASCII characters.
    pub fn from_digest(tag: &'static str, digest: &[u8; 32]) -> Self {
        Self(format!("{tag}{}", hex::encode(digest)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ContentId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim())
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_cid() {
        let cid = ContentId::new("QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG").unwrap();
        assert_eq!(cid.as_str().len(), 46);
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert!(ContentId::new("").is_err());
        assert!(ContentId::new("bafy abc").is_err());
    }

    #[test]
    fn rejects_oversized() {
        assert!(ContentId::new("a".repeat(ContentId::MAX_LEN + 1)).is_err());
        assert!(ContentId::new("a".repeat(ContentId::MAX_LEN)).is_ok());
    }

    #[test]
    fn deserialized_value_can_be_revalidated() {
        let id = ContentId(String::new());
        assert!(id.validate().is_err());
    }
}
