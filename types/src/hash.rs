//! Fixed-length digests: file content commitments and transaction hashes.

use std::fmt;
use std::str::FromStr;

use crate::serde_text::text_or_bytes_serde;
use crate::ParseError;

/// A 32-byte SHA-256 digest over raw file bytes.
///
/// This is the on-chain integrity commitment for an identity proof. The textual
/// form is 64 lowercase hex characters; parsing accepts either case (and an
/// optional `0x` prefix) and normalises before comparison.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileHash([u8; 32]);

text_or_bytes_serde!(FileHash, 32);

impl FileHash {
    pub const LEN: usize = 32;
    pub const ZERO: Self = Self([0u8; 32]);

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The all-zero digest, used by clients as an "empty" sentinel.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a hex digest, case-insensitively.
    pub fn from_hex(s: &str) -> Result<Self, ParseError> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.len() != Self::LEN * 2 {
            return Err(ParseError::InvalidHash(format!(
                "expected {} hex characters, got {}",
                Self::LEN * 2,
                digits.len()
            )));
        }
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(digits.to_ascii_lowercase(), &mut bytes)
            .map_err(|e| ParseError::InvalidHash(e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl FromStr for FileHash {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Debug for FileHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileHash({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for FileHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// A 32-byte transaction hash.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TxHash([u8; 32]);

text_or_bytes_serde!(TxHash, 32);

impl TxHash {
    pub const ZERO: Self = Self([0u8; 32]);

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl FromStr for TxHash {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches("0x");
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| ParseError::InvalidHash(format!("transaction hash: {e}")))?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIGEST: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    #[test]
    fn file_hash_json_is_lowercase_hex() {
        let h = FileHash::new([0xab; 32]);
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, format!("\"{}\"", "ab".repeat(32)));
        assert_eq!(serde_json::from_str::<FileHash>(&json.to_ascii_uppercase()).unwrap(), h);
    }

    #[test]
    fn tx_hash_json_is_hex() {
        let h = TxHash::new([0x01; 32]);
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, format!("\"{}\"", "01".repeat(32)));
        assert_eq!(serde_json::from_str::<TxHash>(&json).unwrap(), h);
    }

    #[test]
    fn hashes_stay_raw_in_bincode() {
        let h = FileHash::new([7; 32]);
        assert_eq!(bincode::serialize(&h).unwrap(), vec![7u8; 32]);
        let t = TxHash::new([9; 32]);
        assert_eq!(bincode::deserialize::<TxHash>(&bincode::serialize(&t).unwrap()).unwrap(), t);
    }

    #[test]
    fn hex_roundtrip_is_lowercase() {
        let upper = DIGEST.to_ascii_uppercase();
        let h = FileHash::from_hex(&upper).unwrap();
        assert_eq!(h.to_hex(), DIGEST);
        assert_eq!(h, FileHash::from_hex(DIGEST).unwrap());
    }

    #[test]
    fn accepts_0x_prefix() {
        let h: FileHash = format!("0x{DIGEST}").parse().unwrap();
        assert_eq!(h.to_string(), DIGEST);
    }

    #[test]
    fn rejects_short_digest() {
        assert!(FileHash::from_hex("abcd").is_err());
        assert!(FileHash::from_hex("").is_err());
    }

    #[test]
    fn zero_sentinel() {
        assert!(FileHash::ZERO.is_zero());
        assert!(!FileHash::from_hex(DIGEST).unwrap().is_zero());
    }

    #[test]
    fn tx_hash_parse_display() {
        let h = TxHash::new([7u8; 32]);
        let parsed: TxHash = h.to_string().parse().unwrap();
        assert_eq!(parsed, h);
    }
}
