//! Account address type with `0x` hex display.

use std::fmt;
use std::str::FromStr;

use crate::serde_text::text_or_bytes_serde;
use crate::ParseError;

/// A 20-byte account address.
///
/// Derived from the account's Ed25519 public key (see `dims_crypto::derive_address`),
/// or deterministically from a label for contract accounts. Displayed as `0x` +
/// 40 lowercase hex characters; parsing is case-insensitive.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountAddress([u8; 20]);

text_or_bytes_serde!(AccountAddress, 20);

impl AccountAddress {
    pub const LEN: usize = 20;
    pub const ZERO: Self = Self([0u8; 20]);

    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl FromStr for AccountAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.len() != Self::LEN * 2 {
            return Err(ParseError::InvalidAddress(format!(
                "expected {} hex characters, got {}",
                Self::LEN * 2,
                digits.len()
            )));
        }
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| ParseError::InvalidAddress(format!("{s}: {e}")))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountAddress(0x{})", hex::encode(&self.0[..4]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "0x00000000000000000000000000000000000000ab";

    #[test]
    fn json_uses_prefixed_hex() {
        let addr: AccountAddress = ADDR.parse().unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{ADDR}\""));
        assert_eq!(serde_json::from_str::<AccountAddress>(&json).unwrap(), addr);
        assert!(serde_json::from_str::<AccountAddress>("\"0x12\"").is_err());
    }

    #[test]
    fn bincode_keeps_raw_bytes() {
        let addr: AccountAddress = ADDR.parse().unwrap();
        let encoded = bincode::serialize(&addr).unwrap();
        assert_eq!(encoded, addr.as_bytes().to_vec());
        assert_eq!(bincode::deserialize::<AccountAddress>(&encoded).unwrap(), addr);
    }

    #[test]
    fn parse_is_case_insensitive() {
        let lower: AccountAddress = "0xabcdef0123456789abcdef0123456789abcdef01".parse().unwrap();
        let upper: AccountAddress = "0xABCDEF0123456789ABCDEF0123456789ABCDEF01".parse().unwrap();
        assert_eq!(lower, upper);
        assert_eq!(
            upper.to_string(),
            "0xabcdef0123456789abcdef0123456789abcdef01"
        );
    }

    #[test]
    fn parse_without_prefix() {
        let addr: AccountAddress = "0000000000000000000000000000000000000001".parse().unwrap();
        assert_eq!(addr.as_bytes()[19], 1);
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert!("0x1234".parse::<AccountAddress>().is_err());
    }

    #[test]
    fn parse_rejects_non_hex() {
        let err = "0xzzcdef0123456789abcdef0123456789abcdef01"
            .parse::<AccountAddress>()
            .unwrap_err();
        assert!(matches!(err, ParseError::InvalidAddress(_)));
    }
}
