use proptest::prelude::*;

use dims_types::{AccountAddress, ContentId, FileHash, Timestamp};

proptest! {
    /// Display always renders lowercase, and any casing of it parses back to the same address.
    #[test]
    fn address_parse_ignores_case(bytes in prop::array::uniform20(0u8..), upper in any::<bool>()) {
        let addr = AccountAddress::new(bytes);
        let shown = addr.to_string();
        prop_assert_eq!(shown.to_ascii_lowercase(), shown.clone());
        let input = if upper { shown.to_ascii_uppercase().replacen("0X", "0x", 1) } else { shown };
        prop_assert_eq!(input.parse::<AccountAddress>().unwrap(), addr);
    }

    /// Mixed-case digests normalise to the same commitment.
    #[test]
    fn file_hash_case_normalisation(bytes in prop::array::uniform32(0u8..), mask in prop::collection::vec(any::<bool>(), 64)) {
        let hash = FileHash::new(bytes);
        let mixed: String = hash
            .to_hex()
            .chars()
            .zip(mask.iter())
            .map(|(c, up)| if *up { c.to_ascii_uppercase() } else { c })
            .collect();
        prop_assert_eq!(FileHash::from_hex(&mixed).unwrap(), hash);
    }

    /// Digests of the wrong length never parse.
    #[test]
    fn file_hash_rejects_wrong_length(len in 0usize..128) {
        prop_assume!(len != 64);
        let s = "a".repeat(len);
        prop_assert!(FileHash::from_hex(&s).is_err());
    }

    /// FileHash survives the storage encoding unchanged.
    #[test]
    fn file_hash_bincode_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let hash = FileHash::new(bytes);
        let encoded = bincode::serialize(&hash).unwrap();
        let decoded: FileHash = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, hash);
    }

    /// Content ids made of visible ASCII within the limit are accepted.
    #[test]
    fn content_id_accepts_visible_ascii(s in "[!-~]{1,128}") {
        prop_assert!(ContentId::new(s).is_ok());
    }

    /// Any embedded whitespace is rejected.
    #[test]
    fn content_id_rejects_whitespace(prefix in "[a-z]{0,10}", suffix in "[a-z]{0,10}", ws in prop::sample::select(vec![' ', '\t', '\n'])) {
        let s = format!("{prefix}{ws}{suffix}");
        prop_assert!(ContentId::new(s).is_err());
    }

    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    #[test]
    fn timestamp_since_never_underflows(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let (ta, tb) = (Timestamp::new(a), Timestamp::new(b));
        prop_assert_eq!(ta.since(tb).as_secs(), a.saturating_sub(b));
    }
}
