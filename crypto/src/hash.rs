//! Hash functions: SHA-256 for file commitments, Blake2b for everything else.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use dims_types::{ContentId, FileHash};
use sha2::Sha256;

type Blake2b256 = Blake2b<U32>;

/// Prefix for content ids derived locally from Blake2b.
const LOCAL_CID_PREFIX: &str = "b2-";

/// Compute a 256-bit Blake2b hash of arbitrary data.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Compute a SHA-256 digest.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// The integrity commitment for a file: SHA-256 over its raw bytes.
pub fn file_hash(data: &[u8]) -> FileHash {
    FileHash::new(sha256(data))
}

/// Content id for a blob held by a local content-addressed store.
pub fn content_id_for(data: &[u8]) -> ContentId {
    ContentId::from_digest(LOCAL_CID_PREFIX, &blake2b_256(data))
}

/// A random transaction nonce from the operating system's entropy source.
pub fn random_nonce() -> Result<u64, getrandom::Error> {
    let mut buf = [0u8; 8];
    getrandom::getrandom(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blake2b_deterministic() {
        assert_eq!(blake2b_256(b"hello dims"), blake2b_256(b"hello dims"));
        assert_ne!(blake2b_256(b"hello"), blake2b_256(b"world"));
    }

    #[test]
    fn blake2b_multi_equivalent() {
        let single = blake2b_256(b"helloworld");
        let multi = blake2b_256_multi(&[b"hello", b"world"]);
        assert_eq!(single, multi);
    }

    #[test]
    fn sha256_known_vector() {
        assert_eq!(
            hex::encode(sha256(b"hello")),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn file_hash_matches_lowercase_hex_digest() {
        let h = file_hash(b"");
        assert_eq!(
            h.to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn content_id_is_content_addressed() {
        let a = content_id_for(b"proof-a");
        assert_eq!(a, content_id_for(b"proof-a"));
        assert_ne!(a, content_id_for(b"proof-b"));
        assert!(a.as_str().starts_with("b2-"));
    }

    #[test]
    fn random_nonces_differ() {
        assert_ne!(random_nonce().unwrap(), random_nonce().unwrap());
    }
}
