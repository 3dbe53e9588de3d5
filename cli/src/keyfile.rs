//! Key files: the hex-encoded 32-byte Ed25519 seed on one line.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use dims_crypto::{derive_address, generate_keypair, keypair_from_private};
use dims_types::{AccountAddress, KeyPair, PrivateKey};
use zeroize::Zeroizing;

/// Generate a key, write it to `path` and return its address.
pub fn generate_key_file(path: &Path) -> anyhow::Result<AccountAddress> {
    let keys = generate_keypair().map_err(|e| anyhow::anyhow!("generating key: {e}"))?;
    write_key(path, &keys)?;
    Ok(derive_address(&keys.public))
}

/// Write `keys` to a new file readable only by its owner. Fails if `path`
/// already exists.
pub fn write_key(path: &Path, keys: &KeyPair) -> anyhow::Result<()> {
    let mut file = create_private(path)
        .with_context(|| format!("creating key file {}", path.display()))?;
    let encoded = Zeroizing::new(format!("{}\n", hex::encode(keys.private.0)));
    file.write_all(encoded.as_bytes())
        .and_then(|()| file.sync_all())
        .with_context(|| format!("writing key file {}", path.display()))?;
    Ok(())
}

pub fn read_key(path: &Path) -> anyhow::Result<KeyPair> {
    let contents = Zeroizing::new(
        std::fs::read_to_string(path)
            .with_context(|| format!("reading key file {}", path.display()))?,
    );
    let bytes = Zeroizing::new(
        hex::decode(contents.trim())
            .with_context(|| format!("key file {} is not hex", path.display()))?,
    );
    let seed: [u8; 32] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| anyhow::anyhow!("key file {} must hold 32 bytes", path.display()))?;
    Ok(keypair_from_private(PrivateKey(seed)))
}

#[cfg(unix)]
fn create_private(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn create_private(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().write(true).create_new(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dims_crypto::keypair_from_seed;

    #[test]
    fn written_key_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admin.key");
        let keys = keypair_from_seed(&[7; 32]);

        write_key(&path, &keys).unwrap();
        assert_eq!(read_key(&path).unwrap().public, keys.public);
    }

    #[test]
    fn generated_key_matches_its_address() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.key");

        let address = generate_key_file(&path).unwrap();
        assert_eq!(derive_address(&read_key(&path).unwrap().public), address);
    }

    #[cfg(unix)]
    #[test]
    fn key_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admin.key");
        write_key(&path, &keypair_from_seed(&[7; 32])).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn existing_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admin.key");
        std::fs::write(&path, "keep me").unwrap();

        assert!(write_key(&path, &keypair_from_seed(&[1; 32])).is_err());
        assert!(generate_key_file(&path).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me");
    }

    #[test]
    fn malformed_files_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.key");

        std::fs::write(&path, "not hex").unwrap();
        assert!(read_key(&path).is_err());

        std::fs::write(&path, "abcd").unwrap();
        assert!(read_key(&path).is_err());
    }
}
