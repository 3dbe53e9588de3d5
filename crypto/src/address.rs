//! Account address derivation.
//!
//! An account address is the last 20 bytes of Blake2b-256 over the account's
//! Ed25519 public key. Contract addresses use the same width but are derived
//! from a domain tag, a label, and the deploying admin's address, so they can
//! never collide with a key-derived address in practice.

use dims_types::{AccountAddress, PublicKey};

use crate::hash::{blake2b_256, blake2b_256_multi};

const CONTRACT_DOMAIN: &[u8] = b"dims-contract";

fn tail20(digest: [u8; 32]) -> AccountAddress {
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&digest[12..]);
    AccountAddress::new(bytes)
}

/// Derive the account address controlled by a public key.
pub fn derive_address(public_key: &PublicKey) -> AccountAddress {
    tail20(blake2b_256(public_key.as_bytes()))
}

/// Derive the address of a contract deployed by `admin` under `label`.
pub fn contract_address(label: &str, admin: &AccountAddress) -> AccountAddress {
    tail20(blake2b_256_multi(&[
        CONTRACT_DOMAIN,
        label.as_bytes(),
        admin.as_bytes(),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::keypair_from_seed;

    #[test]
    fn derive_is_deterministic() {
        let kp = keypair_from_seed(&[9u8; 32]);
        assert_eq!(derive_address(&kp.public), derive_address(&kp.public));
    }

    #[test]
    fn different_keys_different_addresses() {
        let a = derive_address(&keypair_from_seed(&[1u8; 32]).public);
        let b = derive_address(&keypair_from_seed(&[2u8; 32]).public);
        assert_ne!(a, b);
    }

    #[test]
    fn contract_addresses_depend_on_label_and_admin() {
        let admin = derive_address(&keypair_from_seed(&[1u8; 32]).public);
        let other = derive_address(&keypair_from_seed(&[2u8; 32]).public);
        assert_ne!(
            contract_address("registry", &admin),
            contract_address("badge", &admin)
        );
        assert_ne!(
            contract_address("registry", &admin),
            contract_address("registry", &other)
        );
    }
}
