//! Ed25519 key generation.

use dims_types::{KeyPair, PrivateKey, PublicKey};
use ed25519_dalek::SigningKey;

/// Generate a new Ed25519 key pair from the operating system's entropy source.
pub fn generate_keypair() -> Result<KeyPair, getrandom::Error> {
    let mut seed = [0u8; 32];
    getrandom::getrandom(&mut seed)?;
    let kp = keypair_from_seed(&seed);
    seed.fill(0);
    Ok(kp)
}

/// Derive the public key from a private key.
pub fn public_from_private(private: &PrivateKey) -> PublicKey {
    let signing_key = SigningKey::from_bytes(&private.0);
    PublicKey(signing_key.verifying_key().to_bytes())
}

/// Reconstruct a full key pair from a private key.
pub fn keypair_from_private(private: PrivateKey) -> KeyPair {
    let public = public_from_private(&private);
    KeyPair { public, private }
}

/// Derive a key pair from a 32-byte seed (deterministic).
pub fn keypair_from_seed(seed: &[u8; 32]) -> KeyPair {
    let signing_key = SigningKey::from_bytes(seed);
    KeyPair {
        public: PublicKey(signing_key.verifying_key().to_bytes()),
        private: PrivateKey(signing_key.to_bytes()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_produces_valid_keypair() {
        let kp = generate_keypair().unwrap();
        assert_ne!(kp.public.0, [0u8; 32]);
        assert_eq!(public_from_private(&kp.private), kp.public);
    }

    #[test]
    fn keypair_from_private_roundtrip() {
        let kp1 = keypair_from_seed(&[5u8; 32]);
        let kp2 = keypair_from_private(PrivateKey(kp1.private.0));
        assert_eq!(kp1.public.0, kp2.public.0);
    }

    #[test]
    fn keypair_from_seed_deterministic() {
        let kp1 = keypair_from_seed(&[42u8; 32]);
        let kp2 = keypair_from_seed(&[42u8; 32]);
        assert_eq!(kp1.public.0, kp2.public.0);
        assert_ne!(kp1.public.0, keypair_from_seed(&[43u8; 32]).public.0);
    }
}
