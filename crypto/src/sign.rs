//! Ed25519 signatures over 32-byte digests.
//!
//! Every signed object in DIMS is hashed first, so only digests are signed.

use dims_types::{KeyPair, PublicKey, Signature};
use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};

pub fn sign_digest(keys: &KeyPair, digest: &[u8; 32]) -> Signature {
    let signing_key = SigningKey::from_bytes(&keys.private.0);
    Signature(signing_key.sign(digest).to_bytes())
}

/// `false` for a bad signature and for a public key that is not a curve
/// point.
pub fn verify_digest(public: &PublicKey, digest: &[u8; 32], signature: &Signature) -> bool {
    VerifyingKey::from_bytes(&public.0)
        .map(|key| {
            key.verify(digest, &ed25519_dalek::Signature::from_bytes(&signature.0))
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{blake2b_256, keypair_from_seed};

    #[test]
    fn signed_digest_verifies() {
        let keys = keypair_from_seed(&[3; 32]);
        let digest = blake2b_256(b"verify 0x01");
        let sig = sign_digest(&keys, &digest);
        assert!(verify_digest(&keys.public, &digest, &sig));
    }

    #[test]
    fn other_digest_or_signer_fails() {
        let alice = keypair_from_seed(&[3; 32]);
        let bob = keypair_from_seed(&[4; 32]);
        let digest = blake2b_256(b"revoke 0x02");
        let sig = sign_digest(&alice, &digest);

        assert!(!verify_digest(&alice.public, &blake2b_256(b"revoke 0x03"), &sig));
        assert!(!verify_digest(&bob.public, &digest, &sig));
    }

    #[test]
    fn flipped_signature_bit_fails() {
        let keys = keypair_from_seed(&[3; 32]);
        let digest = [9; 32];
        let mut sig = sign_digest(&keys, &digest);
        sig.0[10] ^= 1;
        assert!(!verify_digest(&keys.public, &digest, &sig));
    }

    #[test]
    fn off_curve_key_fails() {
        let keys = keypair_from_seed(&[3; 32]);
        let sig = sign_digest(&keys, &[0; 32]);
        assert!(!verify_digest(&PublicKey([0xff; 32]), &[0; 32], &sig));
    }
}
