//! Transaction hashing, signing, and authentication.

use dims_crypto::{blake2b_256_multi, derive_address, sign_digest, verify_digest};
use dims_types::{AccountAddress, KeyPair, PublicKey, Signature, TxHash};
use serde::{Deserialize, Serialize};

use crate::{Call, TransactionError};

/// Domain separator mixed into every transaction hash.
const TX_DOMAIN: &[u8] = b"dims-tx-v1";

/// An unsigned transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Key that signs the transaction; the sender is derived from it.
    pub signer: PublicKey,
    /// Caller-chosen value that makes otherwise identical calls distinct.
    pub nonce: u64,
    pub call: Call,
}

impl Transaction {
    pub fn new(signer: PublicKey, nonce: u64, call: Call) -> Self {
        Self {
            signer,
            nonce,
            call,
        }
    }

    /// Blake2b-256 over the domain tag and the bincode encoding.
    pub fn hash(&self) -> Result<TxHash, TransactionError> {
        let encoded = bincode::serialize(self)?;
        Ok(TxHash::new(blake2b_256_multi(&[TX_DOMAIN, &encoded])))
    }

    /// The address that will be treated as the caller.
    pub fn sender(&self) -> AccountAddress {
        derive_address(&self.signer)
    }

    /// Sign with `keys`, which must match `signer`.
    pub fn sign(self, keys: &KeyPair) -> Result<SignedTransaction, TransactionError> {
        let hash = self.hash()?;
        let signature = sign_digest(keys, hash.as_bytes());
        Ok(SignedTransaction {
            transaction: self,
            signature,
        })
    }
}

/// A transaction together with its signer's signature over the hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub transaction: Transaction,
    pub signature: Signature,
}

impl SignedTransaction {
    /// Check the signature and return the transaction hash and sender.
    pub fn authenticate(&self) -> Result<(TxHash, AccountAddress), TransactionError> {
        let hash = self.transaction.hash()?;
        if !verify_digest(&self.transaction.signer, hash.as_bytes(), &self.signature) {
            return Err(TransactionError::InvalidSignature(hash.to_string()));
        }
        Ok((hash, self.transaction.sender()))
    }

    pub fn call(&self) -> &Call {
        &self.transaction.call
    }
}
