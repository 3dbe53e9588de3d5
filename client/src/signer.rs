use dims_crypto::{derive_address, random_nonce};
use dims_transactions::{Call, SignedTransaction, Transaction};
use dims_types::{AccountAddress, KeyPair};

use crate::ClientError;

/// An account able to sign ledger calls.
pub struct Signer {
    keys: KeyPair,
    address: AccountAddress,
}

impl Signer {
    pub fn new(keys: KeyPair) -> Self {
        let address = derive_address(&keys.public);
        Self { keys, address }
    }

    pub fn address(&self) -> AccountAddress {
        self.address
    }

    /// Sign `call` under a fresh random nonce.
    pub fn sign(&self, call: Call) -> Result<SignedTransaction, ClientError> {
        let nonce = random_nonce().map_err(|e| ClientError::Random(e.to_string()))?;
        Ok(Transaction::new(self.keys.public.clone(), nonce, call).sign(&self.keys)?)
    }
}
