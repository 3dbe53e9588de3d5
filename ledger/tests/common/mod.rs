#![allow(dead_code)]

use std::sync::Arc;

use dims_crypto::{derive_address, file_hash, keypair_from_seed};
use dims_ledger::{GenesisConfig, Ledger, LedgerError};
use dims_nullables::{NullClock, NullStore};
use dims_transactions::{Call, SignedTransaction, Transaction};
use dims_types::{AccountAddress, ContentId, KeyPair, Receipt};

pub struct Account {
    pub keys: KeyPair,
    pub address: AccountAddress,
    nonce: u64,
}

impl Account {
    pub fn from_seed(seed: u8) -> Self {
        let keys = keypair_from_seed(&[seed; 32]);
        let address = derive_address(&keys.public);
        Self {
            keys,
            address,
            nonce: 0,
        }
    }

    pub fn sign(&mut self, call: Call) -> SignedTransaction {
        self.nonce += 1;
        Transaction::new(self.keys.public.clone(), self.nonce, call)
            .sign(&self.keys)
            .unwrap()
    }
}

pub fn open_ledger(admin: &Account) -> (Ledger<NullStore>, Arc<NullClock>) {
    let clock = Arc::new(NullClock::new(1_700_000_000));
    let genesis = GenesisConfig::new(admin.address);
    let ledger = Ledger::open(NullStore::new(), &genesis, clock.clone()).unwrap();
    (ledger, clock)
}

pub fn register_call(name: &str, proof: &[u8]) -> Call {
    Call::Register {
        name: name.to_string(),
        email: format!("{}@x.com", name.to_lowercase()),
        content_id: ContentId::new(format!("cid-{}", name.to_lowercase())).unwrap(),
        file_hash: file_hash(proof),
    }
}

pub fn submit(
    ledger: &Ledger<NullStore>,
    account: &mut Account,
    call: Call,
) -> Result<Receipt, LedgerError> {
    let tx = account.sign(call);
    ledger.submit(&tx)
}
