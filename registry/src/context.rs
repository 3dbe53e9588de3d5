use dims_types::{AccountAddress, Timestamp};

/// Who is calling and when, as established by the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TxContext {
    pub sender: AccountAddress,
    pub now: Timestamp,
}

impl TxContext {
    pub fn new(sender: AccountAddress, now: Timestamp) -> Self {
        Self { sender, now }
    }
}
