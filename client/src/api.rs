use std::sync::Arc;

use async_trait::async_trait;

use dims_ledger::Ledger;
use dims_store::{IdentityRecord, StateStore};
use dims_transactions::SignedTransaction;
use dims_types::{AccountAddress, Receipt, TokenId, TxHash};

use crate::ClientError;

/// The ledger surface the client workflows need.
///
/// `submit` only acknowledges acceptance; callers learn the outcome by
/// polling [`LedgerApi::receipt`].
#[async_trait]
pub trait LedgerApi: Send + Sync {
    async fn submit(&self, tx: SignedTransaction) -> Result<TxHash, ClientError>;

    async fn receipt(&self, tx_hash: &TxHash) -> Result<Option<Receipt>, ClientError>;

    async fn identity(&self, address: &AccountAddress) -> Result<IdentityRecord, ClientError>;

    async fn token_id_of(&self, owner: &AccountAddress) -> Result<TokenId, ClientError>;
}

#[async_trait]
impl<S: StateStore + 'static> LedgerApi for Ledger<S> {
    async fn submit(&self, tx: SignedTransaction) -> Result<TxHash, ClientError> {
        Ok(Ledger::submit(self, &tx)?.tx_hash)
    }

    async fn receipt(&self, tx_hash: &TxHash) -> Result<Option<Receipt>, ClientError> {
        Ok(Ledger::receipt(self, tx_hash)?)
    }

    async fn identity(&self, address: &AccountAddress) -> Result<IdentityRecord, ClientError> {
        Ok(Ledger::identity(self, address)?)
    }

    async fn token_id_of(&self, owner: &AccountAddress) -> Result<TokenId, ClientError> {
        Ok(Ledger::token_id_of(self, owner)?)
    }
}

#[async_trait]
impl<L: LedgerApi + ?Sized> LedgerApi for Arc<L> {
    async fn submit(&self, tx: SignedTransaction) -> Result<TxHash, ClientError> {
        (**self).submit(tx).await
    }

    async fn receipt(&self, tx_hash: &TxHash) -> Result<Option<Receipt>, ClientError> {
        (**self).receipt(tx_hash).await
    }

    async fn identity(&self, address: &AccountAddress) -> Result<IdentityRecord, ClientError> {
        (**self).identity(address).await
    }

    async fn token_id_of(&self, owner: &AccountAddress) -> Result<TokenId, ClientError> {
        (**self).token_id_of(owner).await
    }
}
