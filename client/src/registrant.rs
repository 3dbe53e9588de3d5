use dims_content::ContentStore;
use dims_crypto::file_hash;
use dims_integrity::IntegrityError;
use dims_store::IdentityRecord;
use dims_transactions::Call;
use dims_types::{AccountAddress, Receipt, TokenId};

use crate::{submit_and_confirm, ClientConfig, ClientError, LedgerApi, Signer};

/// Workflows for a registrant managing their own identity.
pub struct IdentityClient<L, C> {
    ledger: L,
    content: C,
    signer: Signer,
    config: ClientConfig,
}

impl<L: LedgerApi, C: ContentStore> IdentityClient<L, C> {
    pub fn new(ledger: L, content: C, signer: Signer, config: ClientConfig) -> Self {
        Self {
            ledger,
            content,
            signer,
            config,
        }
    }

    pub fn address(&self) -> AccountAddress {
        self.signer.address()
    }

    /// Hash `proof`, store it, and register the commitment under this
    /// account.
    ///
    /// The proof is stored before anything is submitted, so a content store
    /// failure leaves the ledger untouched.
    pub async fn register_identity(
        &self,
        name: &str,
        email: &str,
        proof: &[u8],
    ) -> Result<Receipt, ClientError> {
        let hash = file_hash(proof);
        let content_id = self.content.put(proof).await?;
        tracing::info!(
            address = %self.address(),
            %content_id,
            file_hash = %hash,
            backend = self.content.name(),
            "stored identity proof"
        );

        let call = Call::Register {
            name: name.to_string(),
            email: email.to_string(),
            content_id,
            file_hash: hash,
        };
        self.send(call).await
    }

    /// Re-store `proof` and point the record at the new content id.
    ///
    /// The commitment cannot change, so `proof` must hash to the registered
    /// file hash. Nothing is stored or submitted otherwise.
    pub async fn update_proof(&self, proof: &[u8]) -> Result<Receipt, ClientError> {
        let record = self.identity().await?;
        let computed = file_hash(proof);
        if computed != record.file_hash {
            return Err(IntegrityError::Mismatch {
                expected: record.file_hash,
                computed,
            }
            .into());
        }

        let content_id = self.content.put(proof).await?;
        let call = Call::UpdateProof {
            target: self.address(),
            content_id,
        };
        self.send(call).await
    }

    /// This account's identity record.
    pub async fn identity(&self) -> Result<IdentityRecord, ClientError> {
        self.ledger.identity(&self.address()).await
    }

    /// The badge minted to this account once verified.
    pub async fn badge(&self) -> Result<TokenId, ClientError> {
        self.ledger.token_id_of(&self.address()).await
    }

    async fn send(&self, call: Call) -> Result<Receipt, ClientError> {
        submit_and_confirm(&self.ledger, &self.signer, call, &self.config).await
    }
}
