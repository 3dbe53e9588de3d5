use dims_content::ContentStore;
use dims_integrity::{IntegrityChecker, IntegrityOutcome};
use dims_transactions::Call;
use dims_types::{AccountAddress, Receipt, TokenId};

use crate::{submit_and_confirm, ClientConfig, ClientError, LedgerApi, Signer};

/// Workflows for the registry admin.
pub struct AdminClient<L, C> {
    ledger: L,
    checker: IntegrityChecker<C>,
    signer: Signer,
    config: ClientConfig,
}

impl<L: LedgerApi, C: ContentStore> AdminClient<L, C> {
    pub fn new(ledger: L, content: C, signer: Signer, config: ClientConfig) -> Self {
        Self {
            ledger,
            checker: IntegrityChecker::new(content),
            signer,
            config,
        }
    }

    pub fn address(&self) -> AccountAddress {
        self.signer.address()
    }

    /// Check the proof behind `target`'s record against its commitment.
    pub async fn review(&self, target: &AccountAddress) -> Result<IntegrityOutcome, ClientError> {
        let record = self.ledger.identity(target).await?;
        let outcome = self
            .checker
            .verify_content(&record.content_id, &record.file_hash)
            .await;
        tracing::info!(
            %target,
            content_id = %record.content_id,
            status = %record.status,
            matched = outcome.is_match(),
            "reviewed identity proof"
        );
        Ok(outcome)
    }

    /// Verify `target` only if its proof matches the commitment.
    ///
    /// A mismatch or an unreachable content store fails before anything is
    /// submitted.
    pub async fn verify_reviewed(&self, target: AccountAddress) -> Result<Receipt, ClientError> {
        self.review(&target).await?.into_result()?;
        self.send(Call::Verify { target }).await
    }

    /// Verify `target` without fetching its proof.
    pub async fn verify_unchecked(&self, target: AccountAddress) -> Result<Receipt, ClientError> {
        tracing::warn!(%target, "verifying identity without proof review");
        self.send(Call::Verify { target }).await
    }

    pub async fn revoke(&self, target: AccountAddress) -> Result<Receipt, ClientError> {
        self.send(Call::Revoke { target }).await
    }

    /// The badge held by `owner`, `NotFound` if there is none.
    pub async fn badge_of(&self, owner: &AccountAddress) -> Result<TokenId, ClientError> {
        self.ledger.token_id_of(owner).await
    }

    async fn send(&self, call: Call) -> Result<Receipt, ClientError> {
        submit_and_confirm(&self.ledger, &self.signer, call, &self.config).await
    }
}
