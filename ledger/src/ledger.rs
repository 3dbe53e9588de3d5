//! Transaction submission and state queries.

use std::sync::{Arc, Mutex, RwLock};

use dims_registry::{IdentityRegistry, Registration, RegistryError, TxContext};
use dims_store::{IdentityRecord, Overlay, StateStore};
use dims_transactions::{Call, SignedTransaction};
use dims_types::{
    AccountAddress, Clock, IdentityStatus, Receipt, SequencedEvent, TokenId, TxHash,
};

use crate::event_bus::EventBus;
use crate::genesis::{Deployment, GenesisConfig};
use crate::LedgerError;

/// Upper bound on one page of [`Ledger::events_since`].
pub const MAX_EVENT_PAGE: usize = 1_000;

/// The ledger over a state store `S`.
///
/// Writes are serialized by an internal lock, giving every applied
/// transaction a position in one total order. Reads go straight to the
/// store and may run concurrently with a write; they observe either the
/// state before or after it.
pub struct Ledger<S: StateStore> {
    store: S,
    deployment: Deployment,
    registry: IdentityRegistry,
    clock: Arc<dyn Clock>,
    bus: RwLock<EventBus>,
    write_lock: Mutex<()>,
}

impl<S: StateStore> Ledger<S> {
    /// Open a ledger, deploying the contracts on first use.
    ///
    /// Fails with [`LedgerError::GenesisMismatch`] if the store was deployed
    /// for a different admin.
    pub fn open(
        store: S,
        genesis: &GenesisConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, LedgerError> {
        let deployment = match Deployment::load(&store)? {
            Some(existing) => {
                existing.ensure_matches(genesis)?;
                existing
            }
            None => {
                let deployment = Deployment::new(genesis, clock.now());
                deployment.save(&store)?;
                tracing::info!(
                    admin = %deployment.admin,
                    registry = %deployment.registry,
                    badge = %deployment.badge,
                    "deployed identity registry"
                );
                deployment
            }
        };
        Ok(Self::with_deployment(store, deployment, clock))
    }

    /// Open a ledger that has already been deployed.
    pub fn open_existing(store: S, clock: Arc<dyn Clock>) -> Result<Self, LedgerError> {
        let deployment = Deployment::load(&store)?.ok_or(LedgerError::NotDeployed)?;
        Ok(Self::with_deployment(store, deployment, clock))
    }

    fn with_deployment(store: S, deployment: Deployment, clock: Arc<dyn Clock>) -> Self {
        let registry = deployment.registry();
        Self {
            store,
            deployment,
            registry,
            clock,
            bus: RwLock::new(EventBus::new()),
            write_lock: Mutex::new(()),
        }
    }

    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    pub fn registry(&self) -> &IdentityRegistry {
        &self.registry
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Register a listener for committed events.
    ///
    /// Listeners run on the submitting thread after the write lock is
    /// released, so they may submit transactions themselves. Events of one
    /// transaction arrive in order; across concurrent submitters, order by
    /// [`SequencedEvent::sequence`].
    pub fn subscribe(
        &self,
        listener: Box<dyn Fn(&SequencedEvent) + Send + Sync>,
    ) -> Result<(), LedgerError> {
        self.bus
            .write()
            .map_err(|_| LedgerError::LockPoisoned)?
            .subscribe(listener);
        Ok(())
    }

    /// Authenticate, apply and commit one transaction.
    ///
    /// On any error nothing is written and no receipt is issued.
    pub fn submit(&self, tx: &SignedTransaction) -> Result<Receipt, LedgerError> {
        let function = tx.call().function();
        let (tx_hash, sender) = tx.authenticate().map_err(|e| {
            tracing::warn!(function, error = %e, "rejected unauthenticated transaction");
            LedgerError::InvalidSignature(e.to_string())
        })?;

        let guard = self.write_lock.lock().map_err(|_| LedgerError::LockPoisoned)?;

        if self.store.get_receipt(&tx_hash)?.is_some() {
            tracing::warn!(%tx_hash, %sender, function, "rejected duplicate transaction");
            return Err(LedgerError::DuplicateTransaction(tx_hash));
        }

        let now = self.clock.now();
        let ctx = TxContext::new(sender, now);
        let mut overlay = Overlay::new(&self.store);
        if let Err(e) = self.dispatch(&mut overlay, &ctx, tx.call()) {
            tracing::warn!(
                %tx_hash,
                %sender,
                function,
                kind = %e.kind(),
                error = %e,
                "transaction rejected"
            );
            return Err(e.into());
        }

        let sequence = self.store.transaction_count()?;
        let first_event = self.store.event_count()?;
        let receipt = Receipt {
            tx_hash,
            sequence,
            sender,
            events: overlay.events().to_vec(),
            confirmed_at: now,
        };
        overlay.set_receipt(receipt.clone());
        let writes = overlay.into_writes();
        self.store.commit(&writes)?;

        tracing::info!(
            %tx_hash,
            %sender,
            function,
            sequence,
            events = receipt.events.len(),
            "transaction applied"
        );

        drop(guard);

        let bus = self.bus.read().map_err(|_| LedgerError::LockPoisoned)?;
        for (offset, event) in receipt.events.iter().enumerate() {
            bus.emit(&SequencedEvent {
                sequence: first_event + offset as u64,
                tx_hash,
                event: event.clone(),
            });
        }
        Ok(receipt)
    }

    fn dispatch(
        &self,
        overlay: &mut Overlay<'_, S>,
        ctx: &TxContext,
        call: &Call,
    ) -> Result<(), RegistryError> {
        match call {
            Call::Register {
                name,
                email,
                content_id,
                file_hash,
            } => self.registry.register(
                overlay,
                ctx,
                &Registration {
                    name: name.clone(),
                    email: email.clone(),
                    content_id: content_id.clone(),
                    file_hash: *file_hash,
                },
            ),
            Call::Verify { target } => self.registry.verify(overlay, ctx, *target).map(|_| ()),
            Call::Revoke { target } => self.registry.revoke(overlay, ctx, *target).map(|_| ()),
            Call::UpdateProof { target, content_id } => {
                self.registry.update_proof(overlay, ctx, *target, content_id)
            }
        }
    }

    // ── Registry reads ──────────────────────────────────────────────────

    pub fn identity(&self, address: &AccountAddress) -> Result<IdentityRecord, LedgerError> {
        Ok(self.registry.get_identity(&self.store, address)?)
    }

    pub fn status_of(&self, address: &AccountAddress) -> Result<IdentityStatus, LedgerError> {
        Ok(self.registry.status_of(&self.store, address)?)
    }

    pub fn verified_users(&self) -> Result<Vec<AccountAddress>, LedgerError> {
        Ok(self.registry.get_verified_users(&self.store)?)
    }

    pub fn currently_verified_users(&self) -> Result<Vec<AccountAddress>, LedgerError> {
        Ok(self.registry.currently_verified_users(&self.store)?)
    }

    // ── Badge reads ─────────────────────────────────────────────────────

    pub fn owner_of(&self, token_id: TokenId) -> Result<AccountAddress, LedgerError> {
        Ok(self.registry.badges().owner_of(&self.store, token_id)?)
    }

    pub fn token_uri(&self, token_id: TokenId) -> Result<String, LedgerError> {
        Ok(self.registry.badges().token_uri(&self.store, token_id)?)
    }

    pub fn token_id_of(&self, owner: &AccountAddress) -> Result<TokenId, LedgerError> {
        Ok(self.registry.badges().token_id_of(&self.store, owner)?)
    }

    pub fn balance_of(&self, owner: &AccountAddress) -> Result<u64, LedgerError> {
        Ok(self.registry.badges().balance_of(&self.store, owner)?)
    }

    pub fn total_supply(&self) -> Result<u64, LedgerError> {
        Ok(self.registry.badges().total_supply(&self.store)?)
    }

    pub fn token_counter(&self) -> Result<u64, LedgerError> {
        Ok(self.registry.badges().token_counter(&self.store)?)
    }

    // ── Log reads ───────────────────────────────────────────────────────

    pub fn receipt(&self, tx_hash: &TxHash) -> Result<Option<Receipt>, LedgerError> {
        Ok(self.store.get_receipt(tx_hash)?)
    }

    /// Up to `limit` events from sequence `from`, capped at
    /// [`MAX_EVENT_PAGE`].
    pub fn events_since(
        &self,
        from: u64,
        limit: usize,
    ) -> Result<Vec<SequencedEvent>, LedgerError> {
        Ok(self.store.events_since(from, limit.min(MAX_EVENT_PAGE))?)
    }

    pub fn transaction_count(&self) -> Result<u64, LedgerError> {
        Ok(self.store.transaction_count()?)
    }
}
