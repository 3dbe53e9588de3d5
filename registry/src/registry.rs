//! Registry transitions and reads.

use dims_badge::BadgeIssuer;
use dims_store::{IdentityRecord, IdentityStore, Overlay, StateView, VerifiedIndexStore};
use dims_types::{
    AccountAddress, ContentId, DomainEvent, FileHash, IdentityStatus, RegistryParams, TokenId,
};

use crate::validation;
use crate::{RegistryError, TxContext};

/// The fields a registrant submits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub content_id: ContentId,
    pub file_hash: FileHash,
}

/// The identity registry contract.
///
/// `admin` is the single account allowed to verify and revoke. The registry
/// mints and burns through `badges` under its own contract address, which
/// must be the issuer's minter.
#[derive(Clone, Debug)]
pub struct IdentityRegistry {
    address: AccountAddress,
    admin: AccountAddress,
    params: RegistryParams,
    badges: BadgeIssuer,
}

impl IdentityRegistry {
    pub fn new(
        address: AccountAddress,
        admin: AccountAddress,
        params: RegistryParams,
        badges: BadgeIssuer,
    ) -> Self {
        Self {
            address,
            admin,
            params,
            badges,
        }
    }

    pub fn address(&self) -> AccountAddress {
        self.address
    }

    pub fn admin(&self) -> AccountAddress {
        self.admin
    }

    pub fn params(&self) -> &RegistryParams {
        &self.params
    }

    pub fn badges(&self) -> &BadgeIssuer {
        &self.badges
    }

    // ── Transitions ─────────────────────────────────────────────────────

    /// Register the sender's identity.
    ///
    /// Allowed from Unregistered or Revoked. A Revoked address registers
    /// afresh and may commit to a new file hash.
    pub fn register<S: StateView + ?Sized>(
        &self,
        overlay: &mut Overlay<'_, S>,
        ctx: &TxContext,
        registration: &Registration,
    ) -> Result<(), RegistryError> {
        let fields = validation::registration(
            &self.params,
            &registration.name,
            &registration.email,
            &registration.content_id,
            &registration.file_hash,
        )?;

        let owner = ctx.sender;
        let previous = overlay.get_identity(&owner)?;
        let registrations = match &previous {
            None => 1,
            Some(record) => match record.status {
                IdentityStatus::Pending => return Err(RegistryError::AlreadyPending(owner)),
                IdentityStatus::Verified => return Err(RegistryError::AlreadyVerified(owner)),
                IdentityStatus::Revoked | IdentityStatus::Unregistered => {
                    record.registrations.saturating_add(1)
                }
            },
        };

        overlay.put_identity(IdentityRecord {
            owner,
            name: fields.name,
            email: fields.email,
            content_id: registration.content_id.clone(),
            file_hash: registration.file_hash,
            status: IdentityStatus::Pending,
            registered_at: ctx.now,
            verified_at: None,
            revoked_at: None,
            registrations,
        });
        overlay.emit(DomainEvent::IdentityRegistered { owner });

        tracing::debug!(%owner, registrations, "identity registered");
        Ok(())
    }

    /// Verify a pending identity and mint its badge.
    pub fn verify<S: StateView + ?Sized>(
        &self,
        overlay: &mut Overlay<'_, S>,
        ctx: &TxContext,
        target: AccountAddress,
    ) -> Result<TokenId, RegistryError> {
        self.ensure_admin(&ctx.sender, "verify")?;
        let mut record = self.existing(overlay, &target)?;
        if record.status != IdentityStatus::Pending {
            return Err(RegistryError::InvalidState {
                address: target,
                expected: "pending",
                actual: record.status,
            });
        }

        let uri = self.params.metadata_uri(&record.content_id);
        let token_id = self
            .badges
            .mint(overlay, &self.address, target, uri, ctx.now)?;

        record.status = IdentityStatus::Verified;
        record.verified_at = Some(ctx.now);
        overlay.put_identity(record);
        overlay.append_verified(target)?;
        overlay.emit(DomainEvent::IdentityVerified {
            owner: target,
            token_id,
        });

        tracing::debug!(%target, %token_id, "identity verified");
        Ok(token_id)
    }

    /// Revoke a pending or verified identity, burning its badge if it has one.
    pub fn revoke<S: StateView + ?Sized>(
        &self,
        overlay: &mut Overlay<'_, S>,
        ctx: &TxContext,
        target: AccountAddress,
    ) -> Result<Option<TokenId>, RegistryError> {
        self.ensure_admin(&ctx.sender, "revoke")?;
        let mut record = self.existing(overlay, &target)?;
        if !record.status.can_revoke() {
            return Err(RegistryError::InvalidState {
                address: target,
                expected: "pending or verified",
                actual: record.status,
            });
        }

        let burned = if record.status.holds_badge() {
            let burned = self.badges.burn(overlay, &self.address, target)?;
            if burned.is_none() {
                tracing::warn!(%target, "verified identity had no badge to burn");
            }
            burned
        } else {
            None
        };

        record.status = IdentityStatus::Revoked;
        record.revoked_at = Some(ctx.now);
        overlay.put_identity(record);
        overlay.emit(DomainEvent::IdentityRevoked {
            owner: target,
            burned,
        });

        tracing::debug!(%target, ?burned, "identity revoked");
        Ok(burned)
    }

    /// Re-point a pending identity at a new proof blob.
    ///
    /// The file hash commitment is unchanged, so the new blob must still hash
    /// to it for a later review to pass.
    pub fn update_proof<S: StateView + ?Sized>(
        &self,
        overlay: &mut Overlay<'_, S>,
        ctx: &TxContext,
        target: AccountAddress,
        content_id: &ContentId,
    ) -> Result<(), RegistryError> {
        validation::content_id(content_id)?;
        if ctx.sender != target && ctx.sender != self.admin {
            return Err(RegistryError::Unauthorized {
                caller: ctx.sender,
                action: "update another identity's proof",
            });
        }
        let mut record = self.existing(overlay, &target)?;
        if record.status != IdentityStatus::Pending {
            return Err(RegistryError::InvalidState {
                address: target,
                expected: "pending",
                actual: record.status,
            });
        }

        record.content_id = content_id.clone();
        overlay.put_identity(record);
        overlay.emit(DomainEvent::ProofUpdated {
            owner: target,
            content_id: content_id.clone(),
        });
        Ok(())
    }

    // ── Reads ───────────────────────────────────────────────────────────

    /// The record for `address`, or `NotFound` if it never registered.
    pub fn get_identity<S: IdentityStore + ?Sized>(
        &self,
        store: &S,
        address: &AccountAddress,
    ) -> Result<IdentityRecord, RegistryError> {
        store
            .get_identity(address)?
            .ok_or(RegistryError::NotFound(*address))
    }

    /// Status of `address`, `Unregistered` when no record exists.
    pub fn status_of<S: IdentityStore + ?Sized>(
        &self,
        store: &S,
        address: &AccountAddress,
    ) -> Result<IdentityStatus, RegistryError> {
        Ok(store
            .get_identity(address)?
            .map_or(IdentityStatus::Unregistered, |r| r.status))
    }

    /// Every address ever verified, in order of first verification.
    pub fn get_verified_users<S: VerifiedIndexStore + ?Sized>(
        &self,
        store: &S,
    ) -> Result<Vec<AccountAddress>, RegistryError> {
        Ok(store.verified_users()?)
    }

    /// The verified index filtered to identities that are Verified now.
    pub fn currently_verified_users<S: StateView + ?Sized>(
        &self,
        store: &S,
    ) -> Result<Vec<AccountAddress>, RegistryError> {
        let mut current = Vec::new();
        for address in store.verified_users()? {
            if self.status_of(store, &address)? == IdentityStatus::Verified {
                current.push(address);
            }
        }
        Ok(current)
    }

    fn existing<S: StateView + ?Sized>(
        &self,
        overlay: &Overlay<'_, S>,
        target: &AccountAddress,
    ) -> Result<IdentityRecord, RegistryError> {
        overlay
            .get_identity(target)?
            .ok_or(RegistryError::NotFound(*target))
    }

    fn ensure_admin(
        &self,
        caller: &AccountAddress,
        action: &'static str,
    ) -> Result<(), RegistryError> {
        if *caller != self.admin {
            return Err(RegistryError::Unauthorized {
                caller: *caller,
                action,
            });
        }
        Ok(())
    }
}
