//! Deployment of the registry and badge contracts.
//!
//! A ledger is bound to one deployment for its lifetime. The first open
//! derives the contract addresses from the admin and persists the
//! [`Deployment`] in the meta store; later opens must agree with it.

use serde::{Deserialize, Serialize};

use dims_badge::BadgeIssuer;
use dims_crypto::contract_address;
use dims_registry::IdentityRegistry;
use dims_store::MetaStore;
use dims_types::{AccountAddress, RegistryParams, Timestamp};

use crate::LedgerError;

/// Meta key holding the bincode-encoded [`Deployment`].
pub const DEPLOYMENT_KEY: &str = "deployment";

const REGISTRY_LABEL: &str = "identity-registry";
const BADGE_LABEL: &str = "identity-badge";

/// Configuration for a fresh deployment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenesisConfig {
    /// The single account holding the admin capability.
    pub admin: AccountAddress,
    pub params: RegistryParams,
}

impl GenesisConfig {
    pub fn new(admin: AccountAddress) -> Self {
        Self {
            admin,
            params: RegistryParams::default(),
        }
    }
}

/// The persisted outcome of genesis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    pub admin: AccountAddress,
    pub registry: AccountAddress,
    pub badge: AccountAddress,
    pub params: RegistryParams,
    pub deployed_at: Timestamp,
}

impl Deployment {
    pub fn new(config: &GenesisConfig, deployed_at: Timestamp) -> Self {
        Self {
            admin: config.admin,
            registry: contract_address(REGISTRY_LABEL, &config.admin),
            badge: contract_address(BADGE_LABEL, &config.admin),
            params: config.params.clone(),
            deployed_at,
        }
    }

    /// Build the contracts this deployment describes.
    pub fn registry(&self) -> IdentityRegistry {
        let badges = BadgeIssuer::new(self.badge, self.registry, &self.params);
        IdentityRegistry::new(self.registry, self.admin, self.params.clone(), badges)
    }

    pub fn load(store: &(impl MetaStore + ?Sized)) -> Result<Option<Self>, LedgerError> {
        match store.get_meta(DEPLOYMENT_KEY)? {
            None => Ok(None),
            Some(bytes) => bincode::deserialize(&bytes)
                .map(Some)
                .map_err(|e| LedgerError::CorruptDeployment(e.to_string())),
        }
    }

    pub fn save(&self, store: &(impl MetaStore + ?Sized)) -> Result<(), LedgerError> {
        let bytes =
            bincode::serialize(self).map_err(|e| LedgerError::CorruptDeployment(e.to_string()))?;
        store.put_meta(DEPLOYMENT_KEY, &bytes)?;
        Ok(())
    }

    /// Check that a stored deployment matches the requested genesis.
    pub fn ensure_matches(&self, config: &GenesisConfig) -> Result<(), LedgerError> {
        if self.admin != config.admin {
            return Err(LedgerError::GenesisMismatch {
                stored: self.admin,
                requested: config.admin,
            });
        }
        if self.params != config.params {
            return Err(LedgerError::ParamsMismatch);
        }
        Ok(())
    }
}
