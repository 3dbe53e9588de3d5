//! Badge minting, burning and queries.

use dims_store::{BadgeStore, BadgeToken, Overlay, StateView};
use dims_types::{AccountAddress, DomainEvent, RegistryParams, Timestamp, TokenId};

use crate::BadgeError;

/// Upper bound on a badge metadata URI, in bytes.
pub const MAX_METADATA_URI_LEN: usize = 256;

/// The badge contract: one live token per owner, ids from a counter that is
/// never rewound.
#[derive(Clone, Debug)]
pub struct BadgeIssuer {
    address: AccountAddress,
    /// The only account allowed to mint and burn.
    minter: AccountAddress,
    name: String,
    symbol: String,
}

impl BadgeIssuer {
    pub fn new(address: AccountAddress, minter: AccountAddress, params: &RegistryParams) -> Self {
        Self {
            address,
            minter,
            name: params.badge_name.clone(),
            symbol: params.badge_symbol.clone(),
        }
    }

    pub fn address(&self) -> AccountAddress {
        self.address
    }

    pub fn minter(&self) -> AccountAddress {
        self.minter
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Mint a badge for `owner`, staging the token, its owner index entry and
    /// the advanced counter in `overlay`.
    pub fn mint<S: StateView + ?Sized>(
        &self,
        overlay: &mut Overlay<'_, S>,
        caller: &AccountAddress,
        owner: AccountAddress,
        metadata_uri: String,
        now: Timestamp,
    ) -> Result<TokenId, BadgeError> {
        self.ensure_minter(caller)?;
        if metadata_uri.is_empty() || metadata_uri.len() > MAX_METADATA_URI_LEN {
            return Err(BadgeError::InvalidMetadata(format!(
                "metadata uri must be 1..={MAX_METADATA_URI_LEN} bytes, got {}",
                metadata_uri.len()
            )));
        }
        if let Some(token_id) = overlay.badge_of_owner(&owner)? {
            return Err(BadgeError::DuplicateBadge { owner, token_id });
        }

        let counter = overlay.token_counter()?;
        let token_id = TokenId::new(counter);
        let next = counter.checked_add(1).ok_or(BadgeError::CounterOverflow)?;

        overlay.put_badge(BadgeToken {
            token_id,
            owner,
            metadata_uri,
            minted_at: now,
        });
        overlay.set_token_counter(next);
        overlay.emit(DomainEvent::BadgeMinted { owner, token_id });

        tracing::debug!(%owner, %token_id, "badge minted");
        Ok(token_id)
    }

    /// Burn the badge held by `owner`.
    ///
    /// Returns `Ok(None)` without staging anything when the owner holds no
    /// badge.
    pub fn burn<S: StateView + ?Sized>(
        &self,
        overlay: &mut Overlay<'_, S>,
        caller: &AccountAddress,
        owner: AccountAddress,
    ) -> Result<Option<TokenId>, BadgeError> {
        self.ensure_minter(caller)?;
        let Some(token_id) = overlay.badge_of_owner(&owner)? else {
            return Ok(None);
        };
        overlay.remove_badge(token_id, owner);
        overlay.emit(DomainEvent::BadgeBurned { owner, token_id });

        tracing::debug!(%owner, %token_id, "badge burned");
        Ok(Some(token_id))
    }

    pub fn owner_of<S: BadgeStore + ?Sized>(
        &self,
        store: &S,
        token_id: TokenId,
    ) -> Result<AccountAddress, BadgeError> {
        self.badge(store, token_id).map(|b| b.owner)
    }

    pub fn token_uri<S: BadgeStore + ?Sized>(
        &self,
        store: &S,
        token_id: TokenId,
    ) -> Result<String, BadgeError> {
        self.badge(store, token_id).map(|b| b.metadata_uri)
    }

    pub fn badge<S: BadgeStore + ?Sized>(
        &self,
        store: &S,
        token_id: TokenId,
    ) -> Result<BadgeToken, BadgeError> {
        store
            .get_badge(token_id)?
            .ok_or(BadgeError::TokenNotFound(token_id))
    }

    /// Reverse lookup through the owner index.
    pub fn token_id_of<S: BadgeStore + ?Sized>(
        &self,
        store: &S,
        owner: &AccountAddress,
    ) -> Result<TokenId, BadgeError> {
        store
            .badge_of_owner(owner)?
            .ok_or(BadgeError::NoBadge(*owner))
    }

    /// `1` if `owner` holds a badge, otherwise `0`.
    pub fn balance_of<S: BadgeStore + ?Sized>(
        &self,
        store: &S,
        owner: &AccountAddress,
    ) -> Result<u64, BadgeError> {
        Ok(u64::from(store.badge_of_owner(owner)?.is_some()))
    }

    /// Number of live badges.
    pub fn total_supply<S: BadgeStore + ?Sized>(&self, store: &S) -> Result<u64, BadgeError> {
        Ok(store.live_badge_count()?)
    }

    /// Number of token ids ever allocated.
    pub fn token_counter<S: BadgeStore + ?Sized>(&self, store: &S) -> Result<u64, BadgeError> {
        Ok(store.token_counter()?)
    }

    fn ensure_minter(&self, caller: &AccountAddress) -> Result<(), BadgeError> {
        if *caller != self.minter {
            return Err(BadgeError::UnauthorizedMinter { caller: *caller });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dims_nullables::NullStore;
    use dims_store::StateStore;
    use dims_types::ErrorKind;

    const REGISTRY: AccountAddress = AccountAddress::new([0xEE; 20]);

    fn issuer() -> BadgeIssuer {
        BadgeIssuer::new(
            AccountAddress::new([0xBA; 20]),
            REGISTRY,
            &RegistryParams::default(),
        )
    }

    fn addr(b: u8) -> AccountAddress {
        AccountAddress::new([b; 20])
    }

    fn mint_committed(store: &NullStore, issuer: &BadgeIssuer, owner: AccountAddress) -> TokenId {
        let mut overlay = Overlay::new(store);
        let id = issuer
            .mint(&mut overlay, &REGISTRY, owner, "ipfs://cid".into(), Timestamp::new(5))
            .unwrap();
        let writes = overlay.into_writes();
        store.commit(&writes).unwrap();
        id
    }

    #[test]
    fn collection_metadata() {
        let issuer = issuer();
        assert_eq!(issuer.name(), "IdentityBadge");
        assert_eq!(issuer.symbol(), "IDB");
    }

    #[test]
    fn first_token_is_zero_and_ids_are_sequential() {
        let store = NullStore::new();
        let issuer = issuer();
        assert_eq!(mint_committed(&store, &issuer, addr(1)), TokenId::new(0));
        assert_eq!(mint_committed(&store, &issuer, addr(2)), TokenId::new(1));
        assert_eq!(issuer.owner_of(&store, TokenId::new(1)).unwrap(), addr(2));
        assert_eq!(issuer.token_uri(&store, TokenId::new(0)).unwrap(), "ipfs://cid");
        assert_eq!(issuer.total_supply(&store).unwrap(), 2);
    }

    #[test]
    fn duplicate_badge_is_rejected() {
        let store = NullStore::new();
        let issuer = issuer();
        mint_committed(&store, &issuer, addr(1));

        let mut overlay = Overlay::new(&store);
        let err = issuer
            .mint(&mut overlay, &REGISTRY, addr(1), "ipfs://cid".into(), Timestamp::new(6))
            .unwrap_err();
        assert!(matches!(err, BadgeError::DuplicateBadge { token_id, .. } if token_id == TokenId::FIRST));
        assert_eq!(err.kind(), ErrorKind::StateConflict);
    }

    #[test]
    fn only_the_registry_may_mint_or_burn() {
        let store = NullStore::new();
        let issuer = issuer();
        let mut overlay = Overlay::new(&store);
        let err = issuer
            .mint(&mut overlay, &addr(9), addr(1), "ipfs://cid".into(), Timestamp::new(1))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert!(issuer.burn(&mut overlay, &addr(9), addr(1)).is_err());
        assert!(overlay.into_writes().is_empty());
    }

    #[test]
    fn empty_metadata_is_rejected() {
        let store = NullStore::new();
        let mut overlay = Overlay::new(&store);
        let err = issuer()
            .mint(&mut overlay, &REGISTRY, addr(1), String::new(), Timestamp::new(1))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn burn_clears_index_and_never_reuses_ids() {
        let store = NullStore::new();
        let issuer = issuer();
        mint_committed(&store, &issuer, addr(1));

        let mut overlay = Overlay::new(&store);
        assert_eq!(
            issuer.burn(&mut overlay, &REGISTRY, addr(1)).unwrap(),
            Some(TokenId::FIRST)
        );
        store.commit(&overlay.into_writes()).unwrap();

        assert_eq!(issuer.balance_of(&store, &addr(1)).unwrap(), 0);
        assert!(matches!(
            issuer.token_id_of(&store, &addr(1)),
            Err(BadgeError::NoBadge(_))
        ));
        assert!(matches!(
            issuer.owner_of(&store, TokenId::FIRST),
            Err(BadgeError::TokenNotFound(_))
        ));
        assert_eq!(issuer.token_counter(&store).unwrap(), 1);

        // Re-minting for the same owner allocates a fresh id.
        assert_eq!(mint_committed(&store, &issuer, addr(1)), TokenId::new(1));
    }

    #[test]
    fn burn_without_badge_is_a_no_op() {
        let store = NullStore::new();
        let mut overlay = Overlay::new(&store);
        assert_eq!(issuer().burn(&mut overlay, &REGISTRY, addr(3)).unwrap(), None);
        assert!(overlay.events().is_empty());
    }
}
