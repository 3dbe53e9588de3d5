//! Domain events and transaction receipts.

use serde::{Deserialize, Serialize};

use crate::{AccountAddress, ContentId, Timestamp, TokenId, TxHash};

/// Events emitted by registry and badge transitions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainEvent {
    IdentityRegistered {
        owner: AccountAddress,
    },
    IdentityVerified {
        owner: AccountAddress,
        token_id: TokenId,
    },
    IdentityRevoked {
        owner: AccountAddress,
        /// The badge burned by this revocation, if the identity was verified.
        burned: Option<TokenId>,
    },
    ProofUpdated {
        owner: AccountAddress,
        content_id: ContentId,
    },
    BadgeMinted {
        owner: AccountAddress,
        token_id: TokenId,
    },
    BadgeBurned {
        owner: AccountAddress,
        token_id: TokenId,
    },
}

impl DomainEvent {
    /// The account this event concerns.
    pub fn subject(&self) -> &AccountAddress {
        match self {
            Self::IdentityRegistered { owner }
            | Self::IdentityVerified { owner, .. }
            | Self::IdentityRevoked { owner, .. }
            | Self::ProofUpdated { owner, .. }
            | Self::BadgeMinted { owner, .. }
            | Self::BadgeBurned { owner, .. } => owner,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::IdentityRegistered { .. } => "IdentityRegistered",
            Self::IdentityVerified { .. } => "IdentityVerified",
            Self::IdentityRevoked { .. } => "IdentityRevoked",
            Self::ProofUpdated { .. } => "ProofUpdated",
            Self::BadgeMinted { .. } => "BadgeMinted",
            Self::BadgeBurned { .. } => "BadgeBurned",
        }
    }
}

/// An event with its position in the global event log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencedEvent {
    pub sequence: u64,
    pub tx_hash: TxHash,
    pub event: DomainEvent,
}

/// Proof that a transaction was applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub tx_hash: TxHash,
    /// Position of the transaction in the ledger's total order.
    pub sequence: u64,
    pub sender: AccountAddress,
    pub events: Vec<DomainEvent>,
    pub confirmed_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_json_is_readable() {
        let owner = AccountAddress::new([0x11; 20]);
        let receipt = Receipt {
            tx_hash: TxHash::new([0x22; 32]),
            sequence: 3,
            sender: owner,
            events: vec![DomainEvent::IdentityRegistered { owner }],
            confirmed_at: Timestamp::new(1_700_000_000),
        };

        let json: serde_json::Value = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["tx_hash"], "22".repeat(32));
        assert_eq!(json["sender"], format!("0x{}", "11".repeat(20)));
        assert_eq!(
            json["events"][0]["IdentityRegistered"]["owner"],
            format!("0x{}", "11".repeat(20))
        );
        assert_eq!(serde_json::from_value::<Receipt>(json).unwrap(), receipt);
    }
}
