//! End-to-end identity lifecycle through signed transactions.

mod common;

use std::sync::{Arc, Mutex};

use common::{open_ledger, register_call, submit, Account};
use dims_ledger::{GenesisConfig, Ledger, LedgerError};
use dims_nullables::{NullClock, NullStore};
use dims_registry::RegistryError;
use dims_transactions::Call;
use dims_types::{DomainEvent, ErrorKind, IdentityStatus, Signature, TokenId};

#[test]
fn alice_is_verified_then_revoked() {
    let mut admin = Account::from_seed(1);
    let mut alice = Account::from_seed(2);
    let (ledger, clock) = open_ledger(&admin);

    submit(&ledger, &mut alice, register_call("Alice", b"alice proof")).unwrap();
    assert_eq!(ledger.identity(&alice.address).unwrap().status, IdentityStatus::Pending);

    clock.advance(60);
    let receipt = submit(&ledger, &mut admin, Call::Verify { target: alice.address }).unwrap();
    assert_eq!(receipt.sequence, 1);
    assert!(receipt.events.contains(&DomainEvent::IdentityVerified {
        owner: alice.address,
        token_id: TokenId::new(0),
    }));
    assert_eq!(ledger.owner_of(TokenId::new(0)).unwrap(), alice.address);
    assert_eq!(ledger.token_id_of(&alice.address).unwrap(), TokenId::new(0));
    assert_eq!(ledger.token_uri(TokenId::new(0)).unwrap(), "ipfs://cid-alice");
    assert_eq!(ledger.balance_of(&alice.address).unwrap(), 1);
    assert_eq!(ledger.verified_users().unwrap(), vec![alice.address]);

    submit(&ledger, &mut admin, Call::Revoke { target: alice.address }).unwrap();
    let record = ledger.identity(&alice.address).unwrap();
    assert_eq!(record.status, IdentityStatus::Revoked);
    assert_eq!(record.verified_at.map(|t| t.as_secs()), Some(1_700_000_060));
    let err = ledger.token_id_of(&alice.address).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(ledger.total_supply().unwrap(), 0);
    assert_eq!(ledger.token_counter().unwrap(), 1);
}

#[test]
fn verifying_unregistered_bob_fails_without_badge() {
    let mut admin = Account::from_seed(1);
    let bob = Account::from_seed(3);
    let (ledger, _) = open_ledger(&admin);

    let err = submit(&ledger, &mut admin, Call::Verify { target: bob.address }).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Registry(RegistryError::NotFound(a)) if a == bob.address
    ));
    assert_eq!(ledger.total_supply().unwrap(), 0);
    assert_eq!(ledger.transaction_count().unwrap(), 0);
    assert!(ledger.events_since(0, 10).unwrap().is_empty());
}

#[test]
fn non_admin_cannot_verify() {
    let admin = Account::from_seed(1);
    let mut alice = Account::from_seed(2);
    let (ledger, _) = open_ledger(&admin);

    submit(&ledger, &mut alice, register_call("Alice", b"p")).unwrap();
    let target = alice.address;
    let err = submit(&ledger, &mut alice, Call::Verify { target }).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert_eq!(ledger.status_of(&alice.address).unwrap(), IdentityStatus::Pending);
}

#[test]
fn duplicate_transaction_is_rejected() {
    let admin = Account::from_seed(1);
    let mut alice = Account::from_seed(2);
    let (ledger, clock) = open_ledger(&admin);

    let tx = alice.sign(register_call("Alice", b"p"));
    ledger.submit(&tx).unwrap();
    clock.advance(1);
    let err = ledger.submit(&tx).unwrap_err();
    assert!(matches!(err, LedgerError::DuplicateTransaction(_)));
    assert_eq!(err.kind(), ErrorKind::StateConflict);
}

#[test]
fn tampered_signature_is_rejected() {
    let admin = Account::from_seed(1);
    let mut alice = Account::from_seed(2);
    let (ledger, _) = open_ledger(&admin);

    let mut tx = alice.sign(register_call("Alice", b"p"));
    tx.signature = Signature([0u8; 64]);
    assert!(matches!(ledger.submit(&tx), Err(LedgerError::InvalidSignature(_))));
    assert_eq!(ledger.status_of(&alice.address).unwrap(), IdentityStatus::Unregistered);
}

#[test]
fn receipts_are_retrievable_and_ordered() {
    let mut admin = Account::from_seed(1);
    let mut alice = Account::from_seed(2);
    let mut bob = Account::from_seed(3);
    let (ledger, _) = open_ledger(&admin);

    let r1 = submit(&ledger, &mut alice, register_call("Alice", b"a")).unwrap();
    let r2 = submit(&ledger, &mut bob, register_call("Bob", b"b")).unwrap();
    let r3 = submit(&ledger, &mut admin, Call::Verify { target: bob.address }).unwrap();
    assert_eq!((r1.sequence, r2.sequence, r3.sequence), (0, 1, 2));
    assert_eq!(ledger.receipt(&r3.tx_hash).unwrap(), Some(r3.clone()));
    assert_eq!(r3.sender, admin.address);

    let events = ledger.events_since(0, 100).unwrap();
    let names: Vec<_> = events.iter().map(|e| e.event.name()).collect();
    assert_eq!(
        names,
        ["IdentityRegistered", "IdentityRegistered", "BadgeMinted", "IdentityVerified"]
    );
    assert!(events.iter().enumerate().all(|(i, e)| e.sequence == i as u64));
    assert_eq!(events[3].tx_hash, r3.tx_hash);
    assert_eq!(ledger.events_since(3, 100).unwrap().len(), 1);
}

#[test]
fn subscribers_see_committed_events_only() {
    let mut admin = Account::from_seed(1);
    let mut alice = Account::from_seed(2);
    let (ledger, _) = open_ledger(&admin);

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    ledger
        .subscribe(Box::new(move |e| sink.lock().unwrap().push(e.clone())))
        .unwrap();

    submit(&ledger, &mut alice, register_call("Alice", b"a")).unwrap();
    let _ = submit(&ledger, &mut alice, register_call("Alice", b"a"));
    submit(&ledger, &mut admin, Call::Verify { target: alice.address }).unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[2].sequence, 2);
    assert_eq!(*seen, ledger.events_since(0, 10).unwrap());
}

#[test]
fn failed_commit_leaves_no_trace() {
    let mut admin = Account::from_seed(1);
    let mut alice = Account::from_seed(2);
    let (ledger, _) = open_ledger(&admin);
    submit(&ledger, &mut alice, register_call("Alice", b"a")).unwrap();

    ledger.store().fail_commits(true);
    let err = submit(&ledger, &mut admin, Call::Verify { target: alice.address }).unwrap_err();
    assert!(matches!(err, LedgerError::Storage(_)));
    ledger.store().fail_commits(false);

    assert_eq!(ledger.status_of(&alice.address).unwrap(), IdentityStatus::Pending);
    assert_eq!(ledger.total_supply().unwrap(), 0);
    assert_eq!(ledger.token_counter().unwrap(), 0);
    assert!(ledger.verified_users().unwrap().is_empty());
}

#[test]
fn currently_verified_filters_revoked() {
    let mut admin = Account::from_seed(1);
    let mut alice = Account::from_seed(2);
    let mut bob = Account::from_seed(3);
    let (ledger, _) = open_ledger(&admin);

    for (account, name) in [(&mut alice, "Alice"), (&mut bob, "Bob")] {
        submit(&ledger, account, register_call(name, name.as_bytes())).unwrap();
    }
    submit(&ledger, &mut admin, Call::Verify { target: alice.address }).unwrap();
    submit(&ledger, &mut admin, Call::Verify { target: bob.address }).unwrap();
    submit(&ledger, &mut admin, Call::Revoke { target: alice.address }).unwrap();

    assert_eq!(ledger.verified_users().unwrap(), vec![alice.address, bob.address]);
    assert_eq!(ledger.currently_verified_users().unwrap(), vec![bob.address]);
}

#[test]
fn reopening_with_another_admin_fails() {
    let admin = Account::from_seed(1);
    let other = Account::from_seed(9);
    let clock: Arc<NullClock> = Arc::new(NullClock::default());
    let genesis = GenesisConfig::new(admin.address);
    let ledger = Ledger::open(NullStore::new(), &genesis, clock.clone()).unwrap();
    let deployment = ledger.deployment().clone();

    // A store already carrying this deployment.
    let store = NullStore::new();
    deployment.save(&store).unwrap();
    let err = Ledger::open(store, &GenesisConfig::new(other.address), clock.clone())
        .err()
        .unwrap();
    assert!(matches!(err, LedgerError::GenesisMismatch { .. }));

    let store = NullStore::new();
    deployment.save(&store).unwrap();
    let reopened = Ledger::open_existing(store, clock).unwrap();
    assert_eq!(reopened.deployment(), &deployment);
}

#[test]
fn open_existing_requires_deployment() {
    let clock = Arc::new(NullClock::default());
    assert!(matches!(
        Ledger::open_existing(NullStore::new(), clock).err(),
        Some(LedgerError::NotDeployed)
    ));
}

#[test]
fn listener_can_submit_from_inside_fan_out() {
    let admin = Account::from_seed(1);
    let mut alice = Account::from_seed(2);
    let (ledger, _) = open_ledger(&admin);
    let ledger = Arc::new(ledger);

    let weak = Arc::downgrade(&ledger);
    let reviewer = Mutex::new(admin);
    ledger
        .subscribe(Box::new(move |e| {
            if let DomainEvent::IdentityRegistered { owner } = &e.event {
                let ledger = weak.upgrade().unwrap();
                let tx = reviewer.lock().unwrap().sign(Call::Verify { target: *owner });
                ledger.submit(&tx).unwrap();
            }
        }))
        .unwrap();

    submit(&ledger, &mut alice, register_call("Alice", b"a")).unwrap();

    assert_eq!(ledger.status_of(&alice.address).unwrap(), IdentityStatus::Verified);
    assert_eq!(ledger.transaction_count().unwrap(), 2);
}
