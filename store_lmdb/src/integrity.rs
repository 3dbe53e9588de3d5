//! LMDB database integrity checks.
//!
//! Run on startup to detect corruption before the ledger accepts
//! transactions. Besides reading every database, the check cross-validates
//! the badge tables: each live badge must be indexed under its owner, and no
//! owner may hold two badges.

use std::collections::HashSet;
use std::path::Path;

use heed::types::Bytes;

use dims_store::{write_set::duplicate_badge_owners, BadgeStore, BadgeToken};

use crate::environment::DATABASE_NAMES;
use crate::meta::{decode_counter, TOKEN_COUNTER_KEY};
use crate::{decode, LmdbEnvironment, LmdbError};

/// Summary of an integrity check run.
#[derive(Debug)]
pub struct IntegrityReport {
    pub databases_checked: u32,
    pub total_entries: u64,
    pub errors: Vec<String>,
}

impl IntegrityReport {
    pub fn is_healthy(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check LMDB database integrity.
///
/// Read failures and inconsistencies are recorded in the report rather than
/// causing a hard error.
pub fn check_integrity(env: &LmdbEnvironment) -> Result<IntegrityReport, LmdbError> {
    let mut report = IntegrityReport {
        databases_checked: 0,
        total_entries: 0,
        errors: Vec::new(),
    };

    let rtxn = env.env.read_txn()?;

    for &db_name in DATABASE_NAMES {
        match env.env.open_database::<Bytes, Bytes>(&rtxn, Some(db_name)) {
            Ok(Some(db)) => {
                report.databases_checked += 1;
                match db.len(&rtxn) {
                    Ok(count) => report.total_entries += count,
                    Err(e) => report
                        .errors
                        .push(format!("failed to read database '{db_name}': {e}")),
                }
            }
            Ok(None) => report
                .errors
                .push(format!("database '{db_name}' is missing")),
            Err(e) => report
                .errors
                .push(format!("failed to open database '{db_name}': {e}")),
        }
    }

    let mut badges: Vec<BadgeToken> = Vec::new();
    for entry in env.badges_db.iter(&rtxn)? {
        let (id, val) = entry?;
        match decode::<BadgeToken>(val, "badge") {
            Ok(badge) if badge.token_id.as_u64() != id => report
                .errors
                .push(format!("badge stored under {id} claims token id {}", badge.token_id)),
            Ok(badge) => badges.push(badge),
            Err(e) => report.errors.push(e.to_string()),
        }
    }
    drop(rtxn);

    for owner in duplicate_badge_owners(&badges) {
        report
            .errors
            .push(format!("owner {owner} holds more than one badge"));
    }

    let counter = {
        let rtxn = env.env.read_txn()?;
        decode_counter(env.meta_db.get(&rtxn, TOKEN_COUNTER_KEY)?)?
    };
    let mut indexed = HashSet::new();
    for badge in &badges {
        if badge.token_id.as_u64() >= counter {
            report.errors.push(format!(
                "token id {} is not below the token counter {counter}",
                badge.token_id
            ));
        }
        match env.badge_of_owner(&badge.owner)? {
            Some(id) if id == badge.token_id => {
                indexed.insert(badge.owner);
            }
            other => report.errors.push(format!(
                "badge {} is indexed as {other:?} for owner {}",
                badge.token_id, badge.owner
            )),
        }
    }

    let rtxn = env.env.read_txn()?;
    let owner_entries = env.badge_owners_db.len(&rtxn)?;
    if owner_entries != indexed.len() as u64 {
        report.errors.push(format!(
            "owner index has {owner_entries} entries for {} live badges",
            indexed.len()
        ));
    }
    let verified = env.verified_db.len(&rtxn)?;
    let verified_set = env.verified_set_db.len(&rtxn)?;
    if verified != verified_set {
        report.errors.push(format!(
            "verified index has {verified} entries but its set has {verified_set}"
        ));
    }

    Ok(report)
}

/// Check if the LMDB data directory looks valid before opening.
///
/// Returns `Ok(())` for a fresh (nonexistent) directory. Returns an error
/// if the directory exists but `data.mdb` is missing while other files are
/// present, which suggests corruption or misconfiguration.
pub fn check_data_dir(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Ok(());
    }
    let data_file = path.join("data.mdb");
    if data_file.exists() {
        return Ok(());
    }
    if path.join("lock.mdb").exists() {
        return Err(format!(
            "LMDB directory exists but data.mdb is missing at {}",
            path.display()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::DEFAULT_MAX_DBS;
    use dims_store::{StateStore, WriteSet};
    use dims_types::{AccountAddress, Timestamp, TokenId};

    fn temp_env() -> (tempfile::TempDir, LmdbEnvironment) {
        let dir = tempfile::tempdir().unwrap();
        let env = LmdbEnvironment::open(dir.path(), DEFAULT_MAX_DBS, 10 * 1024 * 1024).unwrap();
        (dir, env)
    }

    fn badge(id: u64, owner: u8) -> BadgeToken {
        BadgeToken {
            token_id: TokenId::new(id),
            owner: AccountAddress::new([owner; 20]),
            metadata_uri: "ipfs://cid".into(),
            minted_at: Timestamp::new(1),
        }
    }

    #[test]
    fn check_data_dir_fresh_path() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check_data_dir(&dir.path().join("absent")).is_ok());
        assert!(check_data_dir(dir.path()).is_ok());
    }

    #[test]
    fn check_data_dir_missing_data_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("lock.mdb"), b"").unwrap();
        assert!(check_data_dir(dir.path()).is_err());
    }

    #[test]
    fn fresh_environment_is_healthy() {
        let (_dir, env) = temp_env();
        let report = check_integrity(&env).unwrap();
        assert!(report.is_healthy(), "{:?}", report.errors);
        assert_eq!(report.databases_checked, DATABASE_NAMES.len() as u32);
    }

    #[test]
    fn consistent_badges_are_healthy() {
        let (_dir, env) = temp_env();
        let mut ws = WriteSet::default();
        let b = badge(0, 1);
        ws.owner_index.insert(b.owner, Some(b.token_id));
        ws.badges.insert(b.token_id, Some(b));
        ws.token_counter = Some(1);
        env.commit(&ws).unwrap();
        assert!(check_integrity(&env).unwrap().is_healthy());
    }

    #[test]
    fn duplicate_owner_is_reported() {
        let (_dir, env) = temp_env();
        let mut ws = WriteSet::default();
        ws.badges.insert(TokenId::new(0), Some(badge(0, 1)));
        ws.badges.insert(TokenId::new(1), Some(badge(1, 1)));
        ws.owner_index.insert(AccountAddress::new([1; 20]), Some(TokenId::new(1)));
        ws.token_counter = Some(2);
        env.commit(&ws).unwrap();

        let report = check_integrity(&env).unwrap();
        assert!(!report.is_healthy());
        assert!(report.errors.iter().any(|e| e.contains("more than one badge")));
    }

    #[test]
    fn unindexed_badge_is_reported() {
        let (_dir, env) = temp_env();
        let mut ws = WriteSet::default();
        ws.badges.insert(TokenId::new(0), Some(badge(0, 2)));
        ws.token_counter = Some(1);
        env.commit(&ws).unwrap();
        assert!(!check_integrity(&env).unwrap().is_healthy());
    }
}
