//! LMDB environment setup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use heed::byteorder::BigEndian;
use heed::types::{Bytes, U64};
use heed::{Database, Env, EnvOpenOptions};

use dims_store::StoreError;

use crate::integrity::{check_data_dir, check_integrity};
use crate::migration::Migrator;
use crate::write_batch::WriteBatch;
use crate::LmdbError;

/// Big-endian `u64` keys, so LMDB's byte order matches numeric order.
pub(crate) type SeqKey = U64<BigEndian>;

/// Named databases created in every environment.
pub const DATABASE_NAMES: &[&str] = &[
    "identities",
    "badges",
    "badge_owners",
    "verified",
    "verified_set",
    "events",
    "receipts",
    "meta",
];

/// Default number of named databases the environment may hold.
pub const DEFAULT_MAX_DBS: u32 = 16;

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    pub(crate) env: Arc<Env>,
    path: PathBuf,
    /// owner address (20 bytes) → bincode `IdentityRecord`
    pub(crate) identities_db: Database<Bytes, Bytes>,
    /// token id → bincode `BadgeToken`
    pub(crate) badges_db: Database<SeqKey, Bytes>,
    /// owner address → token id
    pub(crate) badge_owners_db: Database<Bytes, SeqKey>,
    /// insertion index → address
    pub(crate) verified_db: Database<SeqKey, Bytes>,
    /// address → empty, for membership checks
    pub(crate) verified_set_db: Database<Bytes, Bytes>,
    /// sequence → bincode `SequencedEvent`
    pub(crate) events_db: Database<SeqKey, Bytes>,
    /// tx hash → bincode `Receipt`
    pub(crate) receipts_db: Database<Bytes, Bytes>,
    pub(crate) meta_db: Database<Bytes, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given path.
    pub fn open(path: &Path, max_dbs: u32, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;

        // SAFETY: the environment is opened once per process for this path
        // and never opened concurrently with a different map size.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(max_dbs)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let identities_db = env.create_database(&mut wtxn, Some("identities"))?;
        let badges_db = env.create_database(&mut wtxn, Some("badges"))?;
        let badge_owners_db = env.create_database(&mut wtxn, Some("badge_owners"))?;
        let verified_db = env.create_database(&mut wtxn, Some("verified"))?;
        let verified_set_db = env.create_database(&mut wtxn, Some("verified_set"))?;
        let events_db = env.create_database(&mut wtxn, Some("events"))?;
        let receipts_db = env.create_database(&mut wtxn, Some("receipts"))?;
        let meta_db = env.create_database(&mut wtxn, Some("meta"))?;
        wtxn.commit()?;

        tracing::debug!(path = %path.display(), map_size, "opened LMDB environment");

        Ok(Self {
            env: Arc::new(env),
            path: path.to_path_buf(),
            identities_db,
            badges_db,
            badge_owners_db,
            verified_db,
            verified_set_db,
            events_db,
            receipts_db,
            meta_db,
        })
    }

    /// Open the environment, bring its schema up to date and verify its
    /// integrity. This is the entry point used by the ledger at startup.
    pub fn open_checked(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        check_data_dir(path).map_err(LmdbError::Corruption)?;
        let env = Self::open(path, DEFAULT_MAX_DBS, map_size)?;
        Migrator::run(&env)?;

        let report = check_integrity(&env)?;
        if !report.is_healthy() {
            for error in &report.errors {
                tracing::error!(%error, "integrity check failed");
            }
            return Err(LmdbError::Corruption(report.errors.join("; ")));
        }
        tracing::info!(
            databases = report.databases_checked,
            entries = report.total_entries,
            "database integrity check passed"
        );
        Ok(env)
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Begin a write batch spanning one LMDB write transaction.
    pub fn write_batch(&self) -> Result<WriteBatch<'_>, StoreError> {
        WriteBatch::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("db");
        let env = LmdbEnvironment::open(&path, DEFAULT_MAX_DBS, 10 * 1024 * 1024).unwrap();
        assert!(path.join("data.mdb").exists());
        assert_eq!(env.path(), path.as_path());
    }

    #[test]
    fn open_checked_sets_schema_version() {
        use dims_store::MetaStore;

        let dir = tempfile::tempdir().unwrap();
        let env = LmdbEnvironment::open_checked(dir.path(), 10 * 1024 * 1024).unwrap();
        assert_eq!(
            env.get_schema_version().unwrap(),
            crate::CURRENT_SCHEMA_VERSION
        );
    }

    #[test]
    fn reopen_preserves_data() {
        use dims_store::MetaStore;

        let dir = tempfile::tempdir().unwrap();
        {
            let env = LmdbEnvironment::open_checked(dir.path(), 10 * 1024 * 1024).unwrap();
            env.put_meta("deployment", b"abc").unwrap();
        }
        let env = LmdbEnvironment::open_checked(dir.path(), 10 * 1024 * 1024).unwrap();
        assert_eq!(env.get_meta("deployment").unwrap(), Some(b"abc".to_vec()));
    }
}
