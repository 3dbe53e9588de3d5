//! Schema versioning for the ledger directory.
//!
//! The version lives in the meta table. Opening an older directory steps it
//! forward one version at a time; a newer one is refused.

use dims_store::MetaStore;

use crate::LmdbError;

/// The schema version that the current code expects.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

pub struct Migrator;

impl Migrator {
    /// Bring the stored schema up to [`CURRENT_SCHEMA_VERSION`].
    ///
    /// A fresh directory reads as version 0.
    pub fn run(meta_store: &impl MetaStore) -> Result<(), LmdbError> {
        let current = meta_store.get_schema_version()?;

        if current == CURRENT_SCHEMA_VERSION {
            tracing::debug!(version = current, "ledger schema current");
            return Ok(());
        }

        if current > CURRENT_SCHEMA_VERSION {
            return Err(LmdbError::SchemaTooNew {
                found: current,
                supported: CURRENT_SCHEMA_VERSION,
            });
        }

        for version in current..CURRENT_SCHEMA_VERSION {
            tracing::info!(from = version, to = version + 1, "migrating ledger schema");
            run_migration(version, version + 1)?;
        }

        meta_store.set_schema_version(CURRENT_SCHEMA_VERSION)?;

        tracing::info!(version = CURRENT_SCHEMA_VERSION, "ledger schema migrated");
        Ok(())
    }
}

fn run_migration(from: u32, to: u32) -> Result<(), LmdbError> {
    match (from, to) {
        // Tables are created on open.
        (0, 1) => Ok(()),
        _ => Err(LmdbError::UnknownMigration { from, to }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::DEFAULT_MAX_DBS;
    use crate::LmdbEnvironment;

    #[test]
    fn unknown_migration_is_error() {
        assert!(matches!(
            run_migration(99, 100),
            Err(LmdbError::UnknownMigration { from: 99, to: 100 })
        ));
    }

    #[test]
    fn fresh_database_is_migrated() {
        let dir = tempfile::tempdir().unwrap();
        let env = LmdbEnvironment::open(dir.path(), DEFAULT_MAX_DBS, 10 * 1024 * 1024).unwrap();
        Migrator::run(&env).unwrap();
        assert_eq!(env.get_schema_version().unwrap(), CURRENT_SCHEMA_VERSION);
        // Second run is a no-op.
        Migrator::run(&env).unwrap();
    }

    #[test]
    fn newer_schema_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let env = LmdbEnvironment::open(dir.path(), DEFAULT_MAX_DBS, 10 * 1024 * 1024).unwrap();
        env.set_schema_version(CURRENT_SCHEMA_VERSION + 1).unwrap();
        assert!(matches!(
            Migrator::run(&env),
            Err(LmdbError::SchemaTooNew { .. })
        ));
    }
}
