//! Connection pool and schema management for the local SQLite store

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use syncline_domain::{Result, SynclineError};

use crate::errors::InfraError;

/// Schema for the contacts table.
///
/// `external_id` carries the UNIQUE constraint that backs upsert-by-external-id.
/// SQLite permits multiple NULLs in a unique column, so contacts that have not
/// been linked to the directory yet can coexist.
const CONTACTS_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS contacts (
    id                  TEXT PRIMARY KEY,
    first_name          TEXT,
    last_name           TEXT,
    email               TEXT,
    phone               TEXT,
    birthdate           TEXT,
    mailing_street      TEXT,
    mailing_city        TEXT,
    mailing_postal_code TEXT,
    mailing_state       TEXT,
    mailing_country     TEXT,
    external_id         TEXT UNIQUE,
    last_synced_at      TEXT,
    created_at          INTEGER NOT NULL,
    updated_at          INTEGER NOT NULL
);
";

/// Pooled SQLite database manager
pub struct DbManager {
    pool: Pool<SqliteConnectionManager>,
}

impl DbManager {
    /// Open (or create) the database at `path` with a pool of `pool_size`
    /// connections.
    pub fn new(path: &str, pool_size: u32) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder()
            .max_size(pool_size.max(1))
            .build(manager)
            .map_err(|err| SynclineError::from(InfraError::from(err)))?;

        Ok(Self { pool })
    }

    /// Check out a connection from the pool.
    pub fn get_connection(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
        self.pool.get().map_err(|err| SynclineError::from(InfraError::from(err)))
    }

    /// Create the schema if it does not exist yet.
    pub fn run_migrations(&self) -> Result<()> {
        let conn = self.get_connection()?;
        conn.execute_batch(CONTACTS_SCHEMA)
            .map_err(|err| SynclineError::from(InfraError::from(err)))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn migrations_create_contacts_table() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let manager =
            DbManager::new(db_path.to_str().unwrap(), 2).expect("create db manager");
        manager.run_migrations().expect("run migrations");

        let conn = manager.get_connection().expect("get connection");
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))
            .expect("query contacts");
        assert_eq!(count, 0);
    }

    #[test]
    fn migrations_are_repeatable() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let manager =
            DbManager::new(db_path.to_str().unwrap(), 2).expect("create db manager");
        manager.run_migrations().expect("first run");
        manager.run_migrations().expect("second run");
    }
}
