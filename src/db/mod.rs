//! SQLite-based local store for farm records.
//!
//! The database lives at `~/.farmdesk/farmdesk.db` and is the single source
//! of truth for every record type. There is no cache in front of it:
//! listings and the sellable-inventory computation read live state on every
//! call. Each `FarmDb` owns one connection; operations are synchronous and
//! run to completion on the calling thread.

use std::path::PathBuf;

use rusqlite::Connection;

use crate::error::FarmError;

pub mod types;
pub use types::*;

pub mod repo;
pub use repo::Record;

pub mod clients;
pub mod cultures;
pub mod employees;
pub mod expenses;
pub mod fields;
pub mod harvests;
pub mod materials;
pub mod plantings;
pub mod purchases;
pub mod sales;
pub mod suppliers;
pub mod techniques;
pub mod usages;
pub mod works;

/// SQLite connection wrapper for the farm store.
///
/// Intentionally NOT `Clone` or `Sync`; a desktop embedder holds it behind
/// a mutex if it needs cross-thread access.
pub struct FarmDb {
    conn: Connection,
}

impl FarmDb {
    /// Borrow the underlying connection for ad-hoc queries.
    pub fn conn_ref(&self) -> &Connection {
        &self.conn
    }

    /// Execute a closure within a SQLite transaction.
    /// Commits on Ok, rolls back on Err, including every error path, so a
    /// failed multi-statement write leaves no partial effect.
    pub fn with_transaction<F, T>(&self, f: F) -> Result<T, FarmError>
    where
        F: FnOnce(&Self) -> Result<T, FarmError>,
    {
        self.conn.execute_batch("BEGIN IMMEDIATE")?;
        match f(self) {
            Ok(val) => {
                self.conn.execute_batch("COMMIT")?;
                Ok(val)
            }
            Err(e) => {
                let _ = self.conn.execute_batch("ROLLBACK");
                Err(e)
            }
        }
    }

    /// Open (or create) the database at `~/.farmdesk/farmdesk.db` and apply
    /// the schema. Failure here is the one process-fatal error in the crate.
    pub fn open() -> Result<Self, DbError> {
        let path = Self::db_path()?;
        Self::open_at(path)
    }

    /// Open a database at an explicit path. Used by tests and embedders.
    pub fn open_at(path: PathBuf) -> Result<Self, DbError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(DbError::CreateDir)?;
            }
        }

        let conn = Connection::open(&path)?;

        // Enable WAL mode for better concurrent read performance
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        crate::migrations::run_migrations(&conn).map_err(DbError::Migration)?;

        // Enable FK constraint enforcement. Set after migrations so a future
        // migration can recreate tables with PRAGMA foreign_keys = OFF.
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        Ok(Self { conn })
    }

    /// Resolve the default database path: `~/.farmdesk/farmdesk.db`.
    fn db_path() -> Result<PathBuf, DbError> {
        let home = dirs::home_dir().ok_or(DbError::HomeDirNotFound)?;
        Ok(home.join(".farmdesk").join("farmdesk.db"))
    }
}

// =============================================================================
// Shared test utilities
// =============================================================================

#[cfg(test)]
pub mod test_utils {
    use super::types::*;
    use super::FarmDb;

    /// Create a temporary database for testing.
    ///
    /// We leak the `TempDir` so the directory persists for the duration of
    /// the test. Test temp dirs are cleaned up by the OS. FK enforcement
    /// stays ON; tests build complete record graphs.
    pub fn test_db() -> FarmDb {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("test.db");
        std::mem::forget(dir);
        FarmDb::open_at(path).expect("Failed to open test database")
    }

    pub fn seed_field(db: &FarmDb) -> i64 {
        db.insert(&DbField {
            id: 0,
            name: "North field".to_string(),
            area: 42.0,
            soil_type: "Chernozem".to_string(),
        })
        .expect("seed field")
    }

    pub fn seed_culture(db: &FarmDb) -> i64 {
        db.insert(&DbCulture {
            id: 0,
            name: "Wheat".to_string(),
            seasonality: "Winter".to_string(),
            average_yield: 4.5,
        })
        .expect("seed culture")
    }

    pub fn seed_harvest(db: &FarmDb, field_id: i64, culture_id: i64, volume: i64) -> i64 {
        db.insert(&DbHarvest {
            id: 0,
            field_id,
            culture_id,
            harvest_date: "2026-08-01".to_string(),
            volume,
            price_per_kg: 10,
        })
        .expect("seed harvest")
    }

    pub fn seed_client(db: &FarmDb, company_name: &str) -> i64 {
        db.insert(&DbClient {
            id: 0,
            company_name: company_name.to_string(),
            contact_person: "Olena K.".to_string(),
            phone: "+380501234567".to_string(),
            email: None,
        })
        .expect("seed client")
    }

    pub fn sample_sale(client_id: i64, harvest_id: i64, quantity: i64) -> DbSale {
        DbSale {
            id: 0,
            client_id,
            harvest_id,
            quantity,
            unit_price: 25,
            contract_date: None,
            delivery_date: None,
            status: "Active".to_string(),
            notes: None,
            created_date: "2026-08-02".to_string(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
