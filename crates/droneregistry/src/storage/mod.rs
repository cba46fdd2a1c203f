//! Storage layer for droneregistry.
//!
//! This module provides `SQLite`-based persistent storage for drone
//! registrations. Serial number uniqueness is enforced by the database,
//! not by application-level locking; concurrent inserts with the same
//! serial race at the store and exactly one wins.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::registration::{NewRegistration, Registration};

/// Open a database connection, creating parent directories if needed.
fn open_connection(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    debug!("Opening database at {}", path.display());
    let conn = Connection::open(path).map_err(|source| Error::DatabaseOpen {
        path: path.to_path_buf(),
        source,
    })?;

    // Enable WAL mode for better concurrent read performance
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

    Ok(conn)
}

/// Run the one-shot schema initialization for the database at `path`.
///
/// Returns `true` if the drones table was created, `false` if it already
/// existed. Idempotent; safe to run any number of times. A failure here is
/// treated as fatal by the caller.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or schema
/// initialization fails.
pub fn migrate(path: impl AsRef<Path>) -> Result<bool> {
    let conn = open_connection(path.as_ref())?;

    let existed = migrations::drones_table_exists(&conn)?;
    migrations::initialize_schema(&conn)?;

    Ok(!existed)
}

/// Storage engine for drone registrations.
///
/// Holds the single database connection and is passed explicitly to the
/// layers that need it. Registrations are immutable after creation; there
/// are no update or delete operations.
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = open_connection(&path)?;

        migrations::initialize_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert a new registration and return its assigned ID.
    ///
    /// The creation timestamp is set here, once, and never modified.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateSerial`] if a registration with the same
    /// serial number already exists, or another error if the database
    /// operation fails.
    pub fn insert(&self, registration: &NewRegistration) -> Result<i64> {
        let created_at = Utc::now().to_rfc3339();

        let result = self.conn.execute(
            r"
            INSERT INTO drones (brand, model, serial, pilot_id, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
            params![
                registration.brand,
                registration.model,
                registration.serial,
                registration.pilot_id,
                created_at,
            ],
        );

        match result {
            Ok(_) => {
                let id = self.conn.last_insert_rowid();
                debug!("Inserted registration with id {}", id);
                Ok(id)
            }
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                debug!(
                    "Rejected duplicate serial number '{}'",
                    registration.serial
                );
                Err(Error::DuplicateSerial {
                    serial: registration.serial.clone(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Get a registration by its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get(&self, id: i64) -> Result<Option<Registration>> {
        let result = self
            .conn
            .query_row(
                r"
                SELECT id, brand, model, serial, pilot_id, created_at
                FROM drones WHERE id = ?1
                ",
                [id],
                Self::row_to_registration,
            )
            .optional()?;
        Ok(result)
    }

    /// List all registrations, newest first.
    ///
    /// Ordered by creation time descending, with ID as a tie-break so that
    /// insertion order is preserved for registrations created within the
    /// same timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list(&self) -> Result<Vec<Registration>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT id, brand, model, serial, pilot_id, created_at
            FROM drones ORDER BY created_at DESC, id DESC
            ",
        )?;

        let registrations = stmt
            .query_map([], Self::row_to_registration)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(registrations)
    }

    /// Check if a registration with the given serial number exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn serial_exists(&self, serial: &str) -> Result<bool> {
        let count: i32 = self.conn.query_row(
            "SELECT COUNT(*) FROM drones WHERE serial = ?1",
            [serial],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Count total registrations in storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM drones", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Convert a database row to a Registration struct.
    fn row_to_registration(row: &rusqlite::Row) -> rusqlite::Result<Registration> {
        let id: i64 = row.get(0)?;
        let brand: String = row.get(1)?;
        let model: String = row.get(2)?;
        let serial: String = row.get(3)?;
        let pilot_id: String = row.get(4)?;
        let created_at_str: String = row.get(5)?;

        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc));

        Ok(Registration {
            id,
            brand,
            model,
            serial,
            pilot_id,
            created_at,
        })
    }
}
