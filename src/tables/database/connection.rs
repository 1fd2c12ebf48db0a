// src/tables/database/connection.rs

use super::error::DbResult;
use bevy::log::{debug, info, warn};
use rusqlite::Connection;
use std::path::Path;

pub struct DbConnection;

impl DbConnection {
    /// Opens `path`, creating the database if needed, and makes sure the
    /// schema exists.
    pub fn open(path: &Path) -> DbResult<Connection> {
        let conn = if path.exists() {
            Self::open_existing(path)?
        } else {
            Self::create_new(path)?
        };
        super::schema::ensure_tables_table(&conn)?;
        Ok(conn)
    }

    /// Creates a new database with WAL mode enabled
    pub fn create_new(path: &Path) -> DbResult<Connection> {
        let conn = Connection::open(path)?;
        let journal_mode = Self::enable_wal(&conn)?;
        if journal_mode.to_uppercase() != "WAL" {
            warn!(
                "Failed to set WAL mode on new database {:?}. Current mode: {}",
                path.file_name(),
                journal_mode
            );
        } else {
            info!("WAL mode activated for new database {:?}", path.file_name());
        }
        conn.execute_batch(
            "PRAGMA synchronous=NORMAL;
             PRAGMA temp_store=MEMORY;",
        )?;
        Ok(conn)
    }

    /// Opens an existing database and ensures WAL mode is enabled.
    /// PRAGMA settings are per connection, so this runs on every open.
    pub fn open_existing(path: &Path) -> DbResult<Connection> {
        let conn = Connection::open(path)?;
        let journal_mode = Self::enable_wal(&conn)?;
        if journal_mode.to_uppercase() != "WAL" {
            warn!(
                "Failed to set WAL mode on database {:?}. Current mode: {}. This may indicate the database is in use by another connection.",
                path.file_name(),
                journal_mode
            );
        } else {
            debug!("WAL mode activated for database {:?}", path.file_name());
        }
        conn.execute_batch(
            "PRAGMA synchronous=NORMAL;
             PRAGMA busy_timeout=5000;",
        )?;
        Ok(conn)
    }

    /// Private in-memory database with the schema in place. Used by tests
    /// and as a throwaway store.
    pub fn open_in_memory() -> DbResult<Connection> {
        let conn = Connection::open_in_memory()?;
        super::schema::ensure_tables_table(&conn)?;
        Ok(conn)
    }

    fn enable_wal(conn: &Connection) -> DbResult<String> {
        let mode: String = conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))?;
        Ok(mode)
    }
}
