// src/tables/database/schema.rs

use super::error::DbResult;
use rusqlite::Connection;

/// Create the record table if it doesn't exist. One row per user table,
/// holding the full table as JSON.
pub fn ensure_tables_table(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS tables (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            record TEXT NOT NULL,      -- full table value as JSON
            created_at TEXT DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_creation_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_tables_table(&conn).unwrap();
        ensure_tables_table(&conn).unwrap();

        let mut stmt = conn.prepare("PRAGMA table_info('tables')").unwrap();
        let cols: Vec<String> = stmt
            .query_map([], |row| row.get::<_, String>(1))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(cols, vec!["id", "name", "record", "created_at", "updated_at"]);
    }
}
