// src/tables/database/sqlite_store.rs

use super::connection::DbConnection;
use super::error::{DbError, DbResult};
use super::schema::ensure_tables_table;
use super::store::TableStore;
use crate::tables::definitions::{Table, TableId};
use bevy::log::{trace, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// SQLite-backed store keeping each table as one JSON record.
pub struct SqliteTableStore {
    conn: Mutex<Connection>,
}

impl SqliteTableStore {
    pub fn open(path: &Path) -> DbResult<Self> {
        Ok(Self::wrap(DbConnection::open(path)?))
    }

    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::wrap(DbConnection::open_in_memory()?))
    }

    pub fn from_connection(conn: Connection) -> DbResult<Self> {
        ensure_tables_table(&conn)?;
        Ok(Self::wrap(conn))
    }

    fn wrap(conn: Connection) -> Self {
        SqliteTableStore {
            conn: Mutex::new(conn),
        }
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| DbError::Unavailable("SQLite connection lock poisoned".to_string()))
    }

    /// Raw JSON record for `id`, exactly as stored.
    pub fn raw_record(&self, id: &TableId) -> DbResult<Option<String>> {
        let conn = self.lock()?;
        let record = conn
            .query_row(
                "SELECT record FROM tables WHERE id = ?1",
                [id.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(record)
    }
}

impl TableStore for SqliteTableStore {
    fn list(&self) -> DbResult<Vec<Table>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT id, record FROM tables ORDER BY rowid DESC")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut tables = Vec::new();
        for row in rows {
            let (id, record) = row?;
            match serde_json::from_str::<Table>(&record) {
                Ok(table) => tables.push(table),
                Err(e) => warn!("Skipping unreadable table record '{}': {}", id, e),
            }
        }
        Ok(tables)
    }

    fn get(&self, id: &TableId) -> DbResult<Option<Table>> {
        match self.raw_record(id)? {
            Some(record) => Ok(Some(serde_json::from_str(&record)?)),
            None => Ok(None),
        }
    }

    fn put(&mut self, table: &Table) -> DbResult<TableId> {
        let record = serde_json::to_string(table)?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO tables (id, name, record) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                record = excluded.record,
                updated_at = CURRENT_TIMESTAMP",
            params![table.id.as_str(), table.name, record],
        )?;
        trace!("Stored table '{}' ({} bytes).", table.id, record.len());
        Ok(table.id.clone())
    }

    fn delete(&mut self, id: &TableId) -> DbResult<()> {
        let conn = self.lock()?;
        let removed = conn.execute("DELETE FROM tables WHERE id = ?1", [id.as_str()])?;
        if removed == 0 {
            trace!("Delete of table '{}' matched no record.", id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::definitions::{CellData, CellValue, Column, ColumnId, ColumnType, RowData, RowId};

    fn table(id: &str, name: &str) -> Table {
        let mut t = Table::empty(TableId::new(id), name);
        let col = ColumnId::new(format!("{id}-c"));
        t.columns.push(Column::new(col.clone(), "Name", ColumnType::Text, 0));
        t.column_order.push(col.clone());
        let mut row = RowData::new();
        row.insert(col, CellData::new(CellValue::Text(format!("{name} row"))));
        t.rows.insert(RowId::new(format!("{id}-r")), row);
        t.row_order.push(RowId::new(format!("{id}-r")));
        t
    }

    #[test]
    fn put_then_get_round_trips() {
        let mut store = SqliteTableStore::open_in_memory().unwrap();
        let t = table("t1", "Tasks");
        assert_eq!(store.put(&t).unwrap(), t.id);
        assert_eq!(store.get(&t.id).unwrap(), Some(t));
        assert_eq!(store.get(&TableId::new("missing")).unwrap(), None);
    }

    #[test]
    fn put_overwrites_whole_record_and_keeps_position() {
        let mut store = SqliteTableStore::open_in_memory().unwrap();
        store.put(&table("a", "First")).unwrap();
        store.put(&table("b", "Second")).unwrap();

        let mut renamed = table("a", "First");
        renamed.name = "Renamed".into();
        renamed.rows.clear();
        renamed.row_order.clear();
        store.put(&renamed).unwrap();

        let listed = store.list().unwrap();
        let ids: Vec<_> = listed.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(listed[1], renamed);
    }

    #[test]
    fn delete_removes_record_and_ignores_unknown_ids() {
        let mut store = SqliteTableStore::open_in_memory().unwrap();
        store.put(&table("a", "A")).unwrap();
        store.delete(&TableId::new("a")).unwrap();
        store.delete(&TableId::new("a")).unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn list_skips_corrupt_records() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_tables_table(&conn).unwrap();
        conn.execute(
            "INSERT INTO tables (id, name, record) VALUES ('bad', 'Bad', '{not json')",
            [],
        )
        .unwrap();
        let mut store = SqliteTableStore::from_connection(conn).unwrap();
        store.put(&table("good", "Good")).unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id.as_str(), "good");
        assert!(store.get(&TableId::new("bad")).is_err());
    }
}
