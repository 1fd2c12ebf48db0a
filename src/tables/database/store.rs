// src/tables/database/store.rs

use super::error::DbResult;
use crate::tables::definitions::{Table, TableId};

/// Durable keyed store of whole table records.
///
/// Every call is atomic per record: `put` either replaces the stored table
/// completely or fails without writing anything. Callers update in-memory
/// state only after a call has returned `Ok`.
pub trait TableStore: Send + Sync {
    /// All stored tables, most recently created first.
    fn list(&self) -> DbResult<Vec<Table>>;

    fn get(&self, id: &TableId) -> DbResult<Option<Table>>;

    /// Inserts or replaces the record keyed by `table.id`.
    fn put(&mut self, table: &Table) -> DbResult<TableId>;

    /// Removes the record. Deleting an unknown id is not an error.
    fn delete(&mut self, id: &TableId) -> DbResult<()>;
}
