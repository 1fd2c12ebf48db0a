// src/tables/database/memory.rs
//! In-memory table store with switchable failures.

use super::error::{DbError, DbResult};
use super::store::TableStore;
use crate::tables::definitions::{Table, TableId};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Handle that makes an [`InMemoryTableStore`] reject calls. Clones share
/// the same switches, so a test can keep one after the store is moved into
/// a resource.
#[derive(Debug, Clone, Default)]
pub struct StoreFailureSwitch {
    writes: Arc<AtomicBool>,
    reads: Arc<AtomicBool>,
}

impl StoreFailureSwitch {
    pub fn fail_writes(&self, fail: bool) {
        self.writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.reads.store(fail, Ordering::SeqCst);
    }

    fn check_write(&self) -> DbResult<()> {
        if self.writes.load(Ordering::SeqCst) {
            return Err(DbError::Unavailable("writes are disabled".to_string()));
        }
        Ok(())
    }

    fn check_read(&self) -> DbResult<()> {
        if self.reads.load(Ordering::SeqCst) {
            return Err(DbError::Unavailable("reads are disabled".to_string()));
        }
        Ok(())
    }
}

/// Records are kept serialized, so reads go through the same JSON round trip
/// as the SQLite store.
#[derive(Debug, Default)]
pub struct InMemoryTableStore {
    records: Vec<(TableId, String)>,
    failures: StoreFailureSwitch,
}

impl InMemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failure_switch(&self) -> StoreFailureSwitch {
        self.failures.clone()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl TableStore for InMemoryTableStore {
    fn list(&self) -> DbResult<Vec<Table>> {
        self.failures.check_read()?;
        self.records
            .iter()
            .rev()
            .map(|(_, record)| serde_json::from_str(record).map_err(DbError::from))
            .collect()
    }

    fn get(&self, id: &TableId) -> DbResult<Option<Table>> {
        self.failures.check_read()?;
        match self.records.iter().find(|(key, _)| key == id) {
            Some((_, record)) => Ok(Some(serde_json::from_str(record)?)),
            None => Ok(None),
        }
    }

    fn put(&mut self, table: &Table) -> DbResult<TableId> {
        self.failures.check_write()?;
        let record = serde_json::to_string(table)?;
        match self.records.iter_mut().find(|(key, _)| key == &table.id) {
            Some(entry) => entry.1 = record,
            None => self.records.push((table.id.clone(), record)),
        }
        Ok(table.id.clone())
    }

    fn delete(&mut self, id: &TableId) -> DbResult<()> {
        self.failures.check_write()?;
        self.records.retain(|(key, _)| key != id);
        Ok(())
    }
}
