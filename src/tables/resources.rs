// src/tables/resources.rs
use bevy::prelude::*;

use super::database::TableStore;
use super::definitions::{ColumnId, RowId, Table, TableId};
use super::error::{TableError, TableResult};
use super::ids::{IdGenerator, UuidGenerator};
use super::policy;
use super::systems::logic::{create_table::build_new_table, validated_name};

/// All loaded tables plus the active selection. The single source of truth
/// for readers; only the registry and `TableEditor` write to it, and always
/// by replacing whole tables.
#[derive(Resource, Default, Debug)]
pub struct TableRegistry {
    table_list: Vec<Table>,
    active_table_id: Option<TableId>,
}

impl TableRegistry {
    pub fn tables(&self) -> &[Table] {
        &self.table_list
    }

    pub fn active_table_id(&self) -> Option<&TableId> {
        self.active_table_id.as_ref()
    }

    /// The active table, or `None` when nothing is selected or the selected
    /// id is unknown.
    pub fn active_table(&self) -> Option<&Table> {
        let id = self.active_table_id.as_ref()?;
        self.get_table(id)
    }

    pub fn get_table(&self, id: &TableId) -> Option<&Table> {
        self.table_list.iter().find(|t| &t.id == id)
    }

    pub fn contains(&self, id: &TableId) -> bool {
        self.get_table(id).is_some()
    }

    /// Replaces the list with everything in `store` and selects the first
    /// table. A read failure is logged and leaves an empty registry.
    pub fn load_all(&mut self, store: &dyn TableStore) -> &[Table] {
        match store.list() {
            Ok(tables) => {
                for table in &tables {
                    let issues = table.invariant_violations();
                    if !issues.is_empty() {
                        warn!(
                            "Table '{}' ({}) loaded with inconsistencies: {}",
                            table.name,
                            table.id,
                            issues.join("; ")
                        );
                    }
                }
                self.active_table_id = tables.first().map(|t| t.id.clone());
                self.table_list = tables;
                info!("Loaded {} table(s) from the durable store.", self.table_list.len());
            }
            Err(e) => {
                error!("Failed to load table list: {}", e);
                self.table_list.clear();
                self.active_table_id = None;
            }
        }
        &self.table_list
    }

    /// Pure selection change; the id is not checked against the list.
    pub fn set_active(&mut self, id: Option<TableId>) {
        trace!("Active table set to {:?}.", id);
        self.active_table_id = id;
    }

    /// Creates a table with one default text column and one default row,
    /// persists it, then prepends it and makes it active.
    pub fn create_table(
        &mut self,
        store: &mut dyn TableStore,
        ids: &dyn IdGenerator,
        name: &str,
    ) -> TableResult<Table> {
        let name = validated_name(name).inspect_err(|e| warn!("Create table rejected: {}", e))?;
        let table = build_new_table(
            TableId::new(ids.new_id()),
            ColumnId::new(ids.new_id()),
            RowId::new(ids.new_id()),
            &name,
            policy::today(),
        );
        if let Err(e) = store.put(&table) {
            error!("Failed to persist new table '{}': {}", name, e);
            return Err(TableError::Persistence(e));
        }
        self.table_list.insert(0, table.clone());
        self.active_table_id = Some(table.id.clone());
        info!("Created table '{}' ({}).", table.name, table.id);
        Ok(table)
    }

    /// Deletes from the store first; the registry changes only after the
    /// store confirms. A deleted active table hands the selection to the
    /// first remaining table.
    pub fn delete_table(&mut self, store: &mut dyn TableStore, id: &TableId) -> TableResult<()> {
        if !self.contains(id) {
            warn!("Delete rejected: table '{}' does not exist.", id);
            return Err(TableError::TableNotFound(id.clone()));
        }
        if let Err(e) = store.delete(id) {
            error!("Failed to delete table '{}' from the store: {}", id, e);
            return Err(TableError::Persistence(e));
        }
        self.table_list.retain(|t| &t.id != id);
        if self.active_table_id.as_ref() == Some(id) {
            self.active_table_id = self.table_list.first().map(|t| t.id.clone());
        }
        info!("Deleted table '{}'.", id);
        Ok(())
    }

    /// Swaps in a committed table value by id.
    pub(crate) fn replace_table(&mut self, table: Table) {
        match self.table_list.iter().position(|t| t.id == table.id) {
            Some(index) => self.table_list[index] = table,
            None => {
                warn!("Committed table '{}' was not in the registry; inserting it.", table.id);
                self.table_list.insert(0, table);
            }
        }
    }
}

/// The durable store adapter used by the plugin's systems.
#[derive(Resource)]
pub struct TableStoreResource(Box<dyn TableStore>);

impl TableStoreResource {
    pub fn new(store: impl TableStore + 'static) -> Self {
        TableStoreResource(Box::new(store))
    }

    pub fn store(&self) -> &dyn TableStore {
        self.0.as_ref()
    }

    pub fn store_mut(&mut self) -> &mut dyn TableStore {
        self.0.as_mut()
    }
}

/// Identity generator used by the plugin's systems.
#[derive(Resource)]
pub struct TableIdSource(Box<dyn IdGenerator>);

impl TableIdSource {
    pub fn new(generator: impl IdGenerator + 'static) -> Self {
        TableIdSource(Box::new(generator))
    }

    pub fn generator(&self) -> &dyn IdGenerator {
        self.0.as_ref()
    }
}

impl Default for TableIdSource {
    fn default() -> Self {
        Self::new(UuidGenerator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::database::InMemoryTableStore;
    use crate::tables::definitions::{CellValue, ColumnType};
    use crate::tables::ids::SequentialIdGenerator;
    use crate::tables::systems::logic::create_table::DEFAULT_COLUMN_NAME;

    #[test]
    fn create_table_builds_default_column_and_row() {
        let mut store = InMemoryTableStore::new();
        let ids = SequentialIdGenerator::new("id");
        let mut registry = TableRegistry::default();

        let table = registry.create_table(&mut store, &ids, "  Tasks ").unwrap();
        assert_eq!(table.name, "Tasks");
        assert_eq!(table.columns.len(), 1);
        assert_eq!(table.columns[0].name, DEFAULT_COLUMN_NAME);
        assert_eq!(table.columns[0].column_type, ColumnType::Text);
        assert_eq!(table.rows.len(), 1);
        let row_id = &table.row_order[0];
        assert_eq!(table.cell(row_id, &table.columns[0].id), Some(&CellValue::Text(String::new())));
        assert!(table.is_consistent());

        assert_eq!(registry.active_table_id(), Some(&table.id));
        assert_eq!(store.get(&table.id).unwrap(), Some(table));
    }

    #[test]
    fn newest_table_is_listed_first() {
        let mut store = InMemoryTableStore::new();
        let ids = SequentialIdGenerator::new("id");
        let mut registry = TableRegistry::default();
        registry.create_table(&mut store, &ids, "First").unwrap();
        registry.create_table(&mut store, &ids, "Second").unwrap();

        let names: Vec<_> = registry.tables().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Second", "First"]);
    }

    #[test]
    fn create_table_persistence_failure_leaves_state() {
        let mut store = InMemoryTableStore::new();
        store.failure_switch().fail_writes(true);
        let ids = SequentialIdGenerator::new("id");
        let mut registry = TableRegistry::default();

        let err = registry.create_table(&mut store, &ids, "Tasks").unwrap_err();
        assert!(err.is_persistence_failure());
        assert!(registry.tables().is_empty());
        assert_eq!(registry.active_table_id(), None);
    }

    #[test]
    fn create_table_rejects_blank_name() {
        let mut store = InMemoryTableStore::new();
        let mut registry = TableRegistry::default();
        let err = registry
            .create_table(&mut store, &SequentialIdGenerator::default(), "   ")
            .unwrap_err();
        assert!(matches!(err, TableError::EmptyName));
        assert!(store.is_empty());
    }

    #[test]
    fn delete_active_table_selects_first_remaining() {
        let mut store = InMemoryTableStore::new();
        let ids = SequentialIdGenerator::new("id");
        let mut registry = TableRegistry::default();
        let first = registry.create_table(&mut store, &ids, "First").unwrap();
        let second = registry.create_table(&mut store, &ids, "Second").unwrap();

        registry.delete_table(&mut store, &second.id).unwrap();
        assert_eq!(registry.active_table_id(), Some(&first.id));

        registry.delete_table(&mut store, &first.id).unwrap();
        assert_eq!(registry.active_table_id(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn delete_inactive_table_keeps_selection() {
        let mut store = InMemoryTableStore::new();
        let ids = SequentialIdGenerator::new("id");
        let mut registry = TableRegistry::default();
        let first = registry.create_table(&mut store, &ids, "First").unwrap();
        let second = registry.create_table(&mut store, &ids, "Second").unwrap();

        registry.delete_table(&mut store, &first.id).unwrap();
        assert_eq!(registry.active_table_id(), Some(&second.id));
    }

    #[test]
    fn delete_unknown_or_unpersistable_table_changes_nothing() {
        let mut store = InMemoryTableStore::new();
        let ids = SequentialIdGenerator::new("id");
        let mut registry = TableRegistry::default();
        let table = registry.create_table(&mut store, &ids, "Tasks").unwrap();

        let err = registry.delete_table(&mut store, &TableId::new("nope")).unwrap_err();
        assert!(matches!(err, TableError::TableNotFound(_)));

        store.failure_switch().fail_writes(true);
        let err = registry.delete_table(&mut store, &table.id).unwrap_err();
        assert!(err.is_persistence_failure());
        assert!(registry.contains(&table.id));
        assert_eq!(registry.active_table_id(), Some(&table.id));
    }

    #[test]
    fn load_all_selects_first_and_clears_on_read_error() {
        let mut store = InMemoryTableStore::new();
        let ids = SequentialIdGenerator::new("id");
        let mut seed = TableRegistry::default();
        seed.create_table(&mut store, &ids, "Old").unwrap();
        let newest = seed.create_table(&mut store, &ids, "New").unwrap();

        let mut registry = TableRegistry::default();
        assert_eq!(registry.load_all(&store).len(), 2);
        assert_eq!(registry.active_table_id(), Some(&newest.id));

        store.failure_switch().fail_reads(true);
        assert!(registry.load_all(&store).is_empty());
        assert_eq!(registry.active_table_id(), None);
    }

    #[test]
    fn load_all_on_empty_store_has_no_active_table() {
        let store = InMemoryTableStore::new();
        let mut registry = TableRegistry::default();
        registry.set_active(Some(TableId::new("stale")));
        assert!(registry.load_all(&store).is_empty());
        assert!(registry.active_table().is_none());
    }
}
