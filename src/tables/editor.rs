// src/tables/editor.rs
//! Command methods that mutate the active table.
//!
//! Each command computes a new `Table` from the current one, writes it to the
//! durable store and only then swaps it into the registry. A failed write
//! leaves the registry untouched, so memory and store never disagree.

use bevy::log::{error, info, trace, warn};

use super::database::TableStore;
use super::definitions::{CellValue, Column, ColumnId, ColumnType, OptionId, RowId, SelectOption, Table, TableId};
use super::error::{TableError, TableResult};
use super::ids::IdGenerator;
use super::policy;
use super::resources::TableRegistry;
use super::systems::logic::{add_column, add_row, delete_columns, delete_rows, reorder, select_options, update_cell};
use super::systems::logic::reorder::{OrderKind, TableOrder};

pub struct TableEditor<'a> {
    registry: &'a mut TableRegistry,
    store: &'a mut dyn TableStore,
    ids: &'a dyn IdGenerator,
}

impl<'a> TableEditor<'a> {
    pub fn new(
        registry: &'a mut TableRegistry,
        store: &'a mut dyn TableStore,
        ids: &'a dyn IdGenerator,
    ) -> Self {
        TableEditor { registry, store, ids }
    }

    pub fn registry(&self) -> &TableRegistry {
        &*self.registry
    }

    pub fn active_table_id(&self) -> Option<TableId> {
        self.registry.active_table_id().cloned()
    }

    fn active(&self) -> TableResult<&Table> {
        self.registry.active_table().ok_or(TableError::NoActiveTable)
    }

    /// Write-through commit: store first, registry second.
    fn commit(&mut self, next: Table) -> TableResult<()> {
        self.store.put(&next)?;
        self.registry.replace_table(next);
        Ok(())
    }

    pub fn add_row(&mut self) -> TableResult<RowId> {
        self.try_add_row().inspect_err(|e| log_failure("add row", e))
    }

    fn try_add_row(&mut self) -> TableResult<RowId> {
        let row_id = RowId::new(self.ids.new_id());
        let next = add_row::append_row(self.active()?, row_id.clone(), policy::today());
        self.commit(next)?;
        info!("Added row '{}'.", row_id);
        Ok(row_id)
    }

    pub fn add_column(&mut self, name: &str, column_type: ColumnType) -> TableResult<Column> {
        self.try_add_column(name, column_type)
            .inspect_err(|e| log_failure("add column", e))
    }

    fn try_add_column(&mut self, name: &str, column_type: ColumnType) -> TableResult<Column> {
        let column_id = ColumnId::new(self.ids.new_id());
        let (next, column) =
            add_column::append_column(self.active()?, column_id, name, column_type, policy::today())?;
        let row_count = next.rows.len();
        self.commit(next)?;
        info!(
            "Added {} column '{}' ({}), backfilled {} row(s).",
            column.column_type, column.name, column.id, row_count
        );
        Ok(column)
    }

    /// Stores `value` without checking it against the column type; text
    /// input goes through [`TableEditor::edit_cell_from_input`]. Non-finite
    /// numbers are stored as no number.
    pub fn edit_cell(&mut self, row_id: &RowId, column_id: &ColumnId, value: CellValue) -> TableResult<()> {
        self.try_edit_cell(row_id, column_id, value)
            .inspect_err(|e| log_failure("edit cell", e))
    }

    fn try_edit_cell(&mut self, row_id: &RowId, column_id: &ColumnId, value: CellValue) -> TableResult<()> {
        let value = policy::storable_value(value);
        let table = self.active()?;
        if table.cell(row_id, column_id) == Some(&value) {
            trace!("Cell [{}, {}] unchanged. Skipping write.", row_id, column_id);
            return Ok(());
        }
        let next = update_cell::replace_cell(table, row_id, column_id, value)?;
        self.commit(next)?;
        info!("Updated cell [{}, {}].", row_id, column_id);
        Ok(())
    }

    /// Normalizes raw editor text for the column's type, then stores it.
    /// Returns the value that was stored.
    pub fn edit_cell_from_input(
        &mut self,
        row_id: &RowId,
        column_id: &ColumnId,
        raw: &str,
    ) -> TableResult<CellValue> {
        let value = self
            .normalized_input(row_id, column_id, raw)
            .inspect_err(|e| log_failure("edit cell", e))?;
        self.edit_cell(row_id, column_id, value.clone())?;
        Ok(value)
    }

    fn normalized_input(&self, row_id: &RowId, column_id: &ColumnId, raw: &str) -> TableResult<CellValue> {
        let table = self.active()?;
        let row = table
            .row(row_id)
            .ok_or_else(|| TableError::RowNotFound(row_id.clone()))?;
        let column = table
            .column(column_id)
            .ok_or_else(|| TableError::ColumnNotFound(column_id.clone()))?;
        let prior = row
            .get(column_id)
            .map(|cell| cell.value.clone())
            .unwrap_or_else(|| policy::default_value_for_type(column.column_type));
        Ok(policy::normalize_cell_input(column, raw, &prior))
    }

    /// Flips a checkbox cell and returns the new state.
    pub fn toggle_checkbox(&mut self, row_id: &RowId, column_id: &ColumnId) -> TableResult<bool> {
        let toggled = self
            .toggled_value(row_id, column_id)
            .inspect_err(|e| log_failure("toggle checkbox", e))?;
        let checked = matches!(toggled, CellValue::Checkbox(true));
        self.edit_cell(row_id, column_id, toggled)?;
        Ok(checked)
    }

    fn toggled_value(&self, row_id: &RowId, column_id: &ColumnId) -> TableResult<CellValue> {
        let table = self.active()?;
        let column = table
            .column(column_id)
            .ok_or_else(|| TableError::ColumnNotFound(column_id.clone()))?;
        if column.column_type != ColumnType::Checkbox {
            return Err(TableError::UnsupportedColumnType {
                column_id: column_id.clone(),
                column_type: column.column_type,
                operation: "toggling",
            });
        }
        let prior = table
            .cell(row_id, column_id)
            .ok_or_else(|| TableError::RowNotFound(row_id.clone()))?;
        Ok(policy::toggled(prior))
    }

    pub fn delete_row(&mut self, row_id: &RowId) -> TableResult<()> {
        self.try_delete_row(row_id)
            .inspect_err(|e| log_failure("delete row", e))
    }

    fn try_delete_row(&mut self, row_id: &RowId) -> TableResult<()> {
        let next = delete_rows::remove_row(self.active()?, row_id)?;
        self.commit(next)?;
        info!("Deleted row '{}'.", row_id);
        Ok(())
    }

    pub fn delete_column(&mut self, column_id: &ColumnId) -> TableResult<()> {
        self.try_delete_column(column_id)
            .inspect_err(|e| log_failure("delete column", e))
    }

    fn try_delete_column(&mut self, column_id: &ColumnId) -> TableResult<()> {
        let next = delete_columns::remove_column(self.active()?, column_id)?;
        self.commit(next)?;
        info!("Deleted column '{}' from every row.", column_id);
        Ok(())
    }

    pub fn add_select_option(&mut self, column_id: &ColumnId, name: &str) -> TableResult<SelectOption> {
        self.try_add_select_option(column_id, name)
            .inspect_err(|e| log_failure("add select option", e))
    }

    fn try_add_select_option(&mut self, column_id: &ColumnId, name: &str) -> TableResult<SelectOption> {
        let option_id = OptionId::new(self.ids.new_id());
        let (next, option) =
            select_options::append_select_option(self.active()?, column_id, option_id, name)?;
        self.commit(next)?;
        info!("Added option '{}' to column '{}'.", option.name, column_id);
        Ok(option)
    }

    /// Removes an option and clears it from every cell that referenced it.
    pub fn remove_select_option(&mut self, column_id: &ColumnId, option_id: &OptionId) -> TableResult<()> {
        self.try_remove_select_option(column_id, option_id)
            .inspect_err(|e| log_failure("remove select option", e))
    }

    fn try_remove_select_option(&mut self, column_id: &ColumnId, option_id: &OptionId) -> TableResult<()> {
        let next = select_options::remove_select_option(self.active()?, column_id, option_id)?;
        self.commit(next)?;
        info!("Removed option '{}' from column '{}'.", option_id, column_id);
        Ok(())
    }

    /// Replaces the column or row order wholesale. The new order must be a
    /// permutation of the current one.
    pub fn reorder(&mut self, order: TableOrder) -> TableResult<()> {
        let kind = order.kind();
        self.try_reorder(order)
            .inspect_err(|e| log_failure(&format!("reorder {}s", kind), e))
    }

    fn try_reorder(&mut self, order: TableOrder) -> TableResult<()> {
        let kind = order.kind();
        let next = reorder::apply_order(self.active()?, order)?;
        self.commit(next)?;
        info!("Reordered {}s.", kind);
        Ok(())
    }

    /// Drag-drop completion: moves `active_id` to the slot of `over_id`
    /// (remove then insert). Returns `false` when dropped onto itself.
    pub fn move_item(&mut self, kind: OrderKind, active_id: &str, over_id: &str) -> TableResult<bool> {
        let order = self
            .moved_order(kind, active_id, over_id)
            .inspect_err(|e| log_failure(&format!("move {}", kind), e))?;
        match order {
            Some(order) => {
                self.reorder(order)?;
                Ok(true)
            }
            None => {
                trace!("Dropped {} '{}' onto itself. Nothing to move.", kind, active_id);
                Ok(false)
            }
        }
    }

    fn moved_order(&self, kind: OrderKind, active_id: &str, over_id: &str) -> TableResult<Option<TableOrder>> {
        let table = self.active()?;
        match kind {
            OrderKind::Column => {
                let (active, over) = (ColumnId::new(active_id), ColumnId::new(over_id));
                for id in [&active, &over] {
                    if !table.column_order.contains(id) {
                        return Err(TableError::ColumnNotFound(id.clone()));
                    }
                }
                Ok(reorder::moved_order(&table.column_order, &active, &over).map(TableOrder::Columns))
            }
            OrderKind::Row => {
                let (active, over) = (RowId::new(active_id), RowId::new(over_id));
                for id in [&active, &over] {
                    if !table.row_order.contains(id) {
                        return Err(TableError::RowNotFound(id.clone()));
                    }
                }
                Ok(reorder::moved_order(&table.row_order, &active, &over).map(TableOrder::Rows))
            }
        }
    }
}

fn log_failure(action: &str, err: &TableError) {
    if err.is_persistence_failure() {
        error!("Failed to {}: {}", action, err);
    } else {
        warn!("Rejected {}: {}", action, err);
    }
}
