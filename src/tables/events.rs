// src/tables/events.rs
use bevy::prelude::Event;

use super::definitions::{CellValue, ColumnId, ColumnType, OptionId, RowId, TableId};
use super::systems::logic::reorder::{OrderKind, TableOrder};

/// Selects a table (or clears the selection with `None`).
/// Handled by `systems::logic::handle_set_active_request`.
#[derive(Event, Debug, Clone)]
pub struct RequestSetActiveTable {
    pub table_id: Option<TableId>,
}

#[derive(Event, Debug, Clone)]
pub struct RequestCreateTable {
    pub name: String,
}

#[derive(Event, Debug, Clone)]
pub struct RequestDeleteTable {
    pub table_id: TableId,
}

/// Appends a column to the active table.
#[derive(Event, Debug, Clone)]
pub struct RequestAddColumn {
    pub name: String,
    pub column_type: ColumnType,
}

#[derive(Event, Debug, Clone)]
pub struct RequestDeleteColumn {
    pub column_id: ColumnId,
}

#[derive(Event, Debug, Clone)]
pub struct RequestAddSelectOption {
    pub column_id: ColumnId,
    pub name: String,
}

#[derive(Event, Debug, Clone)]
pub struct RequestRemoveSelectOption {
    pub column_id: ColumnId,
    pub option_id: OptionId,
}

/// Appends a row with default values to the active table.
#[derive(Event, Debug, Clone)]
pub struct RequestAddRow;

#[derive(Event, Debug, Clone)]
pub struct RequestDeleteRow {
    pub row_id: RowId,
}

/// Stores a value in one cell of the active table.
#[derive(Event, Debug, Clone)]
pub struct UpdateCellEvent {
    pub row_id: RowId,
    pub column_id: ColumnId,
    pub value: CellValue,
}

/// Replaces the column or row order of the active table.
#[derive(Event, Debug, Clone)]
pub struct RequestReorder {
    pub order: TableOrder,
}

/// Drag-and-drop completion: `active_id` was dropped onto `over_id`.
#[derive(Event, Debug, Clone)]
pub struct RequestMoveItem {
    pub kind: OrderKind,
    pub active_id: String,
    pub over_id: String,
}

/// Re-reads every table from the durable store.
#[derive(Event, Debug, Clone)]
pub struct RequestReloadTables;

/// Outcome of a request, for display to the user.
#[derive(Event, Debug, Clone)]
pub struct TableOperationFeedback {
    pub message: String,
    pub is_error: bool,
}

/// Sent after a table was committed to the store and the registry.
#[derive(Event, Debug, Clone)]
pub struct TableDataModifiedEvent {
    pub table_id: TableId,
}
