// src/tables/systems/logic/update_cell.rs
use bevy::prelude::*;

use crate::tables::{
    definitions::{CellData, CellValue, ColumnId, RowId, Table},
    editor::TableEditor,
    error::{TableError, TableResult},
    events::{TableDataModifiedEvent, TableOperationFeedback, UpdateCellEvent},
    policy,
    resources::{TableIdSource, TableRegistry, TableStoreResource},
};

use super::{report_failure, report_success};

/// Stores `value` in one cell. Its variant is not checked against the column
/// type; only numbers JSON cannot hold are cleared (see `storable_value`).
pub fn replace_cell(
    table: &Table,
    row_id: &RowId,
    column_id: &ColumnId,
    value: CellValue,
) -> TableResult<Table> {
    if table.column(column_id).is_none() {
        return Err(TableError::ColumnNotFound(column_id.clone()));
    }
    let mut next = table.clone();
    let row = next
        .rows
        .get_mut(row_id)
        .ok_or_else(|| TableError::RowNotFound(row_id.clone()))?;
    row.insert(column_id.clone(), CellData::new(policy::storable_value(value)));
    Ok(next)
}

pub fn handle_cell_update(
    mut events: EventReader<UpdateCellEvent>,
    mut registry: ResMut<TableRegistry>,
    mut store: ResMut<TableStoreResource>,
    ids: Res<TableIdSource>,
    mut feedback_writer: EventWriter<TableOperationFeedback>,
    mut data_modified_writer: EventWriter<TableDataModifiedEvent>,
) {
    for event in events.read() {
        let mut editor = TableEditor::new(&mut registry, store.store_mut(), ids.generator());
        match editor.edit_cell(&event.row_id, &event.column_id, event.value.clone()) {
            Ok(()) => report_success(
                &mut feedback_writer,
                &mut data_modified_writer,
                editor.active_table_id(),
                format!("Updated cell [{}, {}].", event.row_id, event.column_id),
            ),
            Err(e) => report_failure(&mut feedback_writer, "Cell update", &e),
        }
    }
}
