// src/tables/systems/logic/delete_columns.rs
use bevy::prelude::*;

use crate::tables::{
    definitions::{ColumnId, Table},
    editor::TableEditor,
    error::{TableError, TableResult},
    events::{RequestDeleteColumn, TableDataModifiedEvent, TableOperationFeedback},
    resources::{TableIdSource, TableRegistry, TableStoreResource},
};

use super::{report_failure, report_success};

/// Drops the column definition, its order entry and its cell in every row.
pub fn remove_column(table: &Table, column_id: &ColumnId) -> TableResult<Table> {
    if table.column(column_id).is_none() {
        return Err(TableError::ColumnNotFound(column_id.clone()));
    }
    let mut next = table.clone();
    next.columns.retain(|c| &c.id != column_id);
    next.column_order.retain(|id| id != column_id);
    for row in next.rows.values_mut() {
        row.remove(column_id);
    }
    Ok(next)
}

pub fn handle_delete_column_request(
    mut events: EventReader<RequestDeleteColumn>,
    mut registry: ResMut<TableRegistry>,
    mut store: ResMut<TableStoreResource>,
    ids: Res<TableIdSource>,
    mut feedback_writer: EventWriter<TableOperationFeedback>,
    mut data_modified_writer: EventWriter<TableDataModifiedEvent>,
) {
    for event in events.read() {
        let mut editor = TableEditor::new(&mut registry, store.store_mut(), ids.generator());
        match editor.delete_column(&event.column_id) {
            Ok(()) => report_success(
                &mut feedback_writer,
                &mut data_modified_writer,
                editor.active_table_id(),
                format!("Deleted column '{}'.", event.column_id),
            ),
            Err(e) => report_failure(&mut feedback_writer, "Delete column", &e),
        }
    }
}
