// src/tables/systems/logic/delete_rows.rs
use bevy::prelude::*;

use crate::tables::{
    definitions::{RowId, Table},
    editor::TableEditor,
    error::{TableError, TableResult},
    events::{RequestDeleteRow, TableDataModifiedEvent, TableOperationFeedback},
    resources::{TableIdSource, TableRegistry, TableStoreResource},
};

use super::{report_failure, report_success};

pub fn remove_row(table: &Table, row_id: &RowId) -> TableResult<Table> {
    let mut next = table.clone();
    if next.rows.remove(row_id).is_none() {
        return Err(TableError::RowNotFound(row_id.clone()));
    }
    next.row_order.retain(|id| id != row_id);
    Ok(next)
}

pub fn handle_delete_row_request(
    mut events: EventReader<RequestDeleteRow>,
    mut registry: ResMut<TableRegistry>,
    mut store: ResMut<TableStoreResource>,
    ids: Res<TableIdSource>,
    mut feedback_writer: EventWriter<TableOperationFeedback>,
    mut data_modified_writer: EventWriter<TableDataModifiedEvent>,
) {
    for event in events.read() {
        let mut editor = TableEditor::new(&mut registry, store.store_mut(), ids.generator());
        match editor.delete_row(&event.row_id) {
            Ok(()) => report_success(
                &mut feedback_writer,
                &mut data_modified_writer,
                editor.active_table_id(),
                format!("Deleted row '{}'.", event.row_id),
            ),
            Err(e) => report_failure(&mut feedback_writer, "Delete row", &e),
        }
    }
}
