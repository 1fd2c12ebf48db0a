// src/tables/systems/logic/add_row.rs
use bevy::prelude::*;
use chrono::NaiveDate;

use crate::tables::{
    definitions::{CellData, RowData, RowId, Table},
    editor::TableEditor,
    events::{RequestAddRow, TableDataModifiedEvent, TableOperationFeedback},
    policy,
    resources::{TableIdSource, TableRegistry, TableStoreResource},
};

use super::{report_failure, report_success};

/// Appends a row with a default cell for every live column.
pub fn append_row(table: &Table, row_id: RowId, today: NaiveDate) -> Table {
    let mut next = table.clone();
    let row: RowData = next
        .columns
        .iter()
        .map(|col| {
            (
                col.id.clone(),
                CellData::new(policy::default_value_on(col.column_type, today)),
            )
        })
        .collect();
    next.rows.insert(row_id.clone(), row);
    next.row_order.push(row_id);
    next
}

pub fn handle_add_row_request(
    mut events: EventReader<RequestAddRow>,
    mut registry: ResMut<TableRegistry>,
    mut store: ResMut<TableStoreResource>,
    ids: Res<TableIdSource>,
    mut feedback_writer: EventWriter<TableOperationFeedback>,
    mut data_modified_writer: EventWriter<TableDataModifiedEvent>,
) {
    for _ in events.read() {
        let mut editor = TableEditor::new(&mut registry, store.store_mut(), ids.generator());
        match editor.add_row() {
            Ok(row_id) => report_success(
                &mut feedback_writer,
                &mut data_modified_writer,
                editor.active_table_id(),
                format!("Added row '{}'.", row_id),
            ),
            Err(e) => report_failure(&mut feedback_writer, "Add row", &e),
        }
    }
}
