// src/tables/systems/logic/add_column.rs
use bevy::prelude::*;
use chrono::NaiveDate;

use crate::tables::{
    definitions::{CellData, Column, ColumnId, ColumnType, Table},
    editor::TableEditor,
    error::{TableError, TableResult},
    events::{RequestAddColumn, TableDataModifiedEvent, TableOperationFeedback},
    policy,
    resources::{TableIdSource, TableRegistry, TableStoreResource},
};

use super::{report_failure, report_success, validated_name};

/// Appends a column at the end of the display order and backfills every
/// existing row with the type's default value.
pub fn append_column(
    table: &Table,
    column_id: ColumnId,
    name: &str,
    column_type: ColumnType,
    today: NaiveDate,
) -> TableResult<(Table, Column)> {
    let name = validated_name(name)?;
    if table.column_named(&name).is_some() {
        return Err(TableError::DuplicateName(name));
    }

    let column = Column::new(column_id.clone(), name, column_type, table.columns.len());
    let default_value = policy::default_value_on(column_type, today);

    let mut next = table.clone();
    next.columns.push(column.clone());
    next.column_order.push(column_id.clone());
    for row in next.rows.values_mut() {
        row.insert(column_id.clone(), CellData::new(default_value.clone()));
    }
    Ok((next, column))
}

pub fn handle_add_column_request(
    mut events: EventReader<RequestAddColumn>,
    mut registry: ResMut<TableRegistry>,
    mut store: ResMut<TableStoreResource>,
    ids: Res<TableIdSource>,
    mut feedback_writer: EventWriter<TableOperationFeedback>,
    mut data_modified_writer: EventWriter<TableDataModifiedEvent>,
) {
    for event in events.read() {
        let mut editor = TableEditor::new(&mut registry, store.store_mut(), ids.generator());
        match editor.add_column(&event.name, event.column_type) {
            Ok(column) => report_success(
                &mut feedback_writer,
                &mut data_modified_writer,
                editor.active_table_id(),
                format!("Added {} column '{}'.", column.column_type, column.name),
            ),
            Err(e) => report_failure(&mut feedback_writer, "Add column", &e),
        }
    }
}
