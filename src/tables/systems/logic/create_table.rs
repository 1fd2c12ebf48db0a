// src/tables/systems/logic/create_table.rs
use bevy::prelude::*;
use chrono::NaiveDate;

use crate::tables::{
    definitions::{CellData, Column, ColumnId, ColumnType, RowData, RowId, Table, TableId},
    events::{RequestCreateTable, TableDataModifiedEvent, TableOperationFeedback},
    policy,
    resources::{TableIdSource, TableRegistry, TableStoreResource},
};

use super::{report_failure, report_success};

/// Name given to the single column a new table starts with ("Name").
pub const DEFAULT_COLUMN_NAME: &str = "名称";

/// A fresh table: one Text column and one row holding its default value.
pub fn build_new_table(
    table_id: TableId,
    column_id: ColumnId,
    row_id: RowId,
    name: &str,
    today: NaiveDate,
) -> Table {
    let mut table = Table::empty(table_id, name);
    let column = Column::new(column_id.clone(), DEFAULT_COLUMN_NAME, ColumnType::Text, 0);

    let mut row = RowData::new();
    row.insert(
        column_id.clone(),
        CellData::new(policy::default_value_on(column.column_type, today)),
    );

    table.columns.push(column);
    table.column_order.push(column_id);
    table.rows.insert(row_id.clone(), row);
    table.row_order.push(row_id);
    table
}

pub fn handle_create_table_request(
    mut events: EventReader<RequestCreateTable>,
    mut registry: ResMut<TableRegistry>,
    mut store: ResMut<TableStoreResource>,
    ids: Res<TableIdSource>,
    mut feedback_writer: EventWriter<TableOperationFeedback>,
    mut data_modified_writer: EventWriter<TableDataModifiedEvent>,
) {
    for event in events.read() {
        match registry.create_table(store.store_mut(), ids.generator(), &event.name) {
            Ok(table) => report_success(
                &mut feedback_writer,
                &mut data_modified_writer,
                Some(table.id.clone()),
                format!("Created table '{}'.", table.name),
            ),
            Err(e) => report_failure(&mut feedback_writer, "Create table", &e),
        }
    }
}
