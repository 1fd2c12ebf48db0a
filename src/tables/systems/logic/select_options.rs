// src/tables/systems/logic/select_options.rs
use bevy::prelude::*;

use crate::tables::{
    definitions::{CellValue, ColumnId, OptionId, SelectOption, Table},
    editor::TableEditor,
    error::{TableError, TableResult},
    events::{
        RequestAddSelectOption, RequestRemoveSelectOption, TableDataModifiedEvent,
        TableOperationFeedback,
    },
    resources::{TableIdSource, TableRegistry, TableStoreResource},
};

use super::{report_failure, report_success, validated_name};

fn select_column_check(table: &Table, column_id: &ColumnId, operation: &'static str) -> TableResult<()> {
    let column = table
        .column(column_id)
        .ok_or_else(|| TableError::ColumnNotFound(column_id.clone()))?;
    if !column.column_type.is_select() {
        return Err(TableError::UnsupportedColumnType {
            column_id: column_id.clone(),
            column_type: column.column_type,
            operation,
        });
    }
    Ok(())
}

/// Appends an option to a SingleSelect or MultiSelect column.
pub fn append_select_option(
    table: &Table,
    column_id: &ColumnId,
    option_id: OptionId,
    name: &str,
) -> TableResult<(Table, SelectOption)> {
    select_column_check(table, column_id, "adding options")?;
    let name = validated_name(name)?;

    let mut next = table.clone();
    let column = next
        .column_mut(column_id)
        .ok_or_else(|| TableError::ColumnNotFound(column_id.clone()))?;
    let options = column.options.get_or_insert_with(Vec::new);
    if options.iter().any(|o| o.name == name) {
        return Err(TableError::DuplicateName(name));
    }
    let option = SelectOption { id: option_id, name };
    options.push(option.clone());
    Ok((next, option))
}

/// Removes an option and clears every cell reference to it: a SingleSelect
/// cell holding it becomes empty, MultiSelect cells drop it from their list.
pub fn remove_select_option(table: &Table, column_id: &ColumnId, option_id: &OptionId) -> TableResult<Table> {
    select_column_check(table, column_id, "removing options")?;

    let mut next = table.clone();
    let column = next
        .column_mut(column_id)
        .ok_or_else(|| TableError::ColumnNotFound(column_id.clone()))?;
    let options = column.options.get_or_insert_with(Vec::new);
    let before = options.len();
    options.retain(|o| &o.id != option_id);
    if options.len() == before {
        return Err(TableError::OptionNotFound {
            column_id: column_id.clone(),
            option_id: option_id.clone(),
        });
    }

    for row in next.rows.values_mut() {
        let Some(cell) = row.get_mut(column_id) else {
            continue;
        };
        match &mut cell.value {
            CellValue::SingleSelect(selected) if selected.as_ref() == Some(option_id) => {
                *selected = None;
            }
            CellValue::MultiSelect(selected) => selected.retain(|id| id != option_id),
            _ => {}
        }
    }
    Ok(next)
}

pub fn handle_add_select_option_request(
    mut events: EventReader<RequestAddSelectOption>,
    mut registry: ResMut<TableRegistry>,
    mut store: ResMut<TableStoreResource>,
    ids: Res<TableIdSource>,
    mut feedback_writer: EventWriter<TableOperationFeedback>,
    mut data_modified_writer: EventWriter<TableDataModifiedEvent>,
) {
    for event in events.read() {
        let mut editor = TableEditor::new(&mut registry, store.store_mut(), ids.generator());
        match editor.add_select_option(&event.column_id, &event.name) {
            Ok(option) => report_success(
                &mut feedback_writer,
                &mut data_modified_writer,
                editor.active_table_id(),
                format!("Added option '{}'.", option.name),
            ),
            Err(e) => report_failure(&mut feedback_writer, "Add option", &e),
        }
    }
}

pub fn handle_remove_select_option_request(
    mut events: EventReader<RequestRemoveSelectOption>,
    mut registry: ResMut<TableRegistry>,
    mut store: ResMut<TableStoreResource>,
    ids: Res<TableIdSource>,
    mut feedback_writer: EventWriter<TableOperationFeedback>,
    mut data_modified_writer: EventWriter<TableDataModifiedEvent>,
) {
    for event in events.read() {
        let mut editor = TableEditor::new(&mut registry, store.store_mut(), ids.generator());
        match editor.remove_select_option(&event.column_id, &event.option_id) {
            Ok(()) => report_success(
                &mut feedback_writer,
                &mut data_modified_writer,
                editor.active_table_id(),
                format!("Removed option '{}'.", event.option_id),
            ),
            Err(e) => report_failure(&mut feedback_writer, "Remove option", &e),
        }
    }
}
