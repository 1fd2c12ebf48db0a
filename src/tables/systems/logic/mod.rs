// src/tables/systems/logic/mod.rs

// One module per command: the pure table transformation plus the system
// that serves its request event.
pub mod add_column;
pub mod add_row;
pub mod create_table;
pub mod delete_columns;
pub mod delete_rows;
pub mod delete_table;
pub mod reorder;
pub mod select_options;
pub mod set_active_table;
pub mod update_cell;

pub use add_column::handle_add_column_request;
pub use add_row::handle_add_row_request;
pub use create_table::handle_create_table_request;
pub use delete_columns::handle_delete_column_request;
pub use delete_rows::handle_delete_row_request;
pub use delete_table::handle_delete_table_request;
pub use reorder::{handle_move_item_request, handle_reorder_request};
pub use select_options::{handle_add_select_option_request, handle_remove_select_option_request};
pub use set_active_table::handle_set_active_request;
pub use update_cell::handle_cell_update;

use bevy::prelude::*;

use crate::tables::{
    definitions::TableId,
    error::{TableError, TableResult},
    events::{TableDataModifiedEvent, TableOperationFeedback},
};

/// Trims a user-supplied table, column or option name.
pub(crate) fn validated_name(raw: &str) -> TableResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(TableError::EmptyName);
    }
    Ok(name.to_string())
}

pub(crate) fn report_success(
    feedback_writer: &mut EventWriter<TableOperationFeedback>,
    data_modified_writer: &mut EventWriter<TableDataModifiedEvent>,
    table_id: Option<TableId>,
    message: String,
) {
    feedback_writer.write(TableOperationFeedback {
        message,
        is_error: false,
    });
    if let Some(table_id) = table_id {
        data_modified_writer.write(TableDataModifiedEvent { table_id });
    }
}

/// The command already logged the failure; this only informs the UI.
pub(crate) fn report_failure(
    feedback_writer: &mut EventWriter<TableOperationFeedback>,
    action: &str,
    err: &TableError,
) {
    feedback_writer.write(TableOperationFeedback {
        message: format!("{} failed: {}", action, err),
        is_error: true,
    });
}
