// src/tables/systems/logic/delete_table.rs
use bevy::prelude::*;

use crate::tables::{
    events::{RequestDeleteTable, TableDataModifiedEvent, TableOperationFeedback},
    resources::{TableRegistry, TableStoreResource},
};

use super::{report_failure, report_success};

pub fn handle_delete_table_request(
    mut events: EventReader<RequestDeleteTable>,
    mut registry: ResMut<TableRegistry>,
    mut store: ResMut<TableStoreResource>,
    mut feedback_writer: EventWriter<TableOperationFeedback>,
    mut data_modified_writer: EventWriter<TableDataModifiedEvent>,
) {
    for event in events.read() {
        let name = registry
            .get_table(&event.table_id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| event.table_id.to_string());
        match registry.delete_table(store.store_mut(), &event.table_id) {
            // The table is gone, so there is no modified table to announce.
            Ok(()) => report_success(
                &mut feedback_writer,
                &mut data_modified_writer,
                None,
                format!("Deleted table '{}'.", name),
            ),
            Err(e) => report_failure(&mut feedback_writer, "Delete table", &e),
        }
    }
}
