// src/tables/systems/io.rs
use bevy::prelude::*;

use crate::tables::{
    events::{RequestReloadTables, TableOperationFeedback},
    resources::{TableRegistry, TableStoreResource},
};

/// Startup: fills the registry from the durable store.
pub fn load_tables_on_startup(mut registry: ResMut<TableRegistry>, store: Res<TableStoreResource>) {
    let count = registry.load_all(store.store()).len();
    info!("Startup load complete: {} table(s) available.", count);
}

pub fn handle_reload_request(
    mut events: EventReader<RequestReloadTables>,
    mut registry: ResMut<TableRegistry>,
    store: Res<TableStoreResource>,
    mut feedback_writer: EventWriter<TableOperationFeedback>,
) {
    // Several queued reloads collapse into one.
    if events.read().count() == 0 {
        return;
    }
    let count = registry.load_all(store.store()).len();
    feedback_writer.write(TableOperationFeedback {
        message: format!("Reloaded {} table(s).", count),
        is_error: false,
    });
}
