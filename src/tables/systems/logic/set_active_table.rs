// src/tables/systems/logic/set_active_table.rs
use bevy::prelude::*;

use crate::tables::{events::RequestSetActiveTable, resources::TableRegistry};

pub fn handle_set_active_request(
    mut events: EventReader<RequestSetActiveTable>,
    mut registry: ResMut<TableRegistry>,
) {
    // Only the latest selection in a frame matters.
    if let Some(event) = events.read().last() {
        if let Some(id) = &event.table_id {
            if !registry.contains(id) {
                debug!("Selecting table '{}' which is not loaded.", id);
            }
        }
        registry.set_active(event.table_id.clone());
    }
}
