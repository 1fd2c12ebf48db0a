// src/tables/plugin.rs
use bevy::prelude::*;

use super::database::{DbConfig, InMemoryTableStore, SqliteTableStore};
use super::events::{
    RequestAddColumn, RequestAddRow, RequestAddSelectOption, RequestCreateTable,
    RequestDeleteColumn, RequestDeleteRow, RequestDeleteTable, RequestMoveItem,
    RequestReloadTables, RequestRemoveSelectOption, RequestReorder, RequestSetActiveTable,
    TableDataModifiedEvent, TableOperationFeedback, UpdateCellEvent,
};
use super::resources::{TableIdSource, TableRegistry, TableStoreResource};
use super::systems;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TableSystemSet {
    Selection,    // Reloads and active-table changes
    ApplyChanges, // Commands that mutate the active table
}

/// Registers the table registry, the durable store and every request
/// handler. A `TableStoreResource` inserted before this plugin is kept;
/// otherwise the SQLite database in the default data directory is used.
pub struct TablesPlugin;

impl Plugin for TablesPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                TableSystemSet::Selection,
                TableSystemSet::ApplyChanges.after(TableSystemSet::Selection),
            ),
        );

        app.init_resource::<TableRegistry>()
            .init_resource::<TableIdSource>();
        if !app.world().contains_resource::<TableStoreResource>() {
            app.insert_resource(open_default_store());
        }

        app.add_event::<RequestSetActiveTable>()
            .add_event::<RequestCreateTable>()
            .add_event::<RequestDeleteTable>()
            .add_event::<RequestAddColumn>()
            .add_event::<RequestDeleteColumn>()
            .add_event::<RequestAddSelectOption>()
            .add_event::<RequestRemoveSelectOption>()
            .add_event::<RequestAddRow>()
            .add_event::<RequestDeleteRow>()
            .add_event::<UpdateCellEvent>()
            .add_event::<RequestReorder>()
            .add_event::<RequestMoveItem>()
            .add_event::<RequestReloadTables>()
            .add_event::<TableOperationFeedback>()
            .add_event::<TableDataModifiedEvent>();

        app.add_systems(Startup, systems::io::load_tables_on_startup);

        app.add_systems(
            Update,
            (
                systems::io::handle_reload_request,
                systems::logic::handle_set_active_request,
            )
                .chain()
                .in_set(TableSystemSet::Selection),
        );
        app.add_systems(
            Update,
            (
                systems::logic::handle_create_table_request,
                systems::logic::handle_delete_table_request,
                systems::logic::handle_add_column_request,
                systems::logic::handle_delete_column_request,
                systems::logic::handle_add_select_option_request,
                systems::logic::handle_remove_select_option_request,
                systems::logic::handle_add_row_request,
                systems::logic::handle_delete_row_request,
                systems::logic::handle_cell_update,
                systems::logic::handle_reorder_request,
                systems::logic::handle_move_item_request,
            )
                .chain()
                .in_set(TableSystemSet::ApplyChanges),
        );

        info!("TablesPlugin initialized.");
    }
}

fn open_default_store() -> TableStoreResource {
    let config = DbConfig::default();
    if let Err(e) = config.ensure_directories() {
        error!("Failed to create data directory {:?}: {}", config.data_path, e);
    }
    let path = config.database_file();
    match SqliteTableStore::open(&path) {
        Ok(store) => {
            info!("Using table database at {:?}.", path);
            TableStoreResource::new(store)
        }
        Err(e) => {
            error!(
                "Failed to open table database {:?}: {}. Changes will not survive a restart.",
                path, e
            );
            TableStoreResource::new(InMemoryTableStore::new())
        }
    }
}
