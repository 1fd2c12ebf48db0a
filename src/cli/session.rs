// src/cli/session.rs
use bevy::log::LogPlugin;
use bevy::prelude::*;

use crate::tables::events::{RequestSetActiveTable, TableOperationFeedback};
use crate::tables::{
    TableEditor, TableId, TableIdSource, TableRegistry, TableResult, TableStoreResource,
    TablesPlugin,
};

/// A windowless `App` running `TablesPlugin`. Each request is one frame.
pub struct HeadlessSession {
    app: App,
}

impl HeadlessSession {
    pub fn new(store: TableStoreResource) -> Self {
        let mut app = App::new();
        app.insert_resource(store).add_plugins(TablesPlugin);
        Self::start(app)
    }

    pub fn with_log_plugin(store: TableStoreResource, log_plugin: LogPlugin) -> Self {
        let mut app = App::new();
        app.add_plugins(log_plugin)
            .insert_resource(store)
            .add_plugins(TablesPlugin);
        Self::start(app)
    }

    fn start(mut app: App) -> Self {
        // First frame runs Startup, which loads every table.
        app.update();
        Self { app }
    }

    pub fn registry(&self) -> &TableRegistry {
        self.app.world().resource::<TableRegistry>()
    }

    /// Sends `event`, runs one frame and returns the feedback it produced.
    pub fn send<E: Event>(&mut self, event: E) -> Vec<TableOperationFeedback> {
        self.app.world_mut().send_event(event);
        self.run_frame()
    }

    /// Selects `table_id` and sends `event` in the same frame; selection
    /// systems run before the mutation systems.
    pub fn send_to<E: Event>(&mut self, table_id: &TableId, event: E) -> Vec<TableOperationFeedback> {
        let world = self.app.world_mut();
        world.send_event(RequestSetActiveTable {
            table_id: Some(table_id.clone()),
        });
        world.send_event(event);
        self.run_frame()
    }

    /// Runs `edit` against the table directly, outside the event flow.
    pub fn edit<T>(
        &mut self,
        table_id: &TableId,
        edit: impl FnOnce(&mut TableEditor<'_>) -> TableResult<T>,
    ) -> TableResult<T> {
        let world = self.app.world_mut();
        world.resource_scope(|world, mut store: Mut<TableStoreResource>| {
            world.resource_scope(|world, ids: Mut<TableIdSource>| {
                let mut registry = world.resource_mut::<TableRegistry>();
                registry.set_active(Some(table_id.clone()));
                let mut editor = TableEditor::new(&mut registry, store.store_mut(), ids.generator());
                edit(&mut editor)
            })
        })
    }

    fn run_frame(&mut self) -> Vec<TableOperationFeedback> {
        self.app.update();
        self.app
            .world_mut()
            .resource_mut::<Events<TableOperationFeedback>>()
            .drain()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::database::InMemoryTableStore;
    use crate::tables::events::{RequestAddRow, RequestCreateTable};

    #[test]
    fn requests_round_trip_through_the_plugin() {
        let mut session = HeadlessSession::new(TableStoreResource::new(InMemoryTableStore::new()));
        assert!(session.registry().tables().is_empty());

        let feedback = session.send(RequestCreateTable { name: "Books".into() });
        assert_eq!(feedback.len(), 1);
        assert!(!feedback[0].is_error, "{}", feedback[0].message);

        let table_id = session.registry().tables()[0].id.clone();
        let feedback = session.send_to(&table_id, RequestAddRow);
        assert!(feedback.iter().all(|f| !f.is_error));
        assert_eq!(session.registry().tables()[0].rows.len(), 2);
    }

    #[test]
    fn edit_runs_against_the_selected_table() {
        let mut session = HeadlessSession::new(TableStoreResource::new(InMemoryTableStore::new()));
        session.send(RequestCreateTable { name: "Books".into() });
        let table = session.registry().tables()[0].clone();
        let (row, column) = (table.row_order[0].clone(), table.column_order[0].clone());

        let stored = session
            .edit(&table.id, |editor| editor.edit_cell_from_input(&row, &column, "Dune"))
            .unwrap();
        assert_eq!(stored, crate::tables::CellValue::Text("Dune".into()));
        assert_eq!(session.registry().tables()[0].cell(&row, &column), Some(&stored));
    }
}
