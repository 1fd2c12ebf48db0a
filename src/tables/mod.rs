// src/tables/mod.rs

pub mod database;
pub mod definitions;
pub mod editor;
pub mod error;
pub mod events;
pub mod ids;
pub mod plugin;
pub mod policy;
pub mod resources;

pub(crate) mod systems;

pub use definitions::{CellValue, Column, ColumnId, ColumnType, OptionId, RowId, SelectOption, Table, TableId};
pub use editor::TableEditor;
pub use error::{TableError, TableResult};
pub use plugin::{TableSystemSet, TablesPlugin};
pub use resources::{TableIdSource, TableRegistry, TableStoreResource};
pub use systems::logic::create_table::DEFAULT_COLUMN_NAME;
pub use systems::logic::reorder::{move_element, moved_order, validate_permutation, OrderKind, TableOrder};
