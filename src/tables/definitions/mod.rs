// src/tables/definitions/mod.rs

pub mod cell_value;
pub mod column_definition;
pub mod column_type;
pub mod identifiers;
pub mod table_data;

pub use cell_value::{CellData, CellValue};
pub use column_definition::{Column, SelectOption};
pub use column_type::{parse_column_type, ColumnType};
pub use identifiers::{ColumnId, OptionId, RowId, TableId};
pub use table_data::{OrderedRow, RowData, Table};
