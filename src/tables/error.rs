// src/tables/error.rs
use thiserror::Error;

use super::database::DbError;
use super::definitions::{ColumnId, ColumnType, OptionId, RowId, TableId};
use super::systems::logic::reorder::OrderKind;

/// Failure of a registry or mutation command. Every variant except
/// `Persistence` is a caller-input error; none of them leave a partial change
/// behind.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("No active table is selected.")]
    NoActiveTable,
    #[error("Table '{0}' not found.")]
    TableNotFound(TableId),
    #[error("Row '{0}' not found.")]
    RowNotFound(RowId),
    #[error("Column '{0}' not found.")]
    ColumnNotFound(ColumnId),
    #[error("Option '{option_id}' not found in column '{column_id}'.")]
    OptionNotFound { column_id: ColumnId, option_id: OptionId },
    #[error("The name '{0}' is already in use.")]
    DuplicateName(String),
    #[error("Name cannot be empty or just whitespace.")]
    EmptyName,
    #[error("Column '{column_id}' has type {column_type}, which does not support {operation}.")]
    UnsupportedColumnType {
        column_id: ColumnId,
        column_type: ColumnType,
        operation: &'static str,
    },
    #[error("Invalid {kind} order: {reason}")]
    InvalidOrder { kind: OrderKind, reason: String },
    #[error("Persistence failed: {0}")]
    Persistence(#[from] DbError),
}

impl TableError {
    /// True when the durable store rejected the write. All other errors are
    /// rejected inputs.
    pub fn is_persistence_failure(&self) -> bool {
        matches!(self, TableError::Persistence(_))
    }
}

pub type TableResult<T> = Result<T, TableError>;
