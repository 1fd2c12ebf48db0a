// src/cli/error.rs
use std::path::PathBuf;
use thiserror::Error;

use crate::tables::database::DbError;
use crate::tables::TableError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to open table database {path:?}: {source}")]
    Database { path: PathBuf, source: DbError },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("No table matches '{0}'.")]
    UnknownTable(String),
    #[error("No column matches '{reference}' in table '{table}'.")]
    UnknownColumn { reference: String, table: String },
    #[error("No row matches '{reference}' in table '{table}'.")]
    UnknownRow { reference: String, table: String },
    #[error("No option matches '{reference}' in column '{column}'.")]
    UnknownOption { reference: String, column: String },
    #[error("Unknown column type '{given}'. Expected one of: {expected}.")]
    UnknownColumnType { given: String, expected: String },
    #[error(transparent)]
    Table(#[from] TableError),
    /// A request event was answered with error feedback.
    #[error("{0}")]
    Rejected(String),
}

pub type CliResult<T> = Result<T, CliError>;
