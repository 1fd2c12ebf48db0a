// src/cli/resolve.rs
//! Maps what the user typed (an id, a name or a 1-based position) to
//! tables, columns, rows and options.

use crate::tables::{Column, ColumnType, RowId, SelectOption, Table, TableRegistry};
use crate::tables::definitions::parse_column_type;

use super::error::{CliError, CliResult};

fn position(reference: &str, len: usize) -> Option<usize> {
    reference
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=len).contains(n))
        .map(|n| n - 1)
}

pub fn resolve_table<'a>(registry: &'a TableRegistry, reference: &str) -> CliResult<&'a Table> {
    let tables = registry.tables();
    tables
        .iter()
        .find(|t| t.id.as_str() == reference)
        .or_else(|| tables.iter().find(|t| t.name == reference))
        .or_else(|| position(reference, tables.len()).map(|i| &tables[i]))
        .ok_or_else(|| CliError::UnknownTable(reference.to_string()))
}

pub fn resolve_column<'a>(table: &'a Table, reference: &str) -> CliResult<&'a Column> {
    let columns = table.ordered_columns();
    columns
        .iter()
        .find(|c| c.id.as_str() == reference)
        .or_else(|| columns.iter().find(|c| c.name == reference))
        .or_else(|| position(reference, columns.len()).map(|i| &columns[i]))
        .copied()
        .ok_or_else(|| CliError::UnknownColumn {
            reference: reference.to_string(),
            table: table.name.clone(),
        })
}

pub fn resolve_row<'a>(table: &'a Table, reference: &str) -> CliResult<&'a RowId> {
    table
        .row_order
        .iter()
        .find(|id| id.as_str() == reference)
        .or_else(|| position(reference, table.row_order.len()).map(|i| &table.row_order[i]))
        .ok_or_else(|| CliError::UnknownRow {
            reference: reference.to_string(),
            table: table.name.clone(),
        })
}

pub fn resolve_option<'a>(column: &'a Column, reference: &str) -> CliResult<&'a SelectOption> {
    column
        .resolve_option(reference)
        .ok_or_else(|| CliError::UnknownOption {
            reference: reference.to_string(),
            column: column.name.clone(),
        })
}

pub fn column_type_arg(raw: &str) -> CliResult<ColumnType> {
    parse_column_type(raw).ok_or_else(|| CliError::UnknownColumnType {
        given: raw.to_string(),
        expected: ColumnType::ALL
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
    })
}
