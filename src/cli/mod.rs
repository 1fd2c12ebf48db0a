// src/cli/mod.rs
// Command-line front end: drives TablesPlugin in a headless app.

pub mod error;
pub mod render;
pub mod resolve;
pub mod session;

pub use error::{CliError, CliResult};
pub use session::HeadlessSession;

use bevy::log::LogPlugin;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::settings::{self, AppSettings};
use crate::tables::database::{DbConfig, SqliteTableStore};
use crate::tables::events::{
    RequestAddColumn, RequestAddRow, RequestAddSelectOption, RequestCreateTable,
    RequestDeleteColumn, RequestDeleteRow, RequestDeleteTable, RequestMoveItem,
    RequestRemoveSelectOption, RequestReorder, TableOperationFeedback,
};
use crate::tables::{OrderKind, TableId, TableOrder, TableStoreResource};

use resolve::{column_type_arg, resolve_column, resolve_option, resolve_row, resolve_table};

#[derive(Parser, Debug)]
#[command(name = "tabledesk")]
#[command(about = "TableDesk - local tables with typed columns", long_about = None)]
pub struct Cli {
    /// Database file to use instead of the configured one
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Tables, columns, rows and options can be given by id, by name or by their
/// 1-based position as printed by `tables` and `show`.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all tables, newest first
    Tables,
    /// Create a table with one text column and one empty row
    Create { name: String },
    /// Delete a table
    Delete { table: String },
    /// Print a table
    Show { table: String },
    /// Append a column (text, number, date, checkbox, single-select, multi-select)
    AddColumn {
        table: String,
        name: String,
        column_type: String,
    },
    /// Delete a column and its value in every row
    DeleteColumn { table: String, column: String },
    /// Add an option to a select column
    AddOption {
        table: String,
        column: String,
        name: String,
    },
    /// Remove an option from a select column and from every cell using it
    RemoveOption {
        table: String,
        column: String,
        option: String,
    },
    /// Append a row with default values
    AddRow { table: String },
    /// Delete a row
    DeleteRow { table: String, row: String },
    /// Set a cell from text, interpreted according to the column type
    SetCell {
        table: String,
        row: String,
        column: String,
        value: String,
    },
    /// Flip a checkbox cell
    Toggle {
        table: String,
        row: String,
        column: String,
    },
    /// Move a column to the position of another column
    MoveColumn {
        table: String,
        column: String,
        over: String,
    },
    /// Move a row to the position of another row
    MoveRow {
        table: String,
        row: String,
        over: String,
    },
    /// Set the full column order
    ReorderColumns {
        table: String,
        #[arg(required = true, num_args = 1..)]
        columns: Vec<String>,
    },
    /// Set the full row order
    ReorderRows {
        table: String,
        #[arg(required = true, num_args = 1..)]
        rows: Vec<String>,
    },
    /// Show or change the saved settings
    Config {
        /// Remember this database file
        #[arg(long)]
        set_db: Option<PathBuf>,
        /// Log level: error, warn, info, debug or trace
        #[arg(long)]
        set_log_level: Option<String>,
    },
}

pub fn run(cli: Cli, settings: AppSettings) -> CliResult<()> {
    if let Commands::Config { set_db, set_log_level } = cli.command {
        return configure(settings, set_db, set_log_level);
    }

    let path = settings.database_file(cli.db.as_ref());
    DbConfig::for_database_file(&path).ensure_directories()?;
    let store = SqliteTableStore::open(&path).map_err(|source| CliError::Database {
        path: path.clone(),
        source,
    })?;
    let mut session = HeadlessSession::with_log_plugin(
        TableStoreResource::new(store),
        LogPlugin {
            level: settings.level(),
            filter: settings.log_filter.clone(),
            ..Default::default()
        },
    );
    execute(&mut session, cli.command)
}

/// Runs one command against an open session and prints the result.
pub fn execute(session: &mut HeadlessSession, command: Commands) -> CliResult<()> {
    match command {
        Commands::Tables => {
            println!("{}", render::render_table_list(session.registry()));
            Ok(())
        }
        Commands::Create { name } => {
            accept(session.send(RequestCreateTable { name }))?;
            match session.registry().active_table() {
                Some(table) => println!("{}", render::render_table(table)),
                None => println!("{}", render::render_table_list(session.registry())),
            }
            Ok(())
        }
        Commands::Delete { table } => {
            let table_id = table_id(session, &table)?;
            accept(session.send(RequestDeleteTable { table_id }))?;
            println!("{}", render::render_table_list(session.registry()));
            Ok(())
        }
        Commands::Show { table } => {
            let table = resolve_table(session.registry(), &table)?;
            println!("{}", render::render_table(table));
            Ok(())
        }
        Commands::AddColumn { table, name, column_type } => {
            let table_id = table_id(session, &table)?;
            let column_type = column_type_arg(&column_type)?;
            accept(session.send_to(&table_id, RequestAddColumn { name, column_type }))?;
            show(session, &table_id)
        }
        Commands::DeleteColumn { table, column } => {
            let table_id = table_id(session, &table)?;
            let column_id = {
                let table = resolve_table(session.registry(), table_id.as_str())?;
                resolve_column(table, &column)?.id.clone()
            };
            accept(session.send_to(&table_id, RequestDeleteColumn { column_id }))?;
            show(session, &table_id)
        }
        Commands::AddOption { table, column, name } => {
            let table_id = table_id(session, &table)?;
            let column_id = {
                let table = resolve_table(session.registry(), table_id.as_str())?;
                resolve_column(table, &column)?.id.clone()
            };
            accept(session.send_to(&table_id, RequestAddSelectOption { column_id, name }))?;
            show(session, &table_id)
        }
        Commands::RemoveOption { table, column, option } => {
            let table_id = table_id(session, &table)?;
            let (column_id, option_id) = {
                let table = resolve_table(session.registry(), table_id.as_str())?;
                let column = resolve_column(table, &column)?;
                (column.id.clone(), resolve_option(column, &option)?.id.clone())
            };
            accept(session.send_to(&table_id, RequestRemoveSelectOption { column_id, option_id }))?;
            show(session, &table_id)
        }
        Commands::AddRow { table } => {
            let table_id = table_id(session, &table)?;
            accept(session.send_to(&table_id, RequestAddRow))?;
            show(session, &table_id)
        }
        Commands::DeleteRow { table, row } => {
            let table_id = table_id(session, &table)?;
            let row_id = {
                let table = resolve_table(session.registry(), table_id.as_str())?;
                resolve_row(table, &row)?.clone()
            };
            accept(session.send_to(&table_id, RequestDeleteRow { row_id }))?;
            show(session, &table_id)
        }
        Commands::SetCell { table, row, column, value } => {
            let table_id = table_id(session, &table)?;
            let (row_id, column_id) = {
                let table = resolve_table(session.registry(), table_id.as_str())?;
                (resolve_row(table, &row)?.clone(), resolve_column(table, &column)?.id.clone())
            };
            session.edit(&table_id, |editor| {
                editor.edit_cell_from_input(&row_id, &column_id, &value)
            })?;
            show(session, &table_id)
        }
        Commands::Toggle { table, row, column } => {
            let table_id = table_id(session, &table)?;
            let (row_id, column_id) = {
                let table = resolve_table(session.registry(), table_id.as_str())?;
                (resolve_row(table, &row)?.clone(), resolve_column(table, &column)?.id.clone())
            };
            session.edit(&table_id, |editor| editor.toggle_checkbox(&row_id, &column_id))?;
            show(session, &table_id)
        }
        Commands::MoveColumn { table, column, over } => {
            let table_id = table_id(session, &table)?;
            let (active_id, over_id) = {
                let table = resolve_table(session.registry(), table_id.as_str())?;
                (
                    resolve_column(table, &column)?.id.to_string(),
                    resolve_column(table, &over)?.id.to_string(),
                )
            };
            let kind = OrderKind::Column;
            accept(session.send_to(&table_id, RequestMoveItem { kind, active_id, over_id }))?;
            show(session, &table_id)
        }
        Commands::MoveRow { table, row, over } => {
            let table_id = table_id(session, &table)?;
            let (active_id, over_id) = {
                let table = resolve_table(session.registry(), table_id.as_str())?;
                (
                    resolve_row(table, &row)?.to_string(),
                    resolve_row(table, &over)?.to_string(),
                )
            };
            let kind = OrderKind::Row;
            accept(session.send_to(&table_id, RequestMoveItem { kind, active_id, over_id }))?;
            show(session, &table_id)
        }
        Commands::ReorderColumns { table, columns } => {
            let table_id = table_id(session, &table)?;
            let order = {
                let table = resolve_table(session.registry(), table_id.as_str())?;
                columns
                    .iter()
                    .map(|reference| resolve_column(table, reference).map(|c| c.id.clone()))
                    .collect::<CliResult<Vec<_>>>()?
            };
            accept(session.send_to(&table_id, RequestReorder { order: TableOrder::Columns(order) }))?;
            show(session, &table_id)
        }
        Commands::ReorderRows { table, rows } => {
            let table_id = table_id(session, &table)?;
            let order = {
                let table = resolve_table(session.registry(), table_id.as_str())?;
                rows.iter()
                    .map(|reference| resolve_row(table, reference).cloned())
                    .collect::<CliResult<Vec<_>>>()?
            };
            accept(session.send_to(&table_id, RequestReorder { order: TableOrder::Rows(order) }))?;
            show(session, &table_id)
        }
        Commands::Config { .. } => Ok(()),
    }
}

fn configure(
    mut settings: AppSettings,
    set_db: Option<PathBuf>,
    set_log_level: Option<String>,
) -> CliResult<()> {
    let changed = set_db.is_some() || set_log_level.is_some();
    if let Some(path) = set_db {
        settings.database_path = Some(path);
    }
    if let Some(level) = set_log_level {
        settings.log_level = level;
    }
    if changed {
        let saved_to = settings::io::save_settings_to_file(&settings)?;
        println!("Saved settings to {}", saved_to.display());
    }
    println!("database: {}", settings.database_file(None).display());
    println!("log level: {}", settings.log_level);
    println!("log filter: {}", settings.log_filter);
    Ok(())
}

fn table_id(session: &HeadlessSession, reference: &str) -> CliResult<TableId> {
    Ok(resolve_table(session.registry(), reference)?.id.clone())
}

fn show(session: &HeadlessSession, table_id: &TableId) -> CliResult<()> {
    let table = resolve_table(session.registry(), table_id.as_str())?;
    println!("{}", render::render_table(table));
    Ok(())
}

/// Prints success feedback; the first error feedback becomes the result.
fn accept(feedback: Vec<TableOperationFeedback>) -> CliResult<()> {
    for item in feedback {
        if item.is_error {
            return Err(CliError::Rejected(item.message));
        }
        println!("{}", item.message);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::database::InMemoryTableStore;
    use crate::tables::{CellValue, ColumnType};

    fn session() -> HeadlessSession {
        HeadlessSession::new(TableStoreResource::new(InMemoryTableStore::new()))
    }

    fn run_args(session: &mut HeadlessSession, args: &[&str]) -> CliResult<()> {
        let cli = Cli::try_parse_from(std::iter::once("tabledesk").chain(args.iter().copied()))
            .expect("arguments parse");
        execute(session, cli.command)
    }

    #[test]
    fn commands_build_a_table_by_position() {
        let mut session = session();
        run_args(&mut session, &["create", "Books"]).unwrap();
        run_args(&mut session, &["add-column", "Books", "Read", "checkbox"]).unwrap();
        run_args(&mut session, &["add-row", "1"]).unwrap();
        run_args(&mut session, &["set-cell", "Books", "2", "1", "Dune"]).unwrap();
        run_args(&mut session, &["toggle", "Books", "2", "Read"]).unwrap();
        run_args(&mut session, &["move-row", "Books", "2", "1"]).unwrap();

        let table = &session.registry().tables()[0];
        assert_eq!(table.columns[1].column_type, ColumnType::Checkbox);
        let first = &table.row_order[0];
        assert_eq!(table.cell(first, &table.column_order[0]), Some(&CellValue::Text("Dune".into())));
        assert_eq!(table.cell(first, &table.column_order[1]), Some(&CellValue::Checkbox(true)));
        assert!(table.is_consistent());
    }

    #[test]
    fn rejected_requests_surface_as_errors() {
        let mut session = session();
        run_args(&mut session, &["create", "Books"]).unwrap();
        let err = run_args(&mut session, &["add-column", "Books", "名称", "text"]).unwrap_err();
        assert!(matches!(err, CliError::Rejected(_)), "{:?}", err);

        let err = run_args(&mut session, &["add-option", "Books", "1", "Red"]).unwrap_err();
        assert!(matches!(err, CliError::Rejected(_)), "{:?}", err);

        let err = run_args(&mut session, &["show", "Films"]).unwrap_err();
        assert!(matches!(err, CliError::UnknownTable(_)));
    }

    #[test]
    fn parses_global_db_flag() {
        let cli = Cli::try_parse_from(["tabledesk", "tables", "--db", "/tmp/x.db"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.db")));
        assert!(matches!(cli.command, Commands::Tables));
    }
}
