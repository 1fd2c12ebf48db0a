// src/tables/database/mod.rs

pub mod connection;
pub mod error;
pub mod memory;
pub mod schema;
pub mod sqlite_store;
pub mod store;

pub use connection::DbConnection;
pub use error::{DbError, DbResult};
pub use memory::{InMemoryTableStore, StoreFailureSwitch};
pub use sqlite_store::SqliteTableStore;
pub use store::TableStore;

use std::path::{Path, PathBuf};

const DATABASE_FILE_NAME: &str = "tables.db";

/// Database storage configuration
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub data_path: PathBuf,
}

impl DbConfig {
    pub fn default_path() -> PathBuf {
        let documents = directories_next::UserDirs::new()
            .and_then(|dirs| dirs.document_dir().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."));
        documents.join("TableDesk")
    }

    pub fn new() -> Self {
        Self {
            data_path: Self::default_path(),
        }
    }

    /// Uses `database_file` directly; its parent becomes the data directory.
    pub fn for_database_file(database_file: &Path) -> Self {
        let data_path = database_file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self { data_path }
    }

    pub fn database_file(&self) -> PathBuf {
        self.data_path.join(DATABASE_FILE_NAME)
    }

    pub fn ensure_directories(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_path)?;
        Ok(())
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self::new()
    }
}
