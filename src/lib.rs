//! # Quarview - Antivirus database inspector
//!
//! Read-only terminal inspector for the SQLite database kept by the
//! antivirus scanner (`antivir.db`).
//!
//! Quarview provides:
//! - Full-table dumps as pipe-delimited text (quarantine, found files, signatures)
//! - Table listing with row counts
//! - Per-table schema display
//! - A small TOML config for the default database path and table

pub mod config;
pub mod dump;
pub mod storage;
pub mod ui;

// Re-exports for convenient access
pub use dump::{TableDump, dump_table};
pub use storage::{ColumnInfo, SqliteReader};

/// Result type alias for Quarview operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Quarview operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
