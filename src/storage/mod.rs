//! Storage Layer - read-only SQLite access
//!
//! The scanner owns the database; quarview only reads it. The reference
//! schema (created by the scanner) is:
//! - Signatures(id, signature)
//! - FoundFiles(id, path, offset, signature, status)
//! - QuarTable(id, path, hash)

pub mod sqlite;

pub use sqlite::{ColumnInfo, SqliteReader};
