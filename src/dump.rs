//! Full-table dump and its text rendering
//!
//! The output format is the one the scanner's operators already grep:
//! a header line of column names joined by " | ", a dashed separator,
//! then one line per row.

use std::fmt;
use std::path::Path;

use rusqlite::types::Value;

use crate::Result;
use crate::storage::SqliteReader;

/// Dashes per column in the separator line
const SEPARATOR_WIDTH_PER_COLUMN: usize = 10;

/// One fully fetched table, ready to render
#[derive(Debug, Clone)]
pub struct TableDump {
    pub table: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl TableDump {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for TableDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.columns.join(" | "))?;
        write!(f, "{}", "-".repeat(self.columns.len() * SEPARATOR_WIDTH_PER_COLUMN))?;
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(value_to_text).collect();
            write!(f, "\n{}", cells.join(" | "))?;
        }
        Ok(())
    }
}

/// Textual form of a single cell
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(r) => r.to_string(),
        Value::Text(t) => t.clone(),
        Value::Blob(bytes) if bytes.len() <= 32 => {
            let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
            format!("x'{hex}'")
        }
        Value::Blob(bytes) => format!("<blob {} bytes>", bytes.len()),
    }
}

/// Dump one table of the database at `path`.
///
/// Opens a read-only connection scoped to this call; it is released on
/// every exit path when the reader drops.
pub fn dump_table(path: &Path, table: &str) -> Result<TableDump> {
    let db = SqliteReader::open(path)?;
    db.fetch_table(table)
}
