//! Read-only SQLite access

use std::path::Path;

use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags, OptionalExtension};

use crate::dump::TableDump;
use crate::{Error, Result};

/// Read-only handle over one scanner database file
pub struct SqliteReader {
    conn: Connection,
}

impl SqliteReader {
    /// Open an existing database file, read-only.
    ///
    /// The scanner owns the file; a missing path is an error and nothing
    /// is ever created or written through this handle.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        tracing::debug!("opened database {}", path.display());
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Run a batch of SQL statements (fixture seeding in tests)
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    /// Check whether a table of this name exists in the catalog
    pub fn table_exists(&self, name: &str) -> Result<bool> {
        self.conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1 LIMIT 1",
                [name],
                |_| Ok(()),
            )
            .optional()
            .map(|opt| opt.is_some())
            .map_err(Into::into)
    }

    /// List user tables in name order (SQLite internals excluded)
    pub fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name",
        )?;

        let names = stmt
            .query_map([], |row| row.get(0))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(names)
    }

    /// Columns of a table in schema (cid) order
    pub fn table_columns(&self, name: &str) -> Result<Vec<ColumnInfo>> {
        if !self.table_exists(name)? {
            return Err(Error::TableNotFound(name.to_string()));
        }

        let mut stmt = self
            .conn
            .prepare(&format!("PRAGMA table_info({})", quote_ident(name)))?;

        let columns = stmt
            .query_map([], |row| {
                Ok(ColumnInfo {
                    cid: row.get(0)?,
                    name: row.get(1)?,
                    decl_type: row.get(2)?,
                    notnull: row.get::<_, i64>(3)? != 0,
                    pk: row.get::<_, i64>(5)? != 0,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();

        Ok(columns)
    }

    /// Count the rows of a table
    pub fn row_count(&self, name: &str) -> Result<usize> {
        if !self.table_exists(name)? {
            return Err(Error::TableNotFound(name.to_string()));
        }

        let sql = format!("SELECT COUNT(*) FROM {}", quote_ident(name));
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Fetch a whole table: column names from the statement metadata plus
    /// every row's values, both in result order.
    ///
    /// The name is validated against the catalog before any query is built
    /// from it, and quoted even then.
    pub fn fetch_table(&self, name: &str) -> Result<TableDump> {
        if !self.table_exists(name)? {
            return Err(Error::TableNotFound(name.to_string()));
        }

        let sql = format!("SELECT * FROM {}", quote_ident(name));
        let mut stmt = self.conn.prepare(&sql)?;

        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
        let ncols = columns.len();

        let mut data = Vec::new();
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(ncols);
            for i in 0..ncols {
                values.push(row.get::<_, Value>(i)?);
            }
            data.push(values);
        }

        tracing::debug!("fetched {} rows from {}", data.len(), name);

        Ok(TableDump {
            table: name.to_string(),
            columns,
            rows: data,
        })
    }
}

/// One row of `PRAGMA table_info`
#[derive(Debug, Clone)]
pub struct ColumnInfo {
    pub cid: i64,
    pub name: String,
    pub decl_type: String,
    pub notnull: bool,
    pub pk: bool,
}

/// Quote an identifier for direct use in SQL text
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    // The schema the scanner creates in antivir.db
    const SCANNER_SCHEMA: &str = r#"
        CREATE TABLE Signatures (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            signature BLOB UNIQUE NOT NULL);
        CREATE TABLE FoundFiles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            path TEXT UNIQUE NOT NULL,
            offset INTEGER NOT NULL,
            signature BLOB NOT NULL,
            status INTEGER NOT NULL DEFAULT 0);
        CREATE TABLE QuarTable (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            path TEXT UNIQUE NOT NULL,
            hash TEXT UNIQUE NOT NULL);
    "#;

    fn scanner_db() -> SqliteReader {
        let db = SqliteReader::open_in_memory().unwrap();
        db.execute_batch(SCANNER_SCHEMA).unwrap();
        db
    }

    #[test]
    fn test_table_exists() {
        let db = scanner_db();

        assert!(db.table_exists("QuarTable").unwrap());
        assert!(db.table_exists("FoundFiles").unwrap());
        assert!(!db.table_exists("NoSuchTable").unwrap());
    }

    #[test]
    fn test_table_names_skip_internals() {
        let db = scanner_db();
        // AUTOINCREMENT materializes sqlite_sequence on first insert
        db.execute_batch("INSERT INTO QuarTable (path, hash) VALUES ('/tmp/a.exe', 'h1')")
            .unwrap();

        let names = db.table_names().unwrap();
        assert_eq!(names, vec!["FoundFiles", "QuarTable", "Signatures"]);
    }

    #[test]
    fn test_table_columns_in_schema_order() {
        let db = scanner_db();

        let columns = db.table_columns("QuarTable").unwrap();
        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "path", "hash"]);
        assert!(columns[0].pk);
        assert!(columns[1].notnull);
        assert_eq!(columns[2].decl_type, "TEXT");
    }

    #[test]
    fn test_missing_table_is_rejected_before_query() {
        let db = scanner_db();

        let err = db.fetch_table("QuarTable; DROP TABLE Signatures").unwrap_err();
        assert!(matches!(err, Error::TableNotFound(_)));
        // nothing was executed: the catalog still has all three tables
        assert!(db.table_exists("Signatures").unwrap());

        let err = db.table_columns("Ghost").unwrap_err();
        assert!(matches!(err, Error::TableNotFound(_)));
        let err = db.row_count("Ghost").unwrap_err();
        assert!(matches!(err, Error::TableNotFound(_)));
    }

    #[test]
    fn test_fetch_table_rows_and_columns() {
        let db = scanner_db();
        db.execute_batch(
            "INSERT INTO FoundFiles (path, offset, signature, status) VALUES
                ('/bin/bad', 128, x'DEAD', 0),
                ('/bin/worse', 4096, x'BEEF', 2)",
        )
        .unwrap();

        let dump = db.fetch_table("FoundFiles").unwrap();
        assert_eq!(dump.table, "FoundFiles");
        assert_eq!(dump.columns, vec!["id", "path", "offset", "signature", "status"]);
        assert_eq!(dump.rows.len(), 2);
        for row in &dump.rows {
            assert_eq!(row.len(), dump.columns.len());
        }
        assert_eq!(dump.rows[0][1], Value::Text("/bin/bad".into()));
        assert_eq!(dump.rows[1][2], Value::Integer(4096));
    }

    #[test]
    fn test_row_count() {
        let db = scanner_db();
        assert_eq!(db.row_count("QuarTable").unwrap(), 0);

        db.execute_batch(
            "INSERT INTO QuarTable (path, hash) VALUES ('/tmp/a.exe', 'h1'), ('/tmp/b.exe', 'h2')",
        )
        .unwrap();
        assert_eq!(db.row_count("QuarTable").unwrap(), 2);
    }

    #[test]
    fn test_open_is_read_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("antivir.db");

        let setup = Connection::open(&path).unwrap();
        setup
            .execute_batch("CREATE TABLE QuarTable (id INTEGER PRIMARY KEY, path TEXT, hash TEXT)")
            .unwrap();
        drop(setup);

        let db = SqliteReader::open(&path).unwrap();
        assert!(db.table_exists("QuarTable").unwrap());
        // writes are refused by the read-only handle
        assert!(db.execute_batch("INSERT INTO QuarTable (path) VALUES ('x')").is_err());
    }

    #[test]
    fn test_open_missing_path_fails_without_creating() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.db");

        assert!(SqliteReader::open(&path).is_err());
        assert!(!path.exists());
    }
}
