//! Quarview CLI - terminal inspector for the antivirus scanner database

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use quarview::config::{self, QuarviewConfig};
use quarview::storage::SqliteReader;
use quarview::ui::{self, Icons};
use quarview::{Error, dump};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "quarview")]
#[command(version)]
#[command(about = "Inspector for the antivirus scanner database")]
#[command(long_about = r#"
Quarview reads the SQLite database the scanner maintains (antivir.db by
default) and prints its contents as plain text:
  • Full-table dumps (quarantine, found files, signatures)
  • Table listing with row counts
  • Per-table column layout

Example usage:
  quarview dump --table QuarTable
  quarview tables --database /var/lib/antivir/antivir.db
  quarview schema --table FoundFiles
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (defaults to ./quarview.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every row of one table
    Dump {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Table to dump
        #[arg(short, long)]
        table: Option<String>,
    },

    /// List the tables in the database with their row counts
    Tables {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Show the column layout of one table
    Schema {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Table to describe
        #[arg(short, long)]
        table: Option<String>,
    },

    /// Write a starter config file
    Init {
        /// Database path to record
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Default table to record
        #[arg(short, long)]
        table: Option<String>,

        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let config = match config::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            ui::warn(&format!("Ignoring unreadable config: {e}"));
            None
        }
    };

    // Failures become one printed line; the process still exits 0.
    match cli.command {
        Commands::Dump { database, table } => {
            let database = resolve_database(database, config.as_ref());
            let table = resolve_table(table, config.as_ref());
            tracing::debug!("dumping {} from {}", table, database.display());

            match dump::dump_table(&database, &table) {
                Ok(dump) => println!("{dump}"),
                Err(e) => report_failure(&e),
            }
        }

        Commands::Tables { database } => {
            let database = resolve_database(database, config.as_ref());

            if let Err(e) = list_tables(&database) {
                report_failure(&e);
            }
        }

        Commands::Schema { database, table } => {
            let database = resolve_database(database, config.as_ref());
            let table = resolve_table(table, config.as_ref());

            if let Err(e) = show_schema(&database, &table) {
                report_failure(&e);
            }
        }

        Commands::Init { database, table, force } => {
            let new_config = QuarviewConfig {
                database: Some(
                    database
                        .map(|p| p.to_string_lossy().to_string())
                        .unwrap_or_else(|| config::DEFAULT_DATABASE.to_string()),
                ),
                table: Some(table.unwrap_or_else(|| config::DEFAULT_TABLE.to_string())),
            };

            match config::write_config(&config_path, &new_config, force) {
                Ok(()) => ui::success(&format!("Wrote {}", config_path.display())),
                Err(e) => ui::failure(&e.to_string()),
            }
        }
    }

    Ok(())
}

fn report_failure(error: &Error) {
    ui::failure(&format!("SQLite error: {error}"));
}

fn resolve_database(arg: Option<PathBuf>, config: Option<&QuarviewConfig>) -> PathBuf {
    arg.or_else(|| config.and_then(|c| c.database.as_ref().map(PathBuf::from)))
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_DATABASE))
}

fn resolve_table(arg: Option<String>, config: Option<&QuarviewConfig>) -> String {
    arg.or_else(|| config.and_then(|c| c.table.clone()))
        .unwrap_or_else(|| config::DEFAULT_TABLE.to_string())
}

fn list_tables(database: &Path) -> quarview::Result<()> {
    let db = SqliteReader::open(database)?;

    let mut entries = Vec::new();
    for name in db.table_names()? {
        let rows = db.row_count(&name)?;
        entries.push((name, rows));
    }

    ui::header(&format!("Tables in {}", database.display()));
    if entries.is_empty() {
        println!("∅ No tables found.");
    } else {
        println!("{}", ui::table_list(&entries));
        ui::status(Icons::STATS, "Tables", &entries.len().to_string());
    }

    Ok(())
}

fn show_schema(database: &Path, table: &str) -> quarview::Result<()> {
    let db = SqliteReader::open(database)?;
    let columns = db.table_columns(table)?;
    let rows = db.row_count(table)?;

    ui::header(&format!("{} in {}", table, database.display()));
    println!("{}", ui::schema_table(&columns));
    ui::status(Icons::STATS, "Rows", &rows.to_string());

    Ok(())
}
