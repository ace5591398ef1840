use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Database file the scanner writes, next to the working directory
pub const DEFAULT_DATABASE: &str = "antivir.db";
/// Table dumped when none is asked for. The scanner also keeps
/// FoundFiles and Signatures.
pub const DEFAULT_TABLE: &str = "QuarTable";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QuarviewConfig {
    pub database: Option<String>,
    pub table: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("quarview.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<QuarviewConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: QuarviewConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &QuarviewConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}
