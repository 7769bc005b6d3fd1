use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use strata_core::SqlDialect;

/// Name of the project configuration file that marks a strata project root.
pub const CONFIG_FILE_NAME: &str = "strata.json";

fn default_migrations_dir() -> PathBuf {
    PathBuf::from("migrations")
}

/// Top-level strata configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrataConfig {
    /// Directory holding the scaffolded migration files.
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: PathBuf,
    /// Named database connection strings, as the runner settings file keeps
    /// them.
    #[serde(default)]
    pub connection_strings: BTreeMap<String, String>,
    /// Pinned SQL dialect; when absent it is detected from the connection
    /// string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<SqlDialect>,
}

impl Default for StrataConfig {
    fn default() -> Self {
        Self {
            migrations_dir: default_migrations_dir(),
            connection_strings: BTreeMap::new(),
            dialect: None,
        }
    }
}

impl StrataConfig {
    /// Path where migration files are scaffolded.
    pub fn migrations_dir(&self) -> &Path {
        &self.migrations_dir
    }

    /// Named connection strings from the project settings.
    pub fn connection_strings(&self) -> &BTreeMap<String, String> {
        &self.connection_strings
    }

    /// Pinned dialect, if configured.
    pub fn dialect(&self) -> Option<SqlDialect> {
        self.dialect
    }
}

/// Load strata.json from the current directory.
pub fn load_config() -> Result<StrataConfig> {
    let path = PathBuf::from(CONFIG_FILE_NAME);
    if !path.exists() {
        anyhow::bail!("strata.json not found. Run 'strata init' first.");
    }
    load_config_from_path(&path)
}

/// Load config from a specific path.
pub fn load_config_from_path(path: &Path) -> Result<StrataConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let config: StrataConfig =
        serde_json::from_str(&content).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(config)
}
