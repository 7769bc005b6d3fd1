use std::{fs, path::PathBuf};

use anyhow::{Context, Result, bail};
use strata_config::{CONFIG_FILE_NAME, StrataConfig};

pub fn cmd_init() -> Result<()> {
    let path = PathBuf::from(CONFIG_FILE_NAME);
    if path.exists() {
        bail!("strata.json already exists");
    }

    let config = StrataConfig::default();
    let json = serde_json::to_string_pretty(&config).context("serialize default config")?;
    fs::write(&path, json).context("write strata.json")?;
    println!("created {:?}", path);
    Ok(())
}
