use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;
use strata_config::{StrataConfig, detect_dialect, load_config_from_path, resolve_connection_string};
use strata_core::SqlDialect;
use strata_splitter::split_script_log;

use crate::opener::open_file;
use crate::utils::current_project;

pub async fn cmd_split(
    log: PathBuf,
    dialect: Option<&str>,
    connection_string: Option<&str>,
    silent: bool,
) -> Result<()> {
    let files = split_or_fallback(&log, dialect, connection_string).await?;

    for file in &files {
        println!("{} {}", "-".bright_white(), file.display());
    }

    if !silent {
        for file in &files {
            open_file(file);
        }
    }

    Ok(())
}

/// Run the split pipeline with the degrade-to-unsplit policy: whenever the
/// log cannot be split safely, the original file is the one-and-only result.
async fn split_or_fallback(
    log: &Path,
    dialect_token: Option<&str>,
    connection_string: Option<&str>,
) -> Result<Vec<PathBuf>> {
    let Some(location) = current_project()? else {
        println!(
            "{}",
            "No strata project found; keeping the script log unsplit.".bright_black()
        );
        return Ok(vec![log.to_path_buf()]);
    };

    let config = load_config_from_path(&location.config_path)?;
    let dialect = resolve_dialect(&config, dialect_token, connection_string)?;

    println!(
        "{}",
        format!("Splitting the script log for {dialect}...").bright_black()
    );

    match split_script_log(log, dialect, &location.root).await {
        Ok(Some(files)) => {
            println!(
                "{} {}",
                "Split the script log into".green(),
                format!("{} files.", files.len()).bright_yellow()
            );
            Ok(files)
        }
        Ok(None) => {
            println!(
                "{}",
                "No complete migrations found; keeping the script log unsplit.".bright_black()
            );
            Ok(vec![log.to_path_buf()])
        }
        Err(e) => {
            // Degraded granularity, not a failed run.
            println!("{}", format!("Failed to split the script log: {e:?}").red());
            Ok(vec![log.to_path_buf()])
        }
    }
}

/// Dialect precedence: explicit token, pinned config value, then detection
/// from the resolved connection string.
fn resolve_dialect(
    config: &StrataConfig,
    token: Option<&str>,
    connection_string: Option<&str>,
) -> Result<SqlDialect> {
    if let Some(token) = token {
        return Ok(token.parse::<SqlDialect>()?);
    }
    if let Some(dialect) = config.dialect() {
        return Ok(dialect);
    }
    let connection = resolve_connection_string(config, connection_string)?;
    Ok(detect_dialect(&connection, None)?)
}
