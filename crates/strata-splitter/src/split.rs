use std::path::{Path, PathBuf};

use strata_core::{MigrationScript, SqlDialect, extract_scripts, scan_markers};
use tokio::fs;

use crate::error::SplitError;

/// Durable location of per-migration scripts, relative to the project root.
pub const SCRIPTS_DIR: &str = "@Scripts/Migrations";

/// Split a runner script log into one SQL file per migration and move the
/// files into `@Scripts/Migrations` under `project_root`.
///
/// Returns the placed files in the order their `migrating` markers appeared,
/// or `Ok(None)` when the log contains nothing that can be split (no markers,
/// or at least one incomplete span — splitting is all-or-nothing). Errors are
/// returned to the caller; the caller decides how to report them and falls
/// back to the unsplit log either way.
pub async fn split_script_log(
    log_path: &Path,
    dialect: SqlDialect,
    project_root: &Path,
) -> Result<Option<Vec<PathBuf>>, SplitError> {
    if !log_path.is_file() {
        return Err(SplitError::LogNotFound(log_path.to_path_buf()));
    }

    let content = fs::read_to_string(log_path)
        .await
        .map_err(|source| SplitError::ReadLog {
            path: log_path.to_path_buf(),
            source,
        })?;
    let lines: Vec<&str> = content.lines().collect();

    let spans = scan_markers(&lines)?;
    if !spans.is_complete() {
        return Ok(None);
    }

    let scripts = extract_scripts(&lines, &spans);

    // Stage next to the source log, then move into the scripts directory.
    let staging_dir = log_path.parent().unwrap_or_else(|| Path::new("."));
    let staged = write_scripts(staging_dir, &scripts, dialect).await?;

    let scripts_dir = project_root.join(SCRIPTS_DIR);
    fs::create_dir_all(&scripts_dir)
        .await
        .map_err(|source| SplitError::CreateScriptsDir {
            path: scripts_dir.clone(),
            source,
        })?;

    let mut placed = Vec::with_capacity(staged.len());
    for from in staged {
        placed.push(place_script(&from, &scripts_dir).await?);
    }

    Ok(Some(placed))
}

/// Write every script into `dir`, fully, before anything gets moved.
async fn write_scripts(
    dir: &Path,
    scripts: &[MigrationScript],
    dialect: SqlDialect,
) -> Result<Vec<PathBuf>, SplitError> {
    let mut written = Vec::with_capacity(scripts.len());
    for script in scripts {
        let path = dir.join(script.file_name());
        fs::write(&path, script.render(dialect))
            .await
            .map_err(|source| SplitError::WriteScript {
                path: path.clone(),
                source,
            })?;
        written.push(path);
    }
    Ok(written)
}

/// Delete-then-rename into the scripts directory. Not atomic; acceptable
/// because the tool assumes exclusive use of its output directory.
async fn place_script(from: &Path, scripts_dir: &Path) -> Result<PathBuf, SplitError> {
    let file_name = from.file_name().unwrap_or(from.as_os_str());
    let to = scripts_dir.join(file_name);

    if to.is_file() {
        fs::remove_file(&to)
            .await
            .map_err(|source| SplitError::ReplaceScript {
                path: to.clone(),
                source,
            })?;
    }

    fs::rename(from, &to)
        .await
        .map_err(|source| SplitError::MoveScript {
            from: from.to_path_buf(),
            to: to.clone(),
            source,
        })?;

    Ok(to)
}
