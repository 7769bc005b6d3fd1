use std::io;
use std::path::PathBuf;

use strata_core::ScanError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SplitError {
    #[error("script log not found: {}", .0.display())]
    LogNotFound(PathBuf),
    #[error("failed to read script log {}: {source}", .path.display())]
    ReadLog { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("failed to write script file {}: {source}", .path.display())]
    WriteScript { path: PathBuf, source: io::Error },
    #[error("failed to create scripts directory {}: {source}", .path.display())]
    CreateScriptsDir { path: PathBuf, source: io::Error },
    #[error("failed to replace script file {}: {source}", .path.display())]
    ReplaceScript { path: PathBuf, source: io::Error },
    #[error("failed to move script file {} into {}: {source}", .from.display(), .to.display())]
    MoveScript {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
}
