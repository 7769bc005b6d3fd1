use std::path::{Path, PathBuf};

use crate::config::CONFIG_FILE_NAME;

/// A discovered strata project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLocation {
    /// Directory containing strata.json; scripts and migrations live under it.
    pub root: PathBuf,
    pub config_path: PathBuf,
}

/// Walk from `start` upward until a directory containing strata.json is
/// found. Returns `None` when no ancestor is a strata project; callers then
/// skip any project-relative work.
pub fn locate_project(start: &Path) -> Option<ProjectLocation> {
    let mut dir = start;
    loop {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(ProjectLocation {
                root: dir.to_path_buf(),
                config_path: candidate,
            });
        }
        dir = dir.parent()?;
    }
}
