use std::env;

use anyhow::{Context, Result};
use strata_config::{ProjectLocation, StrataConfig, load_config_from_path, locate_project};

/// Locate the strata project containing the current directory, if any.
pub fn current_project() -> Result<Option<ProjectLocation>> {
    let cwd = env::current_dir().context("determine current directory")?;
    Ok(locate_project(&cwd))
}

/// Locate the project and load its configuration; fails outside a project.
pub fn load_project() -> Result<(ProjectLocation, StrataConfig)> {
    let Some(location) = current_project()? else {
        anyhow::bail!("strata.json not found. Run 'strata init' first.");
    };
    let config = load_config_from_path(&location.config_path)?;
    Ok((location, config))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use tempfile::tempdir;

    use super::*;

    struct CwdGuard {
        original: PathBuf,
    }

    impl CwdGuard {
        fn new(dir: &PathBuf) -> Self {
            let original = env::current_dir().unwrap();
            env::set_current_dir(dir).unwrap();
            Self { original }
        }
    }

    impl Drop for CwdGuard {
        fn drop(&mut self) {
            let _ = env::set_current_dir(&self.original);
        }
    }

    #[test]
    #[serial_test::serial]
    fn load_project_fails_outside_a_project() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(&tmp.path().to_path_buf());

        let err = load_project().unwrap_err();
        assert!(err.to_string().contains("strata.json not found"));
    }

    #[test]
    #[serial_test::serial]
    fn load_project_reads_config_from_an_ancestor() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("strata.json"), "{}").unwrap();
        let nested = tmp.path().join("src");
        fs::create_dir_all(&nested).unwrap();
        let _guard = CwdGuard::new(&nested);

        let (location, config) = load_project().unwrap();
        assert!(location.config_path.ends_with("strata.json"));
        assert_eq!(config, StrataConfig::default());
    }
}
