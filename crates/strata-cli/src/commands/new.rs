use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use colored::Colorize;
use regex::Regex;

use crate::opener::open_file;
use crate::utils::load_project;

/// Name-based scaffolding templates, matched in order.
static CREATE_TABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^CreateTable(\w+)").expect("create-table pattern"));
static ALTER_TABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^AlterTable(\w+)").expect("alter-table pattern"));

pub fn cmd_new(name: String, silent: bool) -> Result<()> {
    if !is_valid_migration_name(&name) {
        bail!("invalid migration name: '{name}'");
    }

    let (location, config) = load_project()?;
    let migrations_dir = location.root.join(config.migrations_dir());
    if !migrations_dir.exists() {
        fs::create_dir_all(&migrations_dir).context("create migrations directory")?;
    }

    let version = Utc::now().format("%Y%m%d%H%M%S").to_string();
    let path = migrations_dir.join(format!("{version}_{name}.sql"));

    if path.exists() || migration_exists(&migrations_dir, &name)? {
        bail!("migration with name '{name}' already exists");
    }

    fs::write(&path, scaffold(&version, &name))
        .with_context(|| format!("write migration file: {}", path.display()))?;

    println!(
        "{} {}",
        "Created migration:".green(),
        path.display().to_string().bright_white()
    );

    if !silent {
        open_file(&path);
    }

    Ok(())
}

/// A letter followed by letters, digits or underscores.
fn is_valid_migration_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Any version-prefixed file for this name counts as the same migration.
fn migration_exists(migrations_dir: &Path, name: &str) -> Result<bool> {
    let suffix = format!("_{name}.sql");
    for entry in fs::read_dir(migrations_dir).context("read migrations directory")? {
        let entry = entry.context("read directory entry")?;
        if entry.file_name().to_string_lossy().ends_with(&suffix) {
            return Ok(true);
        }
    }
    Ok(false)
}

fn scaffold(version: &str, name: &str) -> String {
    let mut out = format!("-- {version}: {name}\n");
    if let Some(template) = template_for(name) {
        out.push('\n');
        out.push_str(&template);
        out.push('\n');
    }
    out
}

fn template_for(name: &str) -> Option<String> {
    if let Some(caps) = CREATE_TABLE.captures(name) {
        let table = snake_case(&caps[1]);
        return Some(format!(
            "CREATE TABLE {table} (\n    id uuid NOT NULL PRIMARY KEY\n);"
        ));
    }
    if let Some(caps) = ALTER_TABLE.captures(name) {
        let table = snake_case(&caps[1]);
        return Some(format!(
            "ALTER TABLE {table}\n    ADD COLUMN column_name boolean NOT NULL DEFAULT false;"
        ));
    }
    None
}

fn snake_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for (i, c) in value.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::path::PathBuf;

    use rstest::rstest;
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

    fn write_config() {
        fs::write("strata.json", "{}").unwrap();
    }

    #[rstest]
    #[case("CreateTableUsers", true)]
    #[case("AddIndex_2", true)]
    #[case("x", true)]
    #[case("", false)]
    #[case("1Migration", false)]
    #[case("_Hidden", false)]
    #[case("Bad Name", false)]
    #[case("Bad-Name", false)]
    fn migration_name_validation(#[case] name: &str, #[case] valid: bool) {
        assert_eq!(is_valid_migration_name(name), valid);
    }

    #[rstest]
    #[case("Users", "users")]
    #[case("UserAccounts", "user_accounts")]
    #[case("HTTPLog", "h_t_t_p_log")]
    fn snake_case_conversion(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(snake_case(input), expected);
    }

    #[test]
    fn create_table_template() {
        let body = template_for("CreateTableUserAccounts").unwrap();
        assert!(body.starts_with("CREATE TABLE user_accounts ("));
        assert!(body.contains("id uuid NOT NULL PRIMARY KEY"));
    }

    #[test]
    fn alter_table_template() {
        let body = template_for("AlterTableUsers").unwrap();
        assert!(body.starts_with("ALTER TABLE users"));
    }

    #[test]
    fn unrecognized_name_gets_no_template() {
        assert_eq!(template_for("SeedInitialData"), None);
        let content = scaffold("20240101000000", "SeedInitialData");
        assert_eq!(content, "-- 20240101000000: SeedInitialData\n");
    }

    #[test]
    #[serial_test::serial]
    fn cmd_new_writes_migration_file() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(&tmp.path().to_path_buf());
        write_config();

        cmd_new("CreateTableUsers".into(), true).unwrap();

        let entries: Vec<_> = fs::read_dir("migrations")
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].ends_with("_CreateTableUsers.sql"));

        let content = fs::read_to_string(Path::new("migrations").join(&entries[0])).unwrap();
        assert!(content.contains("CREATE TABLE users ("));
    }

    #[test]
    #[serial_test::serial]
    fn cmd_new_rejects_duplicate_name() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(&tmp.path().to_path_buf());
        write_config();

        fs::create_dir_all("migrations").unwrap();
        fs::write("migrations/20200101000000_CreateTableUsers.sql", "").unwrap();

        let err = cmd_new("CreateTableUsers".into(), true).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    #[serial_test::serial]
    fn cmd_new_rejects_invalid_name() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(&tmp.path().to_path_buf());
        write_config();

        let err = cmd_new("not a name".into(), true).unwrap_err();
        assert!(err.to_string().contains("invalid migration name"));
    }
}
