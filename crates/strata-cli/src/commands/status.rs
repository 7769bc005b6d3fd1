use std::fs;
use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use strata_splitter::SCRIPTS_DIR;

use crate::utils::load_project;

pub fn cmd_status() -> Result<()> {
    let (location, config) = load_project()?;

    println!("{}", "Configuration:".bright_cyan().bold());
    println!(
        "  {} {}",
        "Project root:".cyan(),
        location.root.display().to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Migrations directory:".cyan(),
        config.migrations_dir().display().to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Dialect:".cyan(),
        match config.dialect() {
            Some(dialect) => dialect.to_string().bright_white(),
            None => "detected from the connection string".bright_black(),
        }
    );
    println!(
        "  {} {}",
        "Connection strings:".cyan(),
        config
            .connection_strings()
            .len()
            .to_string()
            .bright_yellow()
    );
    println!();

    println!(
        "{} {}",
        "Migrations:".bright_cyan().bold(),
        count_sql_files(&location.root.join(config.migrations_dir()))
            .to_string()
            .bright_yellow()
    );
    println!(
        "{} {}",
        "Placed scripts:".bright_cyan().bold(),
        count_sql_files(&location.root.join(SCRIPTS_DIR))
            .to_string()
            .bright_yellow()
    );

    Ok(())
}

fn count_sql_files(dir: &Path) -> usize {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };
    entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("sql"))
        })
        .count()
}
