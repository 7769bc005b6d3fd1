use std::path::Path;
use std::process::{Command, Stdio};

use colored::Colorize;

/// Open a produced file for user inspection.
///
/// `$VISUAL` / `$EDITOR` win; otherwise the platform opener is used. The
/// process is spawned detached and a failure to open never fails the command.
pub fn open_file(path: &Path) {
    let program = editor_from_env().unwrap_or_else(|| platform_opener().to_string());

    println!(
        "{}",
        format!("Opening the file: {}", path.display()).bright_black()
    );

    let spawned = Command::new(&program)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    if let Err(e) = spawned {
        println!(
            "{}",
            format!("Could not open {} with '{}': {}", path.display(), program, e).yellow()
        );
    }
}

fn editor_from_env() -> Option<String> {
    ["VISUAL", "EDITOR"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.trim().is_empty())
}

#[cfg(target_os = "macos")]
fn platform_opener() -> &'static str {
    "open"
}

#[cfg(target_os = "windows")]
fn platform_opener() -> &'static str {
    "explorer"
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn platform_opener() -> &'static str {
    "xdg-open"
}
