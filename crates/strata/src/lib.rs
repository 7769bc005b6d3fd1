// Re-export the commonly used items under one roof.
pub use strata_config::{StrataConfig, detect_dialect, locate_project, resolve_connection_string};
pub use strata_core::{
    MigrationScript, MigrationSpan, ScanError, SpanTable, SqlDialect, extract_scripts,
    scan_markers,
};
pub use strata_splitter::{SCRIPTS_DIR, SplitError, split_script_log};
