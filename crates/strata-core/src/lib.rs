pub mod dialect;
pub mod marker;
pub mod script;

pub use dialect::{SqlDialect, UnknownDialect};
pub use marker::{MarkerKind, MigrationMarker, MigrationSpan, ScanError, SpanTable, scan_markers};
pub use script::{MigrationScript, extract_scripts};
