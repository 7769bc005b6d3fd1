use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Marker line emitted by the migration runner in preview mode:
/// `/* <version>: <name> <migrating|migrated>`.
static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^/\*\s(\d+):\s(\w+)\s(migrating|migrated)").expect("marker pattern")
});

/// Which side of a migration a marker line announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Migrating,
    Migrated,
}

/// A parsed marker line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationMarker {
    pub version: u64,
    pub name: String,
    pub kind: MarkerKind,
    /// Zero-based index of the line in the log.
    pub line: usize,
}

impl MigrationMarker {
    /// Parse one log line. Returns `None` for anything that is not a marker,
    /// including versions that do not fit in a `u64`.
    pub fn parse(line: &str, index: usize) -> Option<MigrationMarker> {
        let caps = MARKER.captures(line)?;
        let version: u64 = caps[1].parse().ok()?;
        let kind = if caps[3].eq_ignore_ascii_case("migrating") {
            MarkerKind::Migrating
        } else {
            MarkerKind::Migrated
        };
        Some(MigrationMarker {
            version,
            name: caps[2].to_string(),
            kind,
            line: index,
        })
    }
}

/// The lifetime of one migration inside the log, from its `migrating` marker
/// to its `migrated` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationSpan {
    pub version: u64,
    pub name: String,
    pub start_line: usize,
    pub end_line: Option<usize>,
}

impl MigrationSpan {
    /// A span is usable only once both markers were observed and the name is
    /// non-blank.
    pub fn is_complete(&self) -> bool {
        self.end_line.is_some() && !self.name.trim().is_empty()
    }
}

#[derive(Debug, Error)]
pub enum ScanError {
    /// A `migrated` marker for a version that was never marked `migrating`.
    #[error("no 'migrating' marker precedes 'migrated' for version {version} (line {line})")]
    UnmatchedMigrated { version: u64, line: usize },
}

/// Spans keyed by version, iterated in discovery order.
///
/// Re-inserting a version replaces the span in place, keeping the position of
/// the first insertion, so extraction order stays stable under the last-wins
/// overwrite rule.
#[derive(Debug, Default)]
pub struct SpanTable {
    spans: Vec<MigrationSpan>,
}

impl SpanTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn get(&self, version: u64) -> Option<&MigrationSpan> {
        self.spans.iter().find(|s| s.version == version)
    }

    pub fn get_mut(&mut self, version: u64) -> Option<&mut MigrationSpan> {
        self.spans.iter_mut().find(|s| s.version == version)
    }

    /// Insert a span, overwriting any existing entry for the same version.
    pub fn upsert(&mut self, span: MigrationSpan) {
        match self.get_mut(span.version) {
            Some(existing) => *existing = span,
            None => self.spans.push(span),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &MigrationSpan> {
        self.spans.iter()
    }

    /// The all-or-nothing validity check: non-empty and every span complete.
    pub fn is_complete(&self) -> bool {
        !self.is_empty() && self.spans.iter().all(MigrationSpan::is_complete)
    }
}

/// Single forward pass over the log lines, building the span table.
///
/// Non-marker lines are skipped. A duplicate `migrating` marker overwrites the
/// previous span for that version; a `migrated` marker without a matching
/// `migrating` fails the scan.
pub fn scan_markers<S: AsRef<str>>(lines: &[S]) -> Result<SpanTable, ScanError> {
    let mut table = SpanTable::new();

    for (index, line) in lines.iter().enumerate() {
        let Some(marker) = MigrationMarker::parse(line.as_ref(), index) else {
            continue;
        };

        match marker.kind {
            MarkerKind::Migrating => table.upsert(MigrationSpan {
                version: marker.version,
                name: marker.name,
                start_line: index,
                end_line: None,
            }),
            MarkerKind::Migrated => {
                let span = table.get_mut(marker.version).ok_or(
                    ScanError::UnmatchedMigrated {
                        version: marker.version,
                        line: index,
                    },
                )?;
                span.end_line = Some(index);
            }
        }
    }

    Ok(table)
}
