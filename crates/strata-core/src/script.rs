use crate::dialect::SqlDialect;
use crate::marker::SpanTable;

/// The SQL body of one migration, cut out of the runner's script log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationScript {
    pub version: u64,
    pub name: String,
    pub body: String,
}

impl MigrationScript {
    /// File name for the materialized script: `{version}_{name}.sql`.
    pub fn file_name(&self) -> String {
        format!("{}_{}.sql", self.version, self.name)
    }

    /// Wrap the body in a dialect-correct transaction block.
    ///
    /// Layout: `BEGIN TRANSACTION[;]`, blank line, body, blank line,
    /// `COMMIT[;]`; an empty body collapses to a single blank line.
    pub fn render(&self, dialect: SqlDialect) -> String {
        let term = dialect.terminator();
        let mut parts = vec![format!("BEGIN TRANSACTION{term}")];
        if !self.body.is_empty() {
            parts.push(self.body.clone());
        }
        parts.push(format!("COMMIT{term}"));
        parts.join("\n\n")
    }
}

/// Cut one script per complete span, in the table's discovery order.
///
/// The body is the lines strictly between the two marker lines, joined with
/// `\n` and trimmed of surrounding whitespace.
pub fn extract_scripts<S: AsRef<str>>(lines: &[S], spans: &SpanTable) -> Vec<MigrationScript> {
    spans
        .iter()
        .filter_map(|span| {
            let end = span.end_line?;
            let body = if end > span.start_line + 1 {
                lines[span.start_line + 1..end]
                    .iter()
                    .map(|l| l.as_ref())
                    .collect::<Vec<_>>()
                    .join("\n")
                    .trim()
                    .to_string()
            } else {
                String::new()
            };
            Some(MigrationScript {
                version: span.version,
                name: span.name.clone(),
                body,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::marker::scan_markers;

    fn lines(log: &str) -> Vec<&str> {
        log.lines().collect()
    }

    #[test]
    fn extracts_body_between_markers() {
        let log = "\
/* 20240101000000: CreateUsers migrating
CREATE TABLE users(id uuid primary key);
/* 20240101000000: CreateUsers migrated";
        let lines = lines(log);
        let table = scan_markers(&lines).unwrap();
        let scripts = extract_scripts(&lines, &table);
        assert_eq!(scripts.len(), 1);
        assert_eq!(scripts[0].version, 20240101000000);
        assert_eq!(scripts[0].body, "CREATE TABLE users(id uuid primary key);");
    }

    #[test]
    fn postgres_render_matches_expected_layout() {
        let script = MigrationScript {
            version: 20240101000000,
            name: "CreateUsers".into(),
            body: "CREATE TABLE users(id uuid primary key);".into(),
        };
        assert_eq!(
            script.render(SqlDialect::Postgres),
            "BEGIN TRANSACTION;\n\nCREATE TABLE users(id uuid primary key);\n\nCOMMIT;"
        );
    }

    #[rstest]
    #[case(SqlDialect::Postgres, "BEGIN TRANSACTION;", "COMMIT;")]
    #[case(SqlDialect::Sqlite, "BEGIN TRANSACTION;", "COMMIT;")]
    #[case(SqlDialect::SqlServer, "BEGIN TRANSACTION", "COMMIT")]
    #[case(SqlDialect::SqlServer2014, "BEGIN TRANSACTION", "COMMIT")]
    fn transaction_wrapper_per_dialect(
        #[case] dialect: SqlDialect,
        #[case] first: &str,
        #[case] last: &str,
    ) {
        let script = MigrationScript {
            version: 1,
            name: "X".into(),
            body: "SELECT 1;".into(),
        };
        let rendered = script.render(dialect);
        assert_eq!(rendered.lines().next().unwrap(), first);
        assert_eq!(rendered.lines().last().unwrap(), last);
    }

    #[test]
    fn empty_body_renders_without_double_blank() {
        let script = MigrationScript {
            version: 1,
            name: "Noop".into(),
            body: String::new(),
        };
        assert_eq!(
            script.render(SqlDialect::Sqlite),
            "BEGIN TRANSACTION;\n\nCOMMIT;"
        );
    }

    #[test]
    fn body_is_trimmed_but_interior_blank_lines_survive() {
        let log = "\
/* 3: Mixed migrating

CREATE TABLE a(x int);

CREATE TABLE b(y int);

/* 3: Mixed migrated";
        let lines = lines(log);
        let table = scan_markers(&lines).unwrap();
        let scripts = extract_scripts(&lines, &table);
        assert_eq!(
            scripts[0].body,
            "CREATE TABLE a(x int);\n\nCREATE TABLE b(y int);"
        );
    }

    #[test]
    fn adjacent_markers_yield_empty_body() {
        let log = "\
/* 9: Empty migrating
/* 9: Empty migrated";
        let lines = lines(log);
        let table = scan_markers(&lines).unwrap();
        let scripts = extract_scripts(&lines, &table);
        assert_eq!(scripts[0].body, "");
    }

    #[test]
    fn file_name_uses_version_and_name() {
        let script = MigrationScript {
            version: 42,
            name: "AddIndex".into(),
            body: String::new(),
        };
        assert_eq!(script.file_name(), "42_AddIndex.sql");
    }

    #[test]
    fn scripts_come_out_in_discovery_order() {
        let log = "\
/* 5: Later migrating
b
/* 5: Later migrated
/* 2: Earlier migrating
a
/* 2: Earlier migrated";
        let lines = lines(log);
        let table = scan_markers(&lines).unwrap();
        let scripts = extract_scripts(&lines, &table);
        let versions: Vec<u64> = scripts.iter().map(|s| s.version).collect();
        assert_eq!(versions, vec![5, 2]);
    }
}
