use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Target SQL engine family, as the migration runner names it.
///
/// The variant names double as the runner's processor-type tokens, so serde
/// round-trips them verbatim (`"Postgres"`, `"SqlServer2016"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SqlDialect {
    Postgres,
    Sqlite,
    SqlServer,
    SqlServer2000,
    SqlServer2005,
    SqlServer2008,
    SqlServer2012,
    SqlServer2014,
    SqlServer2016,
}

#[derive(Debug, Error)]
#[error("unknown sql dialect: '{0}'")]
pub struct UnknownDialect(pub String);

impl SqlDialect {
    /// The runner's canonical token for this dialect.
    pub fn as_str(&self) -> &'static str {
        match self {
            SqlDialect::Postgres => "Postgres",
            SqlDialect::Sqlite => "Sqlite",
            SqlDialect::SqlServer => "SqlServer",
            SqlDialect::SqlServer2000 => "SqlServer2000",
            SqlDialect::SqlServer2005 => "SqlServer2005",
            SqlDialect::SqlServer2008 => "SqlServer2008",
            SqlDialect::SqlServer2012 => "SqlServer2012",
            SqlDialect::SqlServer2014 => "SqlServer2014",
            SqlDialect::SqlServer2016 => "SqlServer2016",
        }
    }

    /// Whether `BEGIN TRANSACTION` / `COMMIT` need a trailing semicolon.
    /// The SQL Server family terminates batches with GO instead.
    pub fn requires_semicolon(&self) -> bool {
        matches!(self, SqlDialect::Postgres | SqlDialect::Sqlite)
    }

    /// Statement terminator for the transaction wrapper, possibly empty.
    pub fn terminator(&self) -> &'static str {
        if self.requires_semicolon() { ";" } else { "" }
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SqlDialect {
    type Err = UnknownDialect;

    /// Parse a user-supplied dialect token, accepting the common aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pg" | "postgres" | "postgresql" => Ok(SqlDialect::Postgres),
            "sqlite" => Ok(SqlDialect::Sqlite),
            "sqlserver" => Ok(SqlDialect::SqlServer),
            "sqlserver2000" => Ok(SqlDialect::SqlServer2000),
            "sqlserver2005" => Ok(SqlDialect::SqlServer2005),
            "sqlserver2008" => Ok(SqlDialect::SqlServer2008),
            "sqlserver2012" => Ok(SqlDialect::SqlServer2012),
            "sqlserver2014" => Ok(SqlDialect::SqlServer2014),
            // 2017/2019 use the 2016 processor.
            "sqlserver2016" | "sqlserver2017" | "sqlserver2019" => Ok(SqlDialect::SqlServer2016),
            _ => Err(UnknownDialect(s.to_string())),
        }
    }
}
