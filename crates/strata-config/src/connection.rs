use strata_core::SqlDialect;
use thiserror::Error;

use crate::config::StrataConfig;

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("no database connection strings are configured")]
    NoConnectionStrings,
    #[error(
        "more than one database connection string is configured: {keys}; pass the key of the one to use"
    )]
    AmbiguousConnectionStrings { keys: String },
    #[error("the database type could not be determined from '{connection_string}'")]
    UnknownDatabaseType { connection_string: String },
    #[error(transparent)]
    UnknownDialect(#[from] strata_core::UnknownDialect),
}

/// Resolve the connection string to use.
///
/// An explicit value that matches a configured key resolves to the mapped
/// string; any other explicit value passes through verbatim. Without an
/// explicit value the configuration must contain exactly one entry.
pub fn resolve_connection_string(
    config: &StrataConfig,
    explicit: Option<&str>,
) -> Result<String, ConnectionError> {
    if let Some(value) = explicit.filter(|v| !v.trim().is_empty()) {
        if let Some(mapped) = config.connection_strings().get(value) {
            return Ok(mapped.clone());
        }
        return Ok(value.to_string());
    }

    let strings = config.connection_strings();
    let mut values = strings.values();
    match (values.next(), values.next()) {
        (None, _) => Err(ConnectionError::NoConnectionStrings),
        (Some(only), None) => Ok(only.clone()),
        (Some(_), Some(_)) => Err(ConnectionError::AmbiguousConnectionStrings {
            keys: strings
                .keys()
                .map(|k| format!("'{k}'"))
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

/// Determine the SQL dialect: an explicit token wins, otherwise sniff the
/// connection string.
pub fn detect_dialect(
    connection_string: &str,
    token: Option<&str>,
) -> Result<SqlDialect, ConnectionError> {
    if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
        return Ok(token.parse()?);
    }

    dialect_from_connection_string(connection_string).ok_or_else(|| {
        ConnectionError::UnknownDatabaseType {
            connection_string: connection_string.to_string(),
        }
    })
}

fn dialect_from_connection_string(connection_string: &str) -> Option<SqlDialect> {
    let parts: Vec<String> = connection_string
        .split(';')
        .filter(|p| !p.trim().is_empty())
        .map(|p| {
            p.chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_ascii_lowercase()
        })
        .collect();

    let has = |prefix: &str| parts.iter().any(|p| p.starts_with(prefix));

    if has("server=") && has("initialcatalog=") {
        return Some(SqlDialect::SqlServer2016);
    }
    if has("host=") && has("database=") {
        return Some(SqlDialect::Postgres);
    }
    if has("datasource=") {
        return Some(SqlDialect::Sqlite);
    }
    None
}
