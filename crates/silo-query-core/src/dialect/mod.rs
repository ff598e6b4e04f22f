//! SQL dialect support.
//!
//! The engines this compiler targets differ in how they limit rows, quote
//! identifiers and hint row locks. Each [`Dialect`] maps to a static
//! [`DialectCaps`] table that the clause builders consult.

mod caps;

pub use caps::{DialectCaps, PaginationSyntax};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};

/// A supported database engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Dialect {
    /// PostgreSQL (`postgres`, `postgresql`, `pg`).
    Postgres,
    /// MySQL or MariaDB (`mysql`, `mariadb`).
    MySql,
    /// SQLite (`sqlite`, `sqlite3`).
    Sqlite,
    /// Microsoft SQL Server (`mssql`, `sqlserver`).
    MsSql,
}

impl Dialect {
    /// Every supported dialect.
    pub const ALL: [Self; 4] = [Self::Postgres, Self::MySql, Self::Sqlite, Self::MsSql];

    /// Returns the canonical dialect name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::MySql => "mysql",
            Self::Sqlite => "sqlite",
            Self::MsSql => "mssql",
        }
    }

    /// Returns the capability table of this dialect.
    #[must_use]
    pub const fn caps(self) -> &'static DialectCaps {
        match self {
            Self::Postgres => &DialectCaps::POSTGRES,
            Self::MySql => &DialectCaps::MYSQL,
            Self::Sqlite => &DialectCaps::SQLITE,
            Self::MsSql => &DialectCaps::MSSQL,
        }
    }
}

impl FromStr for Dialect {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "mysql" | "mariadb" => Ok(Self::MySql),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            "mssql" | "sqlserver" => Ok(Self::MsSql),
            _ => Err(QueryError::UnsupportedDialect(s.to_string())),
        }
    }
}

impl TryFrom<String> for Dialect {
    type Error = QueryError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Dialect> for String {
    fn from(dialect: Dialect) -> Self {
        dialect.name().to_string()
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Looks up the capability table for a dialect name.
///
/// # Errors
///
/// Returns [`QueryError::UnsupportedDialect`] when the name is not recognized.
pub fn capabilities(dialect_name: &str) -> Result<DialectCaps> {
    dialect_name.parse::<Dialect>().map(|d| *d.caps())
}
