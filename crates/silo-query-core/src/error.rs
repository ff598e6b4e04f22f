//! Error types for the query compiler.

use thiserror::Error;

/// Errors raised while resolving a dialect or compiling a query.
///
/// Malformed directive values and unknown operators are not errors: they are
/// skipped so that an ignorable filter never fails a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The dialect name is not one of the supported engines.
    #[error("unsupported dialect: {0}")]
    UnsupportedDialect(String),

    /// A table or column name falls outside `[A-Za-z_][A-Za-z0-9_]*` (optionally dot-qualified).
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    /// A raw projection expression contains characters that cannot be interpolated safely.
    #[error("invalid expression: {0:?}")]
    InvalidExpression(String),
}

/// Result type alias for compiler operations.
pub type Result<T> = std::result::Result<T, QueryError>;
