//! Identifier safety and placeholder emission.
//!
//! Only identifiers and validated raw expressions are ever interpolated into
//! SQL text. Literal values always leave through [`placeholder`].

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{QueryError, Result};

const NAME: &str = r"[A-Za-z_][A-Za-z0-9_]*";

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{NAME}(\.{NAME})*$")).expect("identifier pattern is valid")
});

/// `column [AS alias]` or `AGG(arg, ...) [AS alias]`, where each argument is
/// `*` or a dot-qualified column and `AGG` is one of the standard aggregates.
static EXPRESSION: LazyLock<Regex> = LazyLock::new(|| {
    let column = format!(r"{NAME}(?:\.{NAME})*");
    let arg = format!(r"(?:\*|{column})");
    let call = format!(r"(?i:count|sum|avg|min|max)\(\s*{arg}(?:\s*,\s*{arg})*\s*\)");
    Regex::new(&format!(r"^(?:{call}|{column})(?:\s+(?i:as)\s+{NAME})?$"))
        .expect("expression pattern is valid")
});

/// Returns the positional parameter token.
#[must_use]
pub const fn placeholder() -> &'static str {
    "?"
}

/// Checks that a table or column name is a plain, optionally dot-qualified identifier.
///
/// # Errors
///
/// Returns [`QueryError::InvalidIdentifier`] for anything outside
/// `[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*`.
pub fn validate_identifier(name: &str) -> Result<&str> {
    if IDENTIFIER.is_match(name) {
        Ok(name)
    } else {
        Err(QueryError::InvalidIdentifier(name.to_string()))
    }
}

/// Checks that a raw projection expression is a column or a single aggregate
/// call, each with an optional `AS alias`.
///
/// Surrounding whitespace is ignored. Keywords such as `FROM` or `UNION`
/// and any literal argument fail the match.
///
/// # Errors
///
/// Returns [`QueryError::InvalidExpression`] when the expression is not
/// `COUNT|SUM|AVG|MIN|MAX(arg, ...)` or a dot-qualified column, where each
/// argument is `*` or a dot-qualified column.
pub fn validate_expression(expr: &str) -> Result<&str> {
    if EXPRESSION.is_match(expr.trim()) {
        Ok(expr)
    } else {
        Err(QueryError::InvalidExpression(expr.to_string()))
    }
}
