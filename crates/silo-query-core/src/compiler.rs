//! SQL assembly.
//!
//! Sections are emitted in a fixed order and bindings are collected in the
//! same order, so the n-th binding always belongs to the n-th placeholder:
//!
//! ```text
//! SELECT <projection> FROM <table>
//! JOIN ...
//! WHERE ...
//! GROUP BY ...
//! HAVING ...
//! ORDER BY ...
//! <pagination>
//! ```

use serde::Serialize;
use tracing::debug;

use crate::builder::{
    build_from, build_group_by, build_having, build_joins, build_order_by, build_select,
    build_where, plan_pagination, Fragment,
};
use crate::dialect::Dialect;
use crate::directive::ParsedQuery;
use crate::error::Result;
use crate::ident::{placeholder, validate_identifier};
use crate::params::QueryParams;

/// Parameterized SQL text with its positional bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledQuery {
    /// SQL text with `?` placeholders.
    pub sql: String,
    /// One value per placeholder, in placeholder order.
    pub bindings: Vec<String>,
}

impl CompiledQuery {
    /// Counts the placeholders in the SQL text.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches(placeholder()).count()
    }
}

/// Compiles query strings for one dialect.
///
/// The dialect is resolved once, when the compiler is configured; compiling
/// is stateless and safe to call from any number of threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compiler {
    dialect: Dialect,
}

impl Compiler {
    /// Creates a compiler for a dialect name.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnsupportedDialect`](crate::QueryError::UnsupportedDialect)
    /// for an unknown name.
    pub fn new(dialect_name: &str) -> Result<Self> {
        Ok(Self::for_dialect(dialect_name.parse()?))
    }

    /// Creates a compiler for a resolved dialect.
    #[must_use]
    pub const fn for_dialect(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// Returns the target dialect.
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Compiles a `SELECT` over `table` from query-string directives.
    ///
    /// # Errors
    ///
    /// Returns an error when the table, a column or a projection expression
    /// cannot be interpolated safely.
    pub fn compile(&self, table: &str, params: &QueryParams) -> Result<CompiledQuery> {
        let table = validate_identifier(table)?;
        let parsed = ParsedQuery::parse(params)?;
        let caps = self.dialect.caps();

        let pagination = plan_pagination(parsed.pagination, caps);

        let mut sections = vec![Fragment::raw(format!(
            "{} {}",
            build_select(&parsed.projection, parsed.exclude, pagination.top, caps),
            build_from(table, caps)
        ))];
        sections.extend(build_joins(&parsed.joins, caps).into_iter().map(Fragment::raw));
        sections.extend(build_where(&parsed.conditions, caps));
        sections.extend(build_group_by(&parsed.group_by, caps).map(Fragment::raw));
        sections.extend(build_having(&parsed.having, caps));
        sections.extend(
            build_order_by(parsed.order.as_ref(), pagination.requires_order, caps)
                .map(Fragment::raw),
        );
        sections.extend(pagination.suffix.map(Fragment::raw));

        let (sql, bindings) = Fragment::join(sections.into_iter().filter(|s| !s.is_empty()), "\n")
            .into_parts();
        let compiled = CompiledQuery {
            sql: sql.trim().to_string(),
            bindings,
        };

        debug!(
            table,
            dialect = %self.dialect,
            bindings = compiled.bindings.len(),
            "compiled query"
        );
        Ok(compiled)
    }
}

/// Compiles a `SELECT` over `table` for the named dialect.
///
/// # Errors
///
/// Returns [`QueryError::UnsupportedDialect`](crate::QueryError::UnsupportedDialect)
/// for an unknown dialect, or an identifier error from [`Compiler::compile`].
pub fn compile(table: &str, params: &QueryParams, dialect_name: &str) -> Result<CompiledQuery> {
    Compiler::new(dialect_name)?.compile(table, params)
}
