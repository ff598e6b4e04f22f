//! Per-engine capability tables.

/// How an engine limits the number of returned rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationSyntax {
    /// `LIMIT n [OFFSET m]` after the rest of the statement.
    LimitOffset,
    /// `SELECT TOP n ...`, or `OFFSET m ROWS FETCH NEXT n ROWS ONLY`.
    TopFetch,
}

/// Syntax capabilities of one database engine.
///
/// Pure data: every clause builder reads from it, none writes to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectCaps {
    /// Row-limiting syntax.
    pub pagination: PaginationSyntax,
    /// An offset is only legal after an `ORDER BY`.
    pub requires_order_by_when_paginating: bool,
    /// Suffix appended to every table reference in `FROM` and `JOIN`.
    pub row_lock_hint: Option<&'static str>,
    /// Opening and closing quote characters for identifiers.
    pub identifier_quote: (char, char),
    /// The engine understands `ILIKE` natively.
    pub supports_ilike: bool,
    /// `LIMIT` operand meaning "all rows", for engines that reject a bare `OFFSET`.
    pub unbounded_limit: Option<&'static str>,
}

impl DialectCaps {
    /// PostgreSQL.
    pub const POSTGRES: Self = Self {
        pagination: PaginationSyntax::LimitOffset,
        requires_order_by_when_paginating: false,
        row_lock_hint: None,
        identifier_quote: ('"', '"'),
        supports_ilike: true,
        unbounded_limit: None,
    };

    /// MySQL and MariaDB.
    pub const MYSQL: Self = Self {
        pagination: PaginationSyntax::LimitOffset,
        requires_order_by_when_paginating: false,
        row_lock_hint: None,
        identifier_quote: ('`', '`'),
        supports_ilike: false,
        unbounded_limit: Some("18446744073709551615"),
    };

    /// SQLite.
    pub const SQLITE: Self = Self {
        pagination: PaginationSyntax::LimitOffset,
        requires_order_by_when_paginating: false,
        row_lock_hint: None,
        identifier_quote: ('"', '"'),
        supports_ilike: false,
        unbounded_limit: Some("-1"),
    };

    /// Microsoft SQL Server.
    pub const MSSQL: Self = Self {
        pagination: PaginationSyntax::TopFetch,
        requires_order_by_when_paginating: true,
        row_lock_hint: Some("WITH (NOLOCK)"),
        identifier_quote: ('[', ']'),
        supports_ilike: false,
        unbounded_limit: None,
    };

    /// Returns whether the engine takes `LIMIT n OFFSET m`.
    #[must_use]
    pub const fn uses_limit_offset(&self) -> bool {
        matches!(self.pagination, PaginationSyntax::LimitOffset)
    }

    /// Returns whether the engine takes `TOP n` / `OFFSET m ROWS FETCH NEXT n ROWS ONLY`.
    #[must_use]
    pub const fn uses_top_fetch(&self) -> bool {
        matches!(self.pagination, PaginationSyntax::TopFetch)
    }

    /// Quotes every dot-separated segment of an identifier.
    ///
    /// A closing quote inside a segment is doubled.
    #[must_use]
    pub fn quote_identifier(&self, name: &str) -> String {
        let (open, close) = self.identifier_quote;
        let escaped_close = format!("{close}{close}");
        name.split('.')
            .map(|segment| {
                let escaped = segment.replace(close, &escaped_close);
                format!("{open}{escaped}{close}")
            })
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Renders a table reference, with the row-lock hint when the engine has one.
    #[must_use]
    pub fn table_reference(&self, table: &str) -> String {
        let quoted = self.quote_identifier(table);
        match self.row_lock_hint {
            Some(hint) => format!("{quoted} {hint}"),
            None => quoted,
        }
    }
}
