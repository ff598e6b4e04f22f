//! # silo-query-core
//!
//! Compiles REST query strings into a single parameterized `SELECT`.
//!
//! A query string such as `country=in.(US,UK)&age=gt.20&orderBy=age&limit=10`
//! becomes SQL text with `?` placeholders plus the ordered values to bind, for
//! PostgreSQL, MySQL, SQLite or SQL Server.
//!
//! ```rust
//! use silo_query_core::{compile, QueryParams};
//!
//! let params = QueryParams::parse("country=in.(US,UK)&age=gt.20");
//! let compiled = compile("users", &params, "postgres").unwrap();
//!
//! assert_eq!(
//!     compiled.sql,
//!     "SELECT * FROM \"users\"\nWHERE \"country\" IN (?, ?) AND \"age\" > ?"
//! );
//! assert_eq!(compiled.bindings, ["US", "UK", "20"]);
//! ```
//!
//! ## Grammar
//!
//! | key | value |
//! |---|---|
//! | any column | `eq`, `neq`, `gt`, `gte`, `lt`, `lte`, `like`, `ilike` `.value`, or `in.(a,b)` |
//! | `or`, `and` | `(col.op.value,col.op.value)` |
//! | `join` | `table:on=left=right` |
//! | `select` | `a,b,fn(c) as d` |
//! | `group_by` | `a,b` |
//! | `having.<col>` | `op.value` |
//! | `orderBy`, `order` | column, `asc` or `desc` |
//! | `limit`, `offset` | unsigned integers |
//! | `exclude` | presence-only flag |
//!
//! Malformed values and unknown operators are skipped. Identifiers that do
//! not match `[A-Za-z_][A-Za-z0-9_]*` (optionally dot-qualified) are rejected.

pub mod builder;
pub mod compiler;
pub mod dialect;
pub mod directive;
pub mod error;
pub mod ident;
pub mod params;

pub use compiler::{compile, CompiledQuery, Compiler};
pub use dialect::{capabilities, Dialect, DialectCaps};
pub use directive::{Operator, ParsedQuery};
pub use error::{QueryError, Result};
pub use params::QueryParams;
