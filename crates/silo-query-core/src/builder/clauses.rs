//! SELECT, FROM, JOIN, GROUP BY and ORDER BY builders.
//!
//! None of these clauses carry bindings: they interpolate validated
//! identifiers and expressions only.

use crate::dialect::DialectCaps;
use crate::directive::{JoinSpec, OrderSpec, Projection};

/// Deterministic no-op ordering for engines that need one before an offset.
pub const SYNTHETIC_ORDER: &str = "(SELECT NULL)";

/// Renders `SELECT [TOP n ]<projection>`.
///
/// `*` is used when nothing was selected, and whenever `*` was selected
/// together with the `exclude` flag, regardless of the other fields.
#[must_use]
pub fn build_select(
    projection: &[Projection],
    exclude: bool,
    top: Option<u64>,
    caps: &DialectCaps,
) -> String {
    let wildcard_only =
        projection.is_empty() || (exclude && projection.contains(&Projection::Wildcard));
    let columns = if wildcard_only {
        String::from("*")
    } else {
        projection
            .iter()
            .map(|p| match p {
                Projection::Wildcard => String::from("*"),
                Projection::Column(name) => caps.quote_identifier(name),
                Projection::Expression(expr) => expr.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    };
    match top {
        Some(n) => format!("SELECT TOP {n} {columns}"),
        None => format!("SELECT {columns}"),
    }
}

/// Renders `FROM <table>` with the dialect's row-lock hint.
#[must_use]
pub fn build_from(table: &str, caps: &DialectCaps) -> String {
    format!("FROM {}", caps.table_reference(table))
}

/// Renders one `JOIN` line per join, in input order.
#[must_use]
pub fn build_joins(joins: &[JoinSpec], caps: &DialectCaps) -> Vec<String> {
    joins
        .iter()
        .map(|join| {
            format!(
                "JOIN {} ON {}",
                caps.table_reference(&join.table),
                join.on.join(" = ")
            )
        })
        .collect()
}

/// Renders `GROUP BY a, b`, or nothing.
#[must_use]
pub fn build_group_by(columns: &[String], caps: &DialectCaps) -> Option<String> {
    if columns.is_empty() {
        return None;
    }
    let columns: Vec<String> = columns.iter().map(|c| caps.quote_identifier(c)).collect();
    Some(format!("GROUP BY {}", columns.join(", ")))
}

/// Renders `ORDER BY`, synthesizing a no-op ordering when pagination needs one.
#[must_use]
pub fn build_order_by(
    order: Option<&OrderSpec>,
    requires_order: bool,
    caps: &DialectCaps,
) -> Option<String> {
    match order {
        Some(order) => Some(format!(
            "ORDER BY {} {}",
            caps.quote_identifier(&order.column),
            order.direction.keyword()
        )),
        None if requires_order => Some(format!("ORDER BY {SYNTHETIC_ORDER}")),
        None => None,
    }
}
