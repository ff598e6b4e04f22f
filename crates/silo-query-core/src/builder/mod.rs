//! Clause builders.
//!
//! One function per clause kind. Each reads parsed descriptors and a
//! [`DialectCaps`](crate::dialect::DialectCaps) table and returns SQL text;
//! the predicate builders also return the values bound to their placeholders.

mod clauses;
mod fragment;
mod pagination;
mod predicate;

pub use clauses::{
    build_from, build_group_by, build_joins, build_order_by, build_select, SYNTHETIC_ORDER,
};
pub use fragment::Fragment;
pub use pagination::{plan_pagination, PaginationPlan};
pub use predicate::{build_having, build_where, render_condition, render_group, render_predicate};
