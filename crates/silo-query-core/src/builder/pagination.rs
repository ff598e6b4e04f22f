//! Row-window rendering.
//!
//! Pagination is planned before ORDER BY is rendered: on engines that only
//! accept an offset after an ordering, the plan asks the ORDER BY builder to
//! synthesize one.

use crate::dialect::{DialectCaps, PaginationSyntax};
use crate::directive::PaginationSpec;

/// How a [`PaginationSpec`] lands in the statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationPlan {
    /// `TOP n` prefix for the select list.
    pub top: Option<u64>,
    /// Trailing clause after ORDER BY.
    pub suffix: Option<String>,
    /// ORDER BY must be present even if none was requested.
    pub requires_order: bool,
}

/// Plans the row window for one dialect.
#[must_use]
pub fn plan_pagination(spec: PaginationSpec, caps: &DialectCaps) -> PaginationPlan {
    match caps.pagination {
        PaginationSyntax::LimitOffset => PaginationPlan {
            top: None,
            suffix: limit_offset(spec, caps),
            requires_order: false,
        },
        PaginationSyntax::TopFetch => match (spec.limit, spec.offset) {
            // FETCH NEXT must be positive; an empty window is TOP 0 whatever the offset.
            (Some(0), _) | (_, None) => PaginationPlan {
                top: spec.limit,
                suffix: None,
                requires_order: false,
            },
            (limit, Some(offset)) => {
                let mut suffix = format!("OFFSET {offset} ROWS");
                if let Some(limit) = limit {
                    suffix.push_str(&format!(" FETCH NEXT {limit} ROWS ONLY"));
                }
                PaginationPlan {
                    top: None,
                    suffix: Some(suffix),
                    requires_order: caps.requires_order_by_when_paginating,
                }
            }
        },
    }
}

fn limit_offset(spec: PaginationSpec, caps: &DialectCaps) -> Option<String> {
    let limit = spec
        .limit
        .map(|n| format!("LIMIT {n}"))
        .or_else(|| {
            spec.offset
                .and(caps.unbounded_limit)
                .map(|all| format!("LIMIT {all}"))
        });
    let offset = spec.offset.map(|n| format!("OFFSET {n}"));
    let parts: Vec<String> = limit.into_iter().chain(offset).collect();
    (!parts.is_empty()).then(|| parts.join(" "))
}
