//! WHERE and HAVING builders.

use crate::dialect::DialectCaps;
use crate::directive::{Condition, LogicalGroup, Operator, Predicate};

use super::Fragment;

/// Renders `WHERE ...`, or nothing when there are no conditions.
#[must_use]
pub fn build_where(conditions: &[Condition], caps: &DialectCaps) -> Option<Fragment> {
    build_conditions("WHERE", conditions, caps)
}

/// Renders `HAVING ...`, or nothing when there are no conditions.
#[must_use]
pub fn build_having(conditions: &[Condition], caps: &DialectCaps) -> Option<Fragment> {
    build_conditions("HAVING", conditions, caps)
}

fn build_conditions(keyword: &str, conditions: &[Condition], caps: &DialectCaps) -> Option<Fragment> {
    if conditions.is_empty() {
        return None;
    }
    let mut clause = Fragment::raw(format!("{keyword} "));
    clause.append(Fragment::join(
        conditions.iter().map(|c| render_condition(c, caps)),
        " AND ",
    ));
    Some(clause)
}

/// Renders one top-level term.
#[must_use]
pub fn render_condition(condition: &Condition, caps: &DialectCaps) -> Fragment {
    match condition {
        Condition::Predicate(predicate) => render_predicate(predicate, caps),
        Condition::Group(group) => render_group(group, caps),
    }
}

/// Renders `(member OP member ...)`.
#[must_use]
pub fn render_group(group: &LogicalGroup, caps: &DialectCaps) -> Fragment {
    let separator = format!(" {} ", group.combinator.keyword());
    let mut fragment = Fragment::raw("(");
    fragment.append(Fragment::join(
        group.members.iter().map(|m| render_predicate(m, caps)),
        &separator,
    ));
    fragment.push_str(")");
    fragment
}

/// Renders one predicate with its operand bound.
///
/// `in` binds every item of the operand; the other operators bind it as one
/// literal.
#[must_use]
pub fn render_predicate(predicate: &Predicate, caps: &DialectCaps) -> Fragment {
    let column = caps.quote_identifier(&predicate.column);
    let symbol = match predicate.operator {
        Operator::In => return render_in_list(&column, predicate.operand.items()),
        Operator::Ilike if !caps.supports_ilike => {
            let mut fragment = Fragment::raw(format!("LOWER({column}) LIKE LOWER("));
            fragment.bind(predicate.operand.literal());
            fragment.push_str(")");
            return fragment;
        }
        Operator::Eq => "=",
        Operator::Neq => "<>",
        Operator::Gt => ">",
        Operator::Gte => ">=",
        Operator::Lt => "<",
        Operator::Lte => "<=",
        Operator::Like => "LIKE",
        Operator::Ilike => "ILIKE",
    };
    let mut fragment = Fragment::raw(format!("{column} {symbol} "));
    fragment.bind(predicate.operand.literal());
    fragment
}

fn render_in_list(column: &str, items: &[String]) -> Fragment {
    let mut fragment = Fragment::raw(format!("{column} IN ("));
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            fragment.push_str(", ");
        }
        fragment.bind(item.as_str());
    }
    fragment.push_str(")");
    fragment
}
