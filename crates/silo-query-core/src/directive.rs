//! Directive parsing.
//!
//! Turns raw query parameters into typed clause descriptors. Directives are
//! evaluated in a fixed priority order, never in key order, because the order
//! in which predicates are collected is the order their placeholders appear in
//! the rendered SQL.

use std::borrow::Cow;
use std::fmt;

use tracing::trace;

use crate::error::Result;
use crate::ident::{validate_expression, validate_identifier};
use crate::params::QueryParams;

/// Comparison operators understood by column filters.
///
/// The set is closed: an unknown operator name drops the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Equal (=)
    Eq,
    /// Not equal (<>)
    Neq,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Gte,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Lte,
    /// Pattern match (LIKE)
    Like,
    /// Case-insensitive pattern match
    Ilike,
    /// List membership (IN)
    In,
}

impl Operator {
    /// Parses an operator name as written in the query string.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "eq" => Some(Self::Eq),
            "neq" => Some(Self::Neq),
            "gt" => Some(Self::Gt),
            "gte" => Some(Self::Gte),
            "lt" => Some(Self::Lt),
            "lte" => Some(Self::Lte),
            "like" => Some(Self::Like),
            "ilike" => Some(Self::Ilike),
            "in" => Some(Self::In),
            _ => None,
        }
    }

    /// Returns the operator name as written in the query string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Like => "like",
            Self::Ilike => "ilike",
            Self::In => "in",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The literal side of a predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// One literal.
    Single(String),
    /// The items of an `in` list.
    List(Vec<String>),
}

impl Operand {
    /// Every literal, in input order.
    #[must_use]
    pub fn items(&self) -> &[String] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::List(items) => items,
        }
    }

    /// The operand as one literal; list items are rejoined with `,`.
    #[must_use]
    pub fn literal(&self) -> Cow<'_, str> {
        match self {
            Self::Single(value) => Cow::Borrowed(value),
            Self::List(items) => Cow::Owned(items.join(",")),
        }
    }
}

/// A `(column, operator, operand)` triple parsed from one filter term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    /// Column name, already validated.
    pub column: String,
    /// Comparison operator.
    pub operator: Operator,
    /// Literal operand, always bound and never interpolated.
    pub operand: Operand,
}

impl Predicate {
    /// Builds a predicate from an operator name and its raw value.
    ///
    /// Returns `Ok(None)` when the operator is unknown or an `in` list is
    /// empty; those filters are skipped rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the column is not a valid identifier.
    pub fn parse(column: &str, operator: &str, value: &str) -> Result<Option<Self>> {
        let Some(operator) = Operator::parse(operator) else {
            trace!(column, operator, "skipping filter with unknown operator");
            return Ok(None);
        };
        let operand = if operator == Operator::In {
            let Some(items) = parse_in_list(value) else {
                trace!(column, value, "skipping empty in list");
                return Ok(None);
            };
            Operand::List(items)
        } else {
            Operand::Single(value.to_string())
        };
        let column = validate_identifier(column)?.to_string();
        Ok(Some(Self {
            column,
            operator,
            operand,
        }))
    }
}

/// How the members of a logical group are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// AND
    And,
    /// OR
    Or,
}

impl Combinator {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// A parenthesized `or`/`and` combination of predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalGroup {
    /// How members are joined.
    pub combinator: Combinator,
    /// Members in input order.
    pub members: Vec<Predicate>,
}

/// One top-level term of a `WHERE` or `HAVING` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// A plain column predicate.
    Predicate(Predicate),
    /// A parenthesized group.
    Group(LogicalGroup),
}

/// A `join=table:on=left=right` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinSpec {
    /// Joined table.
    pub table: String,
    /// Operands of the `ON` equality chain, in input order.
    pub on: Vec<String>,
}

/// One entry of the select list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// `*`
    Wildcard,
    /// A simple column name, rendered quoted.
    Column(String),
    /// An aggregate, alias or qualified name, rendered as written.
    Expression(String),
}

/// Requested row window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationSpec {
    /// Maximum number of rows.
    pub limit: Option<u64>,
    /// Rows to skip.
    pub offset: Option<u64>,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl Direction {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// The single active ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSpec {
    /// Sort column.
    pub column: String,
    /// Sort direction.
    pub direction: Direction,
}

/// Classification of one query-string key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<'a> {
    /// `or`
    Or,
    /// `and`
    And,
    /// `join`
    Join,
    /// `select`
    Select,
    /// `limit`
    Limit,
    /// `offset`
    Offset,
    /// `orderBy`
    OrderBy,
    /// `order`
    Order,
    /// `group_by`
    GroupBy,
    /// `exclude`, a presence-only flag.
    Exclude,
    /// `having.<field>`
    Having(&'a str),
    /// Any other key: a filter on that column.
    Filter(&'a str),
}

impl<'a> Directive<'a> {
    /// Classifies a query-string key.
    #[must_use]
    pub fn classify(key: &'a str) -> Self {
        match key {
            "or" => Self::Or,
            "and" => Self::And,
            "join" => Self::Join,
            "select" => Self::Select,
            "limit" => Self::Limit,
            "offset" => Self::Offset,
            "orderBy" => Self::OrderBy,
            "order" => Self::Order,
            "group_by" => Self::GroupBy,
            "exclude" => Self::Exclude,
            _ => key
                .strip_prefix("having.")
                .map_or(Self::Filter(key), Self::Having),
        }
    }
}

/// Everything the clause builders need, collected from the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    /// `WHERE` terms: logical groups first, then column filters in key order.
    pub conditions: Vec<Condition>,
    /// `JOIN` lines in input order.
    pub joins: Vec<JoinSpec>,
    /// Select list; empty means `*`.
    pub projection: Vec<Projection>,
    /// Whether the `exclude` key was present.
    pub exclude: bool,
    /// Row window.
    pub pagination: PaginationSpec,
    /// Active ordering, if any.
    pub order: Option<OrderSpec>,
    /// `GROUP BY` columns.
    pub group_by: Vec<String>,
    /// `HAVING` terms in key order.
    pub having: Vec<Condition>,
}

type DirectiveHandler = fn(&QueryParams, ParsedQuery) -> Result<ParsedQuery>;

/// Directive handlers in evaluation order.
const DIRECTIVES: [(&str, DirectiveHandler); 8] = [
    ("or/and", parse_logical_groups),
    ("join", parse_joins),
    ("select", parse_select),
    ("limit/offset", parse_pagination),
    ("orderBy", parse_order),
    ("group_by", parse_group_by),
    ("having", parse_having),
    ("filter", parse_filters),
];

impl ParsedQuery {
    /// Runs every directive handler over the query parameters.
    ///
    /// # Errors
    ///
    /// Returns an error when a well-formed directive names an identifier or
    /// expression that cannot be interpolated safely. Malformed values are
    /// skipped instead.
    pub fn parse(params: &QueryParams) -> Result<Self> {
        DIRECTIVES
            .iter()
            .try_fold(Self::default(), |parsed, (name, handler)| {
                trace!(directive = name, "parsing directive");
                handler(params, parsed)
            })
    }
}

fn parse_logical_groups(params: &QueryParams, mut parsed: ParsedQuery) -> Result<ParsedQuery> {
    for (key, combinator) in [("or", Combinator::Or), ("and", Combinator::And)] {
        for value in params.get_all(key) {
            let value = value.trim();
            let inner = value
                .strip_prefix('(')
                .and_then(|v| v.strip_suffix(')'))
                .unwrap_or(value);

            let mut members = Vec::new();
            for term in split_top_level(inner) {
                let Some((column, rest)) = term.split_once('.') else {
                    trace!(term, "skipping group term without operator");
                    continue;
                };
                let Some((operator, value)) = rest.split_once('.') else {
                    trace!(term, "skipping group term without value");
                    continue;
                };
                if let Some(predicate) = Predicate::parse(column, operator, value)? {
                    members.push(predicate);
                }
            }

            if !members.is_empty() {
                parsed.conditions.push(Condition::Group(LogicalGroup {
                    combinator,
                    members,
                }));
            }
        }
    }
    Ok(parsed)
}

fn parse_joins(params: &QueryParams, mut parsed: ParsedQuery) -> Result<ParsedQuery> {
    for value in params.get_all("join") {
        let Some((table, on)) = value.split_once(":on=") else {
            trace!(value = %value, "skipping join without :on=");
            continue;
        };
        let operands: Vec<&str> = on.split('=').map(str::trim).collect();
        if operands.len() < 2 || operands.iter().any(|o| o.is_empty()) {
            trace!(value = %value, "skipping join with incomplete on expression");
            continue;
        }
        let table = validate_identifier(table.trim())?.to_string();
        let on = operands
            .into_iter()
            .map(|operand| validate_identifier(operand).map(String::from))
            .collect::<Result<Vec<_>>>()?;
        parsed.joins.push(JoinSpec { table, on });
    }
    Ok(parsed)
}

fn parse_select(params: &QueryParams, mut parsed: ParsedQuery) -> Result<ParsedQuery> {
    for value in params.get_all("select") {
        for field in split_top_level(value) {
            let projection = if field == "*" {
                Projection::Wildcard
            } else if is_passthrough(field) {
                Projection::Expression(validate_expression(field)?.to_string())
            } else {
                Projection::Column(validate_identifier(field)?.to_string())
            };
            parsed.projection.push(projection);
        }
    }
    parsed.exclude = params.contains_key("exclude");
    Ok(parsed)
}

fn parse_pagination(params: &QueryParams, mut parsed: ParsedQuery) -> Result<ParsedQuery> {
    parsed.pagination = PaginationSpec {
        limit: parse_count(params, "limit"),
        offset: parse_count(params, "offset"),
    };
    Ok(parsed)
}

fn parse_order(params: &QueryParams, mut parsed: ParsedQuery) -> Result<ParsedQuery> {
    let Some(column) = params.last("orderBy").map(str::trim).filter(|c| !c.is_empty()) else {
        return Ok(parsed);
    };
    let direction = if params.last("order") == Some("desc") {
        Direction::Desc
    } else {
        Direction::Asc
    };
    parsed.order = Some(OrderSpec {
        column: validate_identifier(column)?.to_string(),
        direction,
    });
    Ok(parsed)
}

fn parse_group_by(params: &QueryParams, mut parsed: ParsedQuery) -> Result<ParsedQuery> {
    for value in params.get_all("group_by") {
        for field in value.split(',').map(str::trim).filter(|f| !f.is_empty()) {
            parsed.group_by.push(validate_identifier(field)?.to_string());
        }
    }
    Ok(parsed)
}

fn parse_having(params: &QueryParams, mut parsed: ParsedQuery) -> Result<ParsedQuery> {
    for (key, values) in params.iter() {
        if let Directive::Having(field) = Directive::classify(key) {
            parsed.having.extend(parse_column_filters(field, values)?);
        }
    }
    Ok(parsed)
}

fn parse_filters(params: &QueryParams, mut parsed: ParsedQuery) -> Result<ParsedQuery> {
    for (key, values) in params.iter() {
        if let Directive::Filter(column) = Directive::classify(key) {
            parsed.conditions.extend(parse_column_filters(column, values)?);
        }
    }
    Ok(parsed)
}

/// Parses every `operator.value` given for one column.
fn parse_column_filters(column: &str, values: &[String]) -> Result<Vec<Condition>> {
    let mut conditions = Vec::new();
    for value in values {
        let Some((operator, operand)) = value.split_once('.') else {
            trace!(column, value = %value, "skipping filter without operator");
            continue;
        };
        if let Some(predicate) = Predicate::parse(column, operator, operand)? {
            conditions.push(Condition::Predicate(predicate));
        }
    }
    Ok(conditions)
}

fn parse_count(params: &QueryParams, key: &str) -> Option<u64> {
    let raw = params.last(key)?;
    match raw.trim().parse() {
        Ok(n) => Some(n),
        Err(_) => {
            trace!(key, value = raw, "skipping unparseable count");
            None
        }
    }
}

/// Parses `(a,b,c)` or `a,b,c` into trimmed items.
///
/// Empty items are dropped; `None` when nothing is left.
fn parse_in_list(value: &str) -> Option<Vec<String>> {
    let value = value.trim();
    let inner = value
        .strip_prefix('(')
        .and_then(|v| v.strip_suffix(')'))
        .unwrap_or(value);
    let items: Vec<String> = inner
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect();
    (!items.is_empty()).then_some(items)
}

/// A select field is passed through unquoted when it is qualified, calls a
/// function, or carries an alias.
fn is_passthrough(field: &str) -> bool {
    field.contains(['.', '(', ')']) || field.to_ascii_lowercase().contains(" as ")
}

/// Splits on commas that are not nested inside parentheses, trimming each
/// part and dropping empty ones.
fn split_top_level(input: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0_usize;
    let mut start = 0;
    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}
