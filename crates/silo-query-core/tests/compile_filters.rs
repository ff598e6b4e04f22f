//! Tests for filter, group, join, projection and ordering directives.

mod common;
use common::*;

#[test]
fn in_and_gt_filters_follow_key_order() {
    let compiled = compile_query("users", "country=in.(US,UK)&age=gt.20", "postgres");
    assert!(compiled
        .sql
        .contains("WHERE \"country\" IN (?, ?) AND \"age\" > ?"));
    assert_eq!(compiled.bindings, ["US", "UK", "20"]);
}

#[test]
fn each_operator_binds_one_value() {
    for (op, rendered) in [
        ("eq", "\"age\" = ?"),
        ("neq", "\"age\" <> ?"),
        ("gt", "\"age\" > ?"),
        ("gte", "\"age\" >= ?"),
        ("lt", "\"age\" < ?"),
        ("lte", "\"age\" <= ?"),
        ("like", "\"age\" LIKE ?"),
        ("ilike", "\"age\" ILIKE ?"),
    ] {
        let compiled = compile_query("users", &format!("age={op}.30"), "postgres");
        assert_eq!(compiled.sql, format!("SELECT * FROM \"users\"\nWHERE {rendered}"));
        assert_eq!(compiled.bindings, ["30"]);
        assert_eq!(compiled.placeholder_count(), 1);
    }
}

#[test]
fn values_are_bound_verbatim() {
    let compiled = compile_query("users", "name=like.%25li%25&age=gt.020", "postgres");
    assert_eq!(compiled.bindings, ["%li%", "020"]);
}

#[test]
fn in_list_items_are_trimmed() {
    let compiled = compile_query("users", "country=in.( US , UK,CA )", "sqlite");
    assert!(compiled.sql.contains("\"country\" IN (?, ?, ?)"));
    assert_eq!(compiled.bindings, ["US", "UK", "CA"]);
}

#[test]
fn or_group() {
    let compiled = compile_query("users", "or=(age.gt.20,country.eq.US)", "postgres");
    assert_eq!(
        compiled.sql,
        "SELECT * FROM \"users\"\nWHERE (\"age\" > ? OR \"country\" = ?)"
    );
    assert_eq!(compiled.bindings, ["20", "US"]);
}

#[test]
fn unwrapped_or_group_keeps_trailing_in_list() {
    let compiled = compile_query("users", "or=age.gt.20,country.in.(US,UK)", "postgres");
    assert_eq!(
        compiled.sql,
        "SELECT * FROM \"users\"\nWHERE (\"age\" > ? OR \"country\" IN (?, ?))"
    );
    assert_eq!(compiled.bindings, ["20", "US", "UK"]);
}

#[test]
fn groups_and_filters_combine_with_and() {
    let compiled = compile_query(
        "users",
        "role=eq.admin&and=(age.gte.20,age.lte.30)&or=(country.eq.US,country.in.(UK,CA))",
        "postgres",
    );
    assert!(compiled.sql.ends_with(
        "WHERE (\"country\" = ? OR \"country\" IN (?, ?)) AND (\"age\" >= ? AND \"age\" <= ?) AND \"role\" = ?"
    ));
    assert_eq!(compiled.bindings, ["US", "UK", "CA", "20", "30", "admin"]);
}

#[test]
fn repeated_filter_keys() {
    let compiled = compile_query("users", "age=gte.25&age=lte.35", "postgres");
    assert!(compiled.sql.ends_with("WHERE \"age\" >= ? AND \"age\" <= ?"));
    assert_eq!(compiled.bindings, ["25", "35"]);
}

#[test]
fn unknown_operators_and_malformed_values_are_ignored() {
    let compiled = compile_query(
        "posts",
        "likes=between.1&likes=gt&where=posts.likes.gt.10&title=in.()&or=(junk)",
        "postgres",
    );
    assert_eq!(compiled.sql, "SELECT * FROM \"posts\"");
    assert!(compiled.bindings.is_empty());
}

#[test]
fn having_binds_after_where() {
    let compiled = compile_query(
        "posts",
        "having.likes=gt.20&group_by=user_id&title=like.%25a%25",
        "postgres",
    );
    assert_eq!(
        compiled.sql,
        "SELECT * FROM \"posts\"\nWHERE \"title\" LIKE ?\nGROUP BY \"user_id\"\nHAVING \"likes\" > ?"
    );
    assert_eq!(compiled.bindings, ["%a%", "20"]);
}

#[test]
fn having_accepts_in_lists() {
    let compiled = compile_query("posts", "group_by=user_id&having.user_id=in.(1,2)", "postgres");
    assert_eq!(
        compiled.sql,
        "SELECT * FROM \"posts\"\nGROUP BY \"user_id\"\nHAVING \"user_id\" IN (?, ?)"
    );
    assert_eq!(compiled.bindings, ["1", "2"]);
}

#[test]
fn multiple_joins_keep_order() {
    let compiled = compile_query(
        "comments",
        "join=posts:on=comments.post_id=posts.id&join=users:on=comments.user_id=users.id&select=comments.id,posts.title,users.name",
        "postgres",
    );
    assert_eq!(
        compiled.sql,
        "SELECT comments.id, posts.title, users.name FROM \"comments\"\n\
         JOIN \"posts\" ON comments.post_id = posts.id\n\
         JOIN \"users\" ON comments.user_id = users.id"
    );
}

#[test]
fn aggregate_projection_is_passed_through() {
    let compiled = compile_query(
        "posts",
        "join=users:on=posts.user_id=users.id&select=users.country,COUNT(posts.id) as total_posts&group_by=users.country&orderBy=total_posts&order=desc&limit=2",
        "postgres",
    );
    assert_eq!(
        compiled.sql,
        "SELECT users.country, COUNT(posts.id) as total_posts FROM \"posts\"\n\
         JOIN \"users\" ON posts.user_id = users.id\n\
         GROUP BY \"users\".\"country\"\n\
         ORDER BY \"total_posts\" DESC\n\
         LIMIT 2"
    );
}

#[test]
fn repeated_select_values_are_merged() {
    let compiled = compile_query("users", "select=id&select=name,COUNT(id)+as+n", "postgres");
    assert_eq!(
        compiled.sql,
        "SELECT \"id\", \"name\", COUNT(id) as n FROM \"users\""
    );
}

#[test]
fn wildcard_with_exclude_overrides_select() {
    let compiled = compile_query("users", "select=name,*,age&exclude=password", "postgres");
    assert_eq!(compiled.sql, "SELECT * FROM \"users\"");

    let compiled = compile_query("users", "select=name,age&exclude=password", "postgres");
    assert_eq!(compiled.sql, "SELECT \"name\", \"age\" FROM \"users\"");
}

#[test]
fn order_defaults_to_ascending() {
    let compiled = compile_query("users", "orderBy=age", "postgres");
    assert!(compiled.sql.ends_with("ORDER BY \"age\" ASC"));
    let compiled = compile_query("users", "orderBy=age&order=Desc", "postgres");
    assert!(compiled.sql.ends_with("ORDER BY \"age\" ASC"));
}

#[test]
fn empty_query_renders_plain_select() {
    let compiled = compile_query("users", "", "postgres");
    assert_eq!(compiled.sql, "SELECT * FROM \"users\"");
    assert!(compiled.bindings.is_empty());
}

#[test]
fn compilation_is_deterministic() {
    let query = "or=(age.gt.20,country.eq.US)&join=posts:on=posts.user_id=users.id&limit=3&offset=1";
    for dialect in ["postgres", "mysql", "sqlite", "mssql"] {
        assert_eq!(
            compile_query("users", query, dialect),
            compile_query("users", query, dialect)
        );
    }
}

#[test]
fn literal_never_reaches_sql_text() {
    let hostile = "'; DROP TABLE users; --";
    let query = format!(
        "name=eq.{}&having.age=gt.{}&or=(role.eq.{})",
        urlencode(hostile),
        urlencode(hostile),
        urlencode(hostile)
    );
    let compiled = compile_query("users", &query, "postgres");
    assert!(!compiled.sql.contains("DROP"));
    assert_eq!(compiled.bindings.len(), 3);
    assert!(compiled.bindings.iter().all(|b| b == hostile));
}

#[test]
fn unsafe_identifiers_are_rejected() {
    use silo_query_core::{compile, QueryError, QueryParams};

    let cases = [
        ("users", "na%22me=eq.x", QueryError::InvalidIdentifier("na\"me".to_string())),
        ("users", "orderBy=age;drop", QueryError::InvalidIdentifier("age;drop".to_string())),
        (
            "users",
            "select=COUNT(id)--",
            QueryError::InvalidExpression("COUNT(id)--".to_string()),
        ),
        (
            "users",
            "select=name+FROM+secrets+UNION+SELECT+name+as+x",
            QueryError::InvalidExpression("name FROM secrets UNION SELECT name as x".to_string()),
        ),
        (
            "users",
            "select=pg_sleep(10)+as+x",
            QueryError::InvalidExpression("pg_sleep(10) as x".to_string()),
        ),
        (
            "users",
            "join=x y:on=a.b=c.d",
            QueryError::InvalidIdentifier("x y".to_string()),
        ),
        ("bad table", "", QueryError::InvalidIdentifier("bad table".to_string())),
    ];
    for (table, query, expected) in cases {
        assert_eq!(
            compile(table, &QueryParams::parse(query), "postgres"),
            Err(expected),
            "{table} ? {query}"
        );
    }
}

fn urlencode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
