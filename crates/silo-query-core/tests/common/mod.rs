#![allow(dead_code)]

use silo_query_core::{compile, CompiledQuery, QueryParams};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};

pub fn compile_query(table: &str, query: &str, dialect: &str) -> CompiledQuery {
    compile(table, &QueryParams::parse(query), dialect)
        .unwrap_or_else(|e| panic!("Failed to compile: {query}\nError: {e}"))
}

const FIXTURE: &[&str] = &[
    "CREATE TABLE users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT,
        country TEXT,
        age INTEGER,
        role TEXT
    )",
    "CREATE TABLE posts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER,
        title TEXT,
        likes INTEGER
    )",
    "CREATE TABLE comments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        post_id INTEGER NOT NULL,
        user_id INTEGER NOT NULL,
        content TEXT
    )",
    "INSERT INTO users (name, country, age, role) VALUES
        ('Alice', 'US', 25, 'admin'),
        ('Diana', 'UK', 28, 'user'),
        ('Charlie', 'UK', 35, 'admin'),
        ('Diana', 'UK', 28, 'user'),
        ('Ethan', 'CA', 22, 'user')",
    "INSERT INTO posts (user_id, title, likes) VALUES
        (1, 'Hello World', 10),
        (1, 'Second Post', 50),
        (2, 'First Thoughts', 5),
        (3, 'Charlie Speaks', 80),
        (4, 'Diana Thoughts', 25)",
    "INSERT INTO comments (post_id, user_id, content) VALUES
        (1, 1, 'Great post!'),
        (1, 2, 'Nice article'),
        (2, 3, 'Interesting read'),
        (3, 4, 'Thanks for sharing')",
];

/// Opens a single-connection in-memory database seeded with users, posts and comments.
pub async fn seeded_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    for statement in FIXTURE {
        sqlx::query(statement)
            .execute(&pool)
            .await
            .unwrap_or_else(|e| panic!("Failed to seed: {statement}\nError: {e}"));
    }
    pool
}

/// Compiles `query` for SQLite and runs it with positional bindings.
pub async fn fetch(pool: &SqlitePool, table: &str, query: &str) -> Vec<SqliteRow> {
    let compiled = compile_query(table, query, "sqlite");
    let mut statement = sqlx::query(&compiled.sql);
    for value in &compiled.bindings {
        statement = statement.bind(value.as_str());
    }
    statement
        .fetch_all(pool)
        .await
        .unwrap_or_else(|e| panic!("Failed to run: {}\nError: {e}", compiled.sql))
}
