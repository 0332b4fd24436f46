// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The embedded, file-backed [`Database`] implementation.

use async_trait::async_trait;
use sqlforge_ir::{Dialect, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Executor, SqlitePool};
use tracing::debug;

use crate::database::Database;
use crate::error::DriverResult;

/// A pooled connection to a SQLite database, either a file on disk or an
/// in-memory instance for tests.
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open (creating if absent) the SQLite database at `path`.
    pub async fn open(path: &str) -> DriverResult<Self> {
        let options = SqliteConnectOptions::new().filename(path).create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Ok(SqliteDatabase { pool })
    }

    /// An ephemeral, in-memory database — convenient for tests.
    pub async fn in_memory() -> DriverResult<Self> {
        Self::open(":memory:").await
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn execute_sql(&self, sql: &str, params: &[Value]) -> DriverResult<u64> {
        debug!(sql, param_count = params.len(), "execute_sql (sqlite)");
        let mut query = sqlx::query(sql);
        for param in params {
            query = bind_value(query, param);
        }
        let result = self.pool.execute(query).await?;
        Ok(result.rows_affected())
    }

    async fn close(&self) -> DriverResult<()> {
        self.pool.close().await;
        Ok(())
    }

    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }
}

fn bind_value<'q>(
    query: sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>,
    value: &'q Value,
) -> sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>> {
    match value {
        Value::Null => query.bind(None::<i64>),
        Value::Bool(b) => query.bind(*b),
        Value::Int(n) => query.bind(*n),
        Value::Float(f) => query.bind(*f),
        Value::Text(s) => query.bind(s.as_str()),
        Value::Bytes(b) => query.bind(b.as_slice()),
        _ => unreachable!("Value is non_exhaustive but all known variants are handled above"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_table_and_reports_rows_affected() {
        let db = SqliteDatabase::in_memory().await.unwrap();
        db.execute_sql("CREATE TABLE person (id INTEGER PRIMARY KEY, name TEXT)", &[])
            .await
            .unwrap();
        let affected = db
            .execute_sql(
                "INSERT INTO person (name) VALUES (?)",
                &[Value::Text("huey".to_string())],
            )
            .await
            .unwrap();
        assert_eq!(affected, 1);
    }

    #[tokio::test]
    async fn close_releases_the_pool() {
        let db = SqliteDatabase::in_memory().await.unwrap();
        db.close().await.unwrap();
        assert_eq!(db.dialect(), Dialect::Sqlite);
    }

    #[test]
    fn context_options_use_question_mark_placeholders() {
        use sqlforge_render::{ContextOptions, Placeholder};
        let db_options = ContextOptions::for_dialect(Dialect::Sqlite);
        assert_eq!(db_options.placeholder, Placeholder::Question);
    }
}
