// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The PostgreSQL [`Database`] implementation.

use async_trait::async_trait;
use sqlforge_ir::{Dialect, Value};
use sqlx::{Executor, PgPool};
use tracing::debug;

use crate::database::Database;
use crate::error::DriverResult;

/// A pooled connection to a PostgreSQL server.
pub struct PostgresDatabase {
    pool: PgPool,
}

impl PostgresDatabase {
    pub async fn connect(url: &str) -> DriverResult<Self> {
        let pool = PgPool::connect(url).await?;
        Ok(PostgresDatabase { pool })
    }
}

#[async_trait]
impl Database for PostgresDatabase {
    async fn execute_sql(&self, sql: &str, params: &[Value]) -> DriverResult<u64> {
        debug!(sql, param_count = params.len(), "execute_sql (postgres)");
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
        Dialect::Postgres
    }
}

fn bind_value<'q>(
    query: sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>,
    value: &'q Value,
) -> sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> {
    match value {
        Value::Null => query.bind(None::<i64>),
        Value::Bool(b) => query.bind(*b),
        Value::Int(n) => query.bind(*n),
        Value::Float(f) => query.bind(*f),
        Value::Text(s) => query.bind(s.as_str()),
        Value::Bytes(b) => query.bind(b.as_slice()),
    }
}
