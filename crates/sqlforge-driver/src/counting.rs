// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! A query-count instrumentation decorator, for tests that assert on how
//! many statements a code path issues.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use sqlforge_ir::{Dialect, Value};

use crate::database::Database;
use crate::error::DriverResult;

/// Wraps any [`Database`] and counts the `execute_sql` calls that pass
/// through it.
pub struct CountingDatabase<D: Database> {
    inner: D,
    count: AtomicU64,
}

impl<D: Database> CountingDatabase<D> {
    pub fn new(inner: D) -> Self {
        CountingDatabase {
            inner,
            count: AtomicU64::new(0),
        }
    }

    /// Statements executed through this wrapper so far.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }

    pub fn into_inner(self) -> D {
        self.inner
    }
}

#[async_trait]
impl<D: Database> Database for CountingDatabase<D> {
    async fn execute_sql(&self, sql: &str, params: &[Value]) -> DriverResult<u64> {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.inner.execute_sql(sql, params).await
    }

    async fn close(&self) -> DriverResult<()> {
        self.inner.close().await
    }

    fn dialect(&self) -> Dialect {
        self.inner.dialect()
    }
}
