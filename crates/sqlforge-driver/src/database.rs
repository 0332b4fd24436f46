// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The driver façade: a thin interface between a rendered `(sql, params)`
//! pair and whatever actually executes it.

use async_trait::async_trait;
use sqlforge_ir::{Dialect, Value};
use sqlforge_render::ContextOptions;

use crate::error::DriverResult;

/// Executes already-rendered SQL. Connection pooling, transactions, and
/// result-row materialization are the concrete implementation's concern,
/// not this trait's — it reports only how many rows a statement affected.
#[async_trait]
pub trait Database: Send + Sync {
    async fn execute_sql(&self, sql: &str, params: &[Value]) -> DriverResult<u64>;

    /// Release pooled connections. Idempotent: calling it more than once,
    /// or never calling it before the value is dropped, isn't an error —
    /// it only matters for callers that want a clean, awaited shutdown.
    async fn close(&self) -> DriverResult<()>;

    /// The dialect this backend renders for, which in turn picks the
    /// quote character and placeholder style a caller should render
    /// statements with before handing them to [`Database::execute_sql`].
    fn dialect(&self) -> Dialect;

    /// The [`ContextOptions`] matching [`Database::dialect`].
    fn context_options(&self) -> ContextOptions {
        ContextOptions::for_dialect(self.dialect())
    }
}
