// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sqlforge
//!
//! A composable, programmatic SQL query construction library: an
//! expression algebra for `SELECT`/`INSERT`/`UPDATE`/`DELETE`/compound
//! queries, a rendering engine that turns any such tree into parameterized
//! SQL plus an ordered bind-parameter list, and a declarative schema layer
//! on top.
//!
//! This crate is the single dependency applications take; it re-exports
//! the node algebra, the renderer, the builtin function namespace, the
//! schema layer, and the driver façade from their respective crates.
//!
//! ## Usage
//!
//! ```
//! use sqlforge::{fn_, render_to_sql, ContextOptions, SelectQuery, Table};
//!
//! let users = Table::with_columns("users", ["id", "username"]);
//! let tweets = Table::with_columns("tweets", ["id", "user_id"]);
//! let query = SelectQuery::new()
//!     .select([
//!         users.col("id"),
//!         users.col("username"),
//!         fn_::count(tweets.col("id")).alias("ct"),
//!     ])
//!     .join_on(tweets.clone(), tweets.col("user_id").eq(users.col("id")))
//!     .from_([users.clone()])
//!     .group_by([users.col("id"), users.col("username")]);
//!
//! let (sql, params) = render_to_sql(&query, ContextOptions::default()).unwrap();
//! assert!(sql.starts_with("SELECT"));
//! assert!(params.is_empty());
//! ```

pub use sqlforge_driver::{CountingDatabase, Database, DriverError, DriverResult};
pub use sqlforge_functions::fn_;
pub use sqlforge_functions::{FunctionKind, FunctionMetadata, FunctionRegistry};
pub use sqlforge_ir::{
    BinaryOp, Column, CompoundSelect, DeleteQuery, Dialect, Expr, FunctionCall, InsertQuery,
    InsertSource, IntoInList, Join, JoinCondition, JoinKind, OrderBy, Query, RawSql, SelectItem,
    SelectQuery, SetOp, SetOperator, SortDirection, Source, Table, UnaryOp, UpdateQuery, Value,
};
pub use sqlforge_render::{
    render_to_sql, ColumnScopeGuard, Context, ContextOptions, CteScopeGuard, Placeholder, Render,
    RenderError, RenderResult, SourceScopeGuard, Statement,
};
pub use sqlforge_schema::{
    create_index_sql, create_table_sql, pk_expr, Check, DataType, Field, ForeignKeyField,
    ForeignKeyTarget, IndexDef, JoinModelExt, Model, ModelBuilder, PrimaryKeyValue, SchemaError,
    SchemaManager, SchemaResult,
};

#[cfg(feature = "sqlite")]
pub use sqlforge_driver::SqliteDatabase;

#[cfg(feature = "postgres")]
pub use sqlforge_driver::PostgresDatabase;

/// A raw SQL fragment with optional inline bind values, e.g. for an
/// expression the algebra has no dedicated node for.
///
/// ```
/// use sqlforge::{sql, Value};
///
/// let expr = sql("NOW() - INTERVAL ? DAY", [Value::Int(7)]);
/// ```
pub fn sql(text: impl Into<String>, params: impl IntoIterator<Item = Value>) -> Expr {
    Expr::Raw(RawSql {
        text: text.into(),
        params: params.into_iter().collect(),
    })
}
