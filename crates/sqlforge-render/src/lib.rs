// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sqlforge-render
//!
//! Renders a `sqlforge-ir` node tree into parameterized SQL text plus an
//! ordered list of bind values.
//!
//! ## Rendering process
//!
//! ```text
//! sqlforge-ir Query/InsertQuery/UpdateQuery/DeleteQuery -> Render -> (String, Vec<Value>)
//! ```
//!
//! A [`Context`] accumulates the output buffer, the bind-parameter list, and
//! two scopes threaded through the walk: which `Source`s are qualifiable
//! right now ([`Context::scope_column`]) and which `FROM`-alias counter is
//! active ([`Context::scope_source`] / [`Context::scope_source_root`]).
//!
//! ## Usage
//!
//! ```
//! use sqlforge_ir::{SelectQuery, Table};
//! use sqlforge_render::{render_to_sql, ContextOptions};
//!
//! let users = Table::with_columns("users", ["id", "username"]);
//! let query = SelectQuery::new()
//!     .select([users.col("id")])
//!     .from_([users]);
//! let (sql, params) = render_to_sql(&query, ContextOptions::default()).unwrap();
//! assert!(sql.starts_with("SELECT"));
//! assert!(params.is_empty());
//! ```

pub mod context;
pub mod error;
pub mod render;

pub use context::{
    ColumnScopeGuard, Context, ContextOptions, CteScopeGuard, Placeholder, SourceScopeGuard,
};
pub use error::{RenderError, RenderResult};
pub use render::{render_to_sql, Render, Statement};
