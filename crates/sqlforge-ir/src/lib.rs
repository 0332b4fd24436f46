// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sqlforge-ir
//!
//! The node algebra: expressions, sources, and query builder states.
//! This crate is pure data plus fluent construction — it has no notion of
//! how to turn a tree into SQL text; see `sqlforge-render` for that.

pub mod dialect;
pub mod expr;
pub mod query;
pub mod source;

pub use dialect::Dialect;
pub use expr::{
    BinaryOp, Column, Expr, FunctionCall, IntoInList, OrderBy, RawSql, SortDirection, UnaryOp,
    Value,
};
pub use query::{
    CompoundSelect, DeleteQuery, InsertQuery, InsertSource, Join, JoinCondition, JoinKind, Query,
    SelectItem, SelectQuery, SetOp, SetOperator, UpdateQuery,
};
pub use source::{Cte, Source, Table, Subquery};
