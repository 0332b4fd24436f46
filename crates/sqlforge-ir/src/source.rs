// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Sources
//!
//! A [`Source`] is anything that can appear in a `FROM` or `JOIN` clause:
//! a declared [`Table`], a [`Cte`] reference, or a sub-query wrapped by
//! [`crate::query::Query`].
//!
//! ## Identity
//!
//! Two [`Column`]s belong to the same source iff they were built from the
//! same `Table`/`Cte` *value* (pointer identity, not structural equality).
//! `Table::clone()` shares identity with its origin (it is a cheap `Rc`
//! clone, like holding the same Python object twice), while
//! `Table::alias(name)` mints a *new* identity with the same table name --
//! this is what lets `User` and `User.alias("alt")` receive distinct
//! auto-aliases in the same query while still referring to the same
//! physical table.

use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::expr::{Column, Expr};
use crate::query::Query;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// A declared relation: `Table("users")` or `Table("orders", columns=[...])`.
#[derive(Debug, Clone)]
pub struct Table(Rc<TableInner>);

#[derive(Debug)]
struct TableInner {
    id: u64,
    name: String,
    columns: Option<Vec<String>>,
    user_alias: Option<String>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Table(Rc::new(TableInner {
            id: next_id(),
            name: name.into(),
            columns: None,
            user_alias: None,
        }))
    }

    /// Declare the table's columns explicitly, enabling `.col("name")`
    /// validation against a known set.
    pub fn with_columns<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Table(Rc::new(TableInner {
            id: next_id(),
            name: name.into(),
            columns: Some(columns.into_iter().map(Into::into).collect()),
            user_alias: None,
        }))
    }

    /// Return a clone sharing the table name but carrying a fresh identity
    /// and a fixed user-assigned alias, e.g. for a self-join.
    pub fn alias(&self, alias: impl Into<String>) -> Table {
        Table(Rc::new(TableInner {
            id: next_id(),
            name: self.0.name.clone(),
            columns: self.0.columns.clone(),
            user_alias: Some(alias.into()),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn user_alias(&self) -> Option<&str> {
        self.0.user_alias.as_deref()
    }

    pub fn declared_columns(&self) -> Option<&[String]> {
        self.0.columns.as_deref()
    }

    /// Reference a column of this table, e.g. `User.col("id")`.
    pub fn col(&self, name: impl Into<String>) -> Expr {
        let name = name.into();
        if let Some(cols) = &self.0.columns {
            debug_assert!(
                cols.iter().any(|c| c == &name),
                "column '{name}' is not declared on table '{}'",
                self.0.name
            );
        }
        Expr::Column(Column {
            source: Source::Table(self.clone()),
            name,
        })
    }

    fn id(&self) -> u64 {
        self.0.id
    }
}

/// A named sub-query (`WITH name AS (...)`).
#[derive(Debug, Clone)]
pub struct Cte(Rc<CteInner>);

#[derive(Debug)]
struct CteInner {
    id: u64,
    name: String,
    query: Box<Query>,
    recursive: bool,
}

impl Cte {
    pub(crate) fn new(name: impl Into<String>, query: Query, recursive: bool) -> Self {
        Cte(Rc::new(CteInner {
            id: next_id(),
            name: name.into(),
            query: Box::new(query),
            recursive,
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn is_recursive(&self) -> bool {
        self.0.recursive
    }

    pub fn query(&self) -> &Query {
        &self.0.query
    }

    /// Reference a column of this CTE, e.g. `regional_sales.col("region")`.
    pub fn col(&self, name: impl Into<String>) -> Expr {
        Expr::Column(Column {
            source: Source::Cte(self.clone()),
            name: name.into(),
        })
    }

    /// Start a new query selecting from this CTE.
    pub fn select(&self, items: impl IntoIterator<Item = Expr>) -> crate::query::SelectQuery {
        crate::query::SelectQuery::new().select(items).from_([self.clone()])
    }

    fn id(&self) -> u64 {
        self.0.id
    }
}

/// A sub-query used directly as a `FROM` source (not named via `.cte()`).
#[derive(Debug, Clone)]
pub struct Subquery(Rc<SubqueryInner>);

#[derive(Debug)]
struct SubqueryInner {
    id: u64,
    query: Box<Query>,
    user_alias: Option<String>,
}

impl Subquery {
    pub fn new(query: Query) -> Self {
        Subquery(Rc::new(SubqueryInner {
            id: next_id(),
            query: Box::new(query),
            user_alias: None,
        }))
    }

    pub fn alias(&self, alias: impl Into<String>) -> Subquery {
        Subquery(Rc::new(SubqueryInner {
            id: next_id(),
            query: Box::new(self.0.query.as_ref().clone()),
            user_alias: Some(alias.into()),
        }))
    }

    pub fn user_alias(&self) -> Option<&str> {
        self.0.user_alias.as_deref()
    }

    pub fn query(&self) -> &Query {
        &self.0.query
    }

    pub fn col(&self, name: impl Into<String>) -> Expr {
        Expr::Column(Column {
            source: Source::Subquery(self.clone()),
            name: name.into(),
        })
    }

    fn id(&self) -> u64 {
        self.0.id
    }
}

/// Anything that can appear in a `FROM`/`JOIN` list.
#[derive(Debug, Clone)]
pub enum Source {
    Table(Table),
    Subquery(Subquery),
    Cte(Cte),
}

impl Source {
    /// Pointer identity used for alias-sharing and equality.
    pub fn id(&self) -> u64 {
        match self {
            Source::Table(t) => t.id(),
            Source::Subquery(s) => s.id(),
            Source::Cte(c) => c.id(),
        }
    }

    pub fn user_alias(&self) -> Option<&str> {
        match self {
            Source::Table(t) => t.user_alias(),
            Source::Subquery(s) => s.user_alias(),
            Source::Cte(_) => None,
        }
    }
}

impl PartialEq for Source {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl From<Table> for Source {
    fn from(t: Table) -> Self {
        Source::Table(t)
    }
}

impl From<Cte> for Source {
    fn from(c: Cte) -> Self {
        Source::Cte(c)
    }
}

impl From<Subquery> for Source {
    fn from(s: Subquery) -> Self {
        Source::Subquery(s)
    }
}
