// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Query builders
//!
//! Fluent, consuming builders for the four statement shapes plus the
//! set-operation tree that combines `SELECT`s:
//!
//! - [`SelectQuery`] / [`Query`] — `SELECT`, wrapped with `ORDER BY` /
//!   `LIMIT` / `OFFSET` / `WITH` and, transitively, [`CompoundSelect`]
//!   (`UNION` / `INTERSECT` / `EXCEPT`).
//! - [`InsertQuery`], [`UpdateQuery`], [`DeleteQuery`] — the remaining
//!   statement kinds, rendered directly rather than through [`Query`].
//!
//! Every builder method consumes `self` and returns a new value; nodes are
//! conceptually immutable once referenced from another node.

use std::collections::BTreeMap;

use crate::expr::{Expr, OrderBy};
use crate::source::{Cte, Source, Table};

/// The `SELECT`/compound-`SELECT` family: a body (plain select or a
/// set-operation tree) plus the clauses that apply to the whole result —
/// `WITH`, `ORDER BY`, `LIMIT`, `OFFSET`.
#[derive(Debug, Clone)]
pub struct Query {
    pub body: SetOp,
    pub ctes: Vec<Cte>,
    pub order_by: Vec<OrderBy>,
    pub limit: Option<Expr>,
    pub offset: Option<Expr>,
}

impl Query {
    pub fn with_cte(mut self, ctes: impl IntoIterator<Item = Cte>) -> Self {
        self.ctes.extend(ctes);
        self
    }

    pub fn order_by(mut self, items: impl IntoIterator<Item = impl Into<OrderBy>>) -> Self {
        self.order_by.extend(items.into_iter().map(Into::into));
        self
    }

    pub fn limit(mut self, n: impl Into<Expr>) -> Self {
        self.limit = Some(n.into());
        self
    }

    pub fn offset(mut self, n: impl Into<Expr>) -> Self {
        self.offset = Some(n.into());
        self
    }

    pub fn union(self, rhs: impl Into<Query>) -> Query {
        compound(self, SetOperator::Union, rhs)
    }

    pub fn union_all(self, rhs: impl Into<Query>) -> Query {
        compound(self, SetOperator::UnionAll, rhs)
    }

    pub fn intersect(self, rhs: impl Into<Query>) -> Query {
        compound(self, SetOperator::Intersect, rhs)
    }

    pub fn except(self, rhs: impl Into<Query>) -> Query {
        compound(self, SetOperator::Except, rhs)
    }

    /// Name this query as a CTE, referenceable via the returned [`Cte`].
    pub fn cte(self, name: impl Into<String>) -> Cte {
        Cte::new(name, self, false)
    }

    pub fn cte_recursive(self, name: impl Into<String>) -> Cte {
        Cte::new(name, self, true)
    }
}

fn compound(lhs: Query, op: SetOperator, rhs: impl Into<Query>) -> Query {
    Query {
        body: SetOp::Compound(Box::new(CompoundSelect {
            op,
            left: Box::new(lhs),
            right: Box::new(rhs.into()),
        })),
        ctes: Vec::new(),
        order_by: Vec::new(),
        limit: None,
        offset: None,
    }
}

impl<T: Into<Query>> std::ops::BitOr<T> for Query {
    type Output = Query;
    fn bitor(self, rhs: T) -> Query {
        self.union(rhs)
    }
}

/// The body of a [`Query`]: either a plain `SELECT` or a set-operation tree.
#[derive(Debug, Clone)]
pub enum SetOp {
    Select(Box<SelectQuery>),
    Compound(Box<CompoundSelect>),
}

/// `UNION [ALL]` / `INTERSECT` / `EXCEPT` of two queries. Rendering emits
/// the left query, the operator, the right query with no enclosing
/// parentheses; compounds form a left-associative tree, so `(a|b)|c`
/// renders identically to `a|b|c`.
#[derive(Debug, Clone)]
pub struct CompoundSelect {
    pub op: SetOperator,
    pub left: Box<Query>,
    pub right: Box<Query>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperator {
    Union,
    UnionAll,
    Intersect,
    Except,
}

impl SetOperator {
    pub fn token(self) -> &'static str {
        match self {
            SetOperator::Union => "UNION",
            SetOperator::UnionAll => "UNION ALL",
            SetOperator::Intersect => "INTERSECT",
            SetOperator::Except => "EXCEPT",
        }
    }
}

/// A single `SELECT ...` statement, before being wrapped in a [`Query`].
#[derive(Debug, Clone, Default)]
pub struct SelectQuery {
    pub distinct: bool,
    pub projection: Vec<SelectItem>,
    pub from: Vec<Source>,
    pub joins: Vec<Join>,
    pub where_clause: Option<Expr>,
    pub group_by: Vec<Expr>,
    pub having: Option<Expr>,
}

/// An item in a `SELECT` projection list.
#[derive(Debug, Clone)]
pub enum SelectItem {
    Expr(Expr),
    Wildcard,
    QualifiedWildcard(Source),
}

impl From<Expr> for SelectItem {
    fn from(e: Expr) -> Self {
        SelectItem::Expr(e)
    }
}

/// A joined source in a `FROM` clause.
#[derive(Debug, Clone)]
pub struct Join {
    pub kind: JoinKind,
    pub source: Source,
    pub condition: JoinCondition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinKind {
    pub fn token(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL JOIN",
            JoinKind::Cross => "CROSS JOIN",
        }
    }
}

#[derive(Debug, Clone)]
pub enum JoinCondition {
    On(Expr),
    Using(Vec<String>),
}

impl SelectQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, items: impl IntoIterator<Item = impl Into<SelectItem>>) -> Self {
        self.projection.extend(items.into_iter().map(Into::into));
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn from_(mut self, sources: impl IntoIterator<Item = impl Into<Source>>) -> Self {
        self.from.extend(sources.into_iter().map(Into::into));
        self
    }

    pub fn join(
        mut self,
        source: impl Into<Source>,
        kind: JoinKind,
        condition: JoinCondition,
    ) -> Self {
        self.joins.push(Join {
            kind,
            source: source.into(),
            condition,
        });
        self
    }

    pub fn join_on(self, source: impl Into<Source>, on: Expr) -> Self {
        self.join(source, JoinKind::Inner, JoinCondition::On(on))
    }

    pub fn left_join_on(self, source: impl Into<Source>, on: Expr) -> Self {
        self.join(source, JoinKind::Left, JoinCondition::On(on))
    }

    /// AND-combines with any previously set WHERE clause: two calls to
    /// `.where_()` are equivalent to one call with `X & Y`.
    pub fn where_(mut self, expr: Expr) -> Self {
        self.where_clause = Some(match self.where_clause {
            Some(existing) => existing & expr,
            None => expr,
        });
        self
    }

    pub fn group_by(mut self, exprs: impl IntoIterator<Item = Expr>) -> Self {
        self.group_by.extend(exprs);
        self
    }

    pub fn having(mut self, expr: Expr) -> Self {
        self.having = Some(expr);
        self
    }

    pub fn with_cte(self, ctes: impl IntoIterator<Item = Cte>) -> Query {
        Query::from(self).with_cte(ctes)
    }

    pub fn order_by(self, items: impl IntoIterator<Item = impl Into<OrderBy>>) -> Query {
        Query::from(self).order_by(items)
    }

    pub fn limit(self, n: impl Into<Expr>) -> Query {
        Query::from(self).limit(n)
    }

    pub fn offset(self, n: impl Into<Expr>) -> Query {
        Query::from(self).offset(n)
    }

    pub fn union(self, rhs: impl Into<Query>) -> Query {
        Query::from(self).union(rhs)
    }

    pub fn union_all(self, rhs: impl Into<Query>) -> Query {
        Query::from(self).union_all(rhs)
    }

    pub fn intersect(self, rhs: impl Into<Query>) -> Query {
        Query::from(self).intersect(rhs)
    }

    pub fn except(self, rhs: impl Into<Query>) -> Query {
        Query::from(self).except(rhs)
    }

    pub fn cte(self, name: impl Into<String>) -> Cte {
        Query::from(self).cte(name)
    }

    pub fn cte_recursive(self, name: impl Into<String>) -> Cte {
        Query::from(self).cte_recursive(name)
    }
}

impl From<SelectQuery> for Query {
    fn from(select: SelectQuery) -> Self {
        Query {
            body: SetOp::Select(Box::new(select)),
            ctes: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }
}

impl<T: Into<Query>> std::ops::BitOr<T> for SelectQuery {
    type Output = Query;
    fn bitor(self, rhs: T) -> Query {
        self.union(rhs)
    }
}

/// `INSERT INTO ...`: either a values list or an `INSERT ... SELECT`.
#[derive(Debug, Clone)]
pub struct InsertQuery {
    pub table: Table,
    pub source: InsertSource,
}

#[derive(Debug, Clone)]
pub enum InsertSource {
    /// One row per map; keys are column names. Column order and NULL-fill
    /// for rows missing a key are resolved at render time, not here.
    Values(Vec<BTreeMap<String, Expr>>),
    FromSelect {
        columns: Vec<String>,
        query: Box<Query>,
    },
}

impl InsertQuery {
    pub fn values(table: Table, rows: impl IntoIterator<Item = BTreeMap<String, Expr>>) -> Self {
        InsertQuery {
            table,
            source: InsertSource::Values(rows.into_iter().collect()),
        }
    }

    pub fn values_single(table: Table, row: BTreeMap<String, Expr>) -> Self {
        Self::values(table, [row])
    }

    pub fn from_select(
        table: Table,
        columns: impl IntoIterator<Item = impl Into<String>>,
        query: Query,
    ) -> Self {
        InsertQuery {
            table,
            source: InsertSource::FromSelect {
                columns: columns.into_iter().map(Into::into).collect(),
                query: Box::new(query),
            },
        }
    }
}

/// `UPDATE ... SET ...`. Assignments are a `BTreeMap` so lexicographic
/// column-name ordering falls out of the container rather than needing a
/// separate sort at render time.
#[derive(Debug, Clone)]
pub struct UpdateQuery {
    pub table: Table,
    pub assignments: BTreeMap<String, Expr>,
    pub where_clause: Option<Expr>,
}

impl UpdateQuery {
    pub fn new(table: Table) -> Self {
        UpdateQuery {
            table,
            assignments: BTreeMap::new(),
            where_clause: None,
        }
    }

    pub fn set(mut self, column: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.assignments.insert(column.into(), value.into());
        self
    }

    pub fn where_(mut self, expr: Expr) -> Self {
        self.where_clause = Some(match self.where_clause {
            Some(existing) => existing & expr,
            None => expr,
        });
        self
    }
}

/// `DELETE FROM ...` with optional `WHERE`, `ORDER BY`, `LIMIT`.
#[derive(Debug, Clone)]
pub struct DeleteQuery {
    pub table: Table,
    pub where_clause: Option<Expr>,
    pub order_by: Vec<OrderBy>,
    pub limit: Option<Expr>,
}

impl DeleteQuery {
    pub fn new(table: Table) -> Self {
        DeleteQuery {
            table,
            where_clause: None,
            order_by: Vec::new(),
            limit: None,
        }
    }

    pub fn where_(mut self, expr: Expr) -> Self {
        self.where_clause = Some(match self.where_clause {
            Some(existing) => existing & expr,
            None => expr,
        });
        self
    }

    pub fn order_by(mut self, items: impl IntoIterator<Item = impl Into<OrderBy>>) -> Self {
        self.order_by.extend(items.into_iter().map(Into::into));
        self
    }

    pub fn limit(mut self, n: impl Into<Expr>) -> Self {
        self.limit = Some(n.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Table;

    #[test]
    fn where_calls_and_combine() {
        let users = Table::new("users");
        let a = SelectQuery::new()
            .from_([users.clone()])
            .where_(users.col("active").eq(true))
            .where_(users.col("age").gt(18));
        assert!(matches!(
            a.where_clause,
            Some(Expr::BinaryOp {
                op: crate::expr::BinaryOp::And,
                ..
            })
        ));
    }

    #[test]
    fn compound_is_left_associative() {
        let users = Table::new("users");
        let a: Query = SelectQuery::new().select([users.col("id")]).from_([users.clone()]).into();
        let b: Query = SelectQuery::new().select([users.col("id")]).from_([users.clone()]).into();
        let c: Query = SelectQuery::new().select([users.col("id")]).from_([users]).into();
        let combined = a.union(b).union(c);
        match combined.body {
            SetOp::Compound(boxed) => {
                assert!(matches!(boxed.left.body, SetOp::Compound(_)));
                assert!(matches!(boxed.right.body, SetOp::Select(_)));
            }
            _ => panic!("expected compound body"),
        }
    }

    #[test]
    fn update_sorts_assignments() {
        let users = Table::new("users");
        let update = UpdateQuery::new(users).set("username", "bob").set("admin", true);
        let keys: Vec<&str> = update.assignments.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["admin", "username"]);
    }
}
