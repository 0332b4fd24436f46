// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Expressions
//!
//! This module represents SQL expressions in the node algebra.
//!
//! ## Design
//!
//! Expressions are the building blocks of SQL queries and can represent:
//!
//! - **Column references**: `table.column` or unqualified `column`
//! - **Bind values**: a [`Value`] captured as a placeholder parameter
//! - **Raw SQL fragments**: caller-supplied text with optional inline params
//! - **Binary operations**: arithmetic, comparison, logical, string operations
//! - **Unary operations**: negation, NOT
//! - **Function calls**: built-in and user-defined functions
//! - **Lists**: value lists for `IN` clauses
//! - **Sub-queries**: a [`crate::query::Query`] used as a scalar value
//!
//! ## Operator overloading
//!
//! Rust's `PartialEq`/`PartialOrd` traits are contractually bool-returning,
//! so `==`/`<`/`>` etc. cannot be repurposed to build expression trees
//! without violating their contract. Comparisons are therefore named
//! methods (`.eq()`, `.lt()`, ...). Operators whose traits allow an
//! arbitrary `Output` type are overloaded directly:
//!
//! - `&` ([`std::ops::BitAnd`]) -> `AND`
//! - `|` ([`std::ops::BitOr`]) -> `OR`
//! - `+ - * / %` -> arithmetic
//! - `!` ([`std::ops::Not`]) -> `NOT`
//! - `<<` ([`std::ops::Shl`]) -> `IN`
//! - `>>` ([`std::ops::Shr`]) -> `IS`

use serde::{Deserialize, Serialize};

use crate::query::Query;
use crate::source::Source;

/// A SQL expression node.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum Expr {
    /// Column reference bound to an owning [`Source`].
    Column(Column),
    /// A bind-parameter literal.
    Literal(Value),
    /// A raw SQL fragment, optionally carrying its own inline parameters.
    Raw(RawSql),
    /// Binary operation, e.g. `a + b`, `x = 5`.
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    /// Unary operation, e.g. `NOT a`.
    UnaryOp { op: UnaryOp, expr: Box<Expr> },
    /// Function invocation, e.g. `COUNT(*)`.
    Function(FunctionCall),
    /// `<expr> AS <alias>`.
    Alias { expr: Box<Expr>, alias: String },
    /// A parenthesized list of expressions, e.g. the RHS of `IN (...)`.
    List(Vec<Expr>),
    /// A `SELECT` used as a scalar value or inside `IN (...)`.
    Subquery(Box<Query>),
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Expr::Column(a), Expr::Column(b)) => a == b,
            (Expr::Literal(a), Expr::Literal(b)) => a == b,
            (Expr::Raw(a), Expr::Raw(b)) => a == b,
            (
                Expr::BinaryOp { left: l1, op: o1, right: r1 },
                Expr::BinaryOp { left: l2, op: o2, right: r2 },
            ) => o1 == o2 && l1 == l2 && r1 == r2,
            (Expr::UnaryOp { op: o1, expr: e1 }, Expr::UnaryOp { op: o2, expr: e2 }) => {
                o1 == o2 && e1 == e2
            }
            (Expr::Function(a), Expr::Function(b)) => {
                a.name == b.name && a.distinct == b.distinct && a.args == b.args
            }
            (Expr::Alias { expr: e1, alias: a1 }, Expr::Alias { expr: e2, alias: a2 }) => {
                a1 == a2 && e1 == e2
            }
            (Expr::List(a), Expr::List(b)) => a == b,
            // Subqueries and any future non_exhaustive variants have no
            // structural equality defined; two subqueries are never equal.
            _ => false,
        }
    }
}

/// Column reference: an owning [`Source`] plus a column name.
#[derive(Debug, Clone)]
pub struct Column {
    pub source: Source,
    pub name: String,
}

impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        self.source.id() == other.source.id() && self.name == other.name
    }
}

/// A raw SQL fragment with optional inline bind values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSql {
    pub text: String,
    pub params: Vec<Value>,
}

/// A bind-parameter value. Opaque to the core beyond these variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}

macro_rules! value_from {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::$variant(v.into())
            }
        }
    };
}

value_from!(bool, Bool);
value_from!(i64, Int);
value_from!(i32, Int);
value_from!(f64, Float);
value_from!(String, Text);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

/// A function call, e.g. `COUNT(DISTINCT x)`.
#[derive(Debug, Clone)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<Expr>,
    pub distinct: bool,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
    Like,
    NotLike,
    In,
    NotIn,
    Is,
    IsNot,
}

impl BinaryOp {
    pub fn token(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "=",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "AND",
            BinaryOp::Or => "OR",
            BinaryOp::Like => "LIKE",
            BinaryOp::NotLike => "NOT LIKE",
            BinaryOp::In => "IN",
            BinaryOp::NotIn => "NOT IN",
            BinaryOp::Is => "IS",
            BinaryOp::IsNot => "IS NOT",
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum UnaryOp {
    Not,
    Neg,
}

/// Sort direction for `ORDER BY` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// An `ORDER BY` item: an expression plus an optional direction.
#[derive(Debug, Clone)]
pub struct OrderBy {
    pub expr: Expr,
    pub direction: Option<SortDirection>,
}

impl From<Expr> for OrderBy {
    fn from(expr: Expr) -> Self {
        OrderBy {
            expr,
            direction: None,
        }
    }
}

impl Expr {
    fn binary(self, op: BinaryOp, rhs: Expr) -> Expr {
        Expr::BinaryOp {
            left: Box::new(self),
            op,
            right: Box::new(rhs),
        }
    }

    /// `self = rhs`, or `self IS NULL` when `rhs` is the null literal.
    pub fn eq(self, rhs: impl Into<Expr>) -> Expr {
        let rhs = rhs.into();
        if matches!(rhs, Expr::Literal(Value::Null)) {
            self.binary(BinaryOp::Is, rhs)
        } else {
            self.binary(BinaryOp::Eq, rhs)
        }
    }

    /// `self != rhs`, or `self IS NOT NULL` when `rhs` is the null literal.
    pub fn ne(self, rhs: impl Into<Expr>) -> Expr {
        let rhs = rhs.into();
        if matches!(rhs, Expr::Literal(Value::Null)) {
            self.binary(BinaryOp::IsNot, rhs)
        } else {
            self.binary(BinaryOp::NotEq, rhs)
        }
    }

    pub fn lt(self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOp::Lt, rhs.into())
    }

    pub fn lte(self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOp::LtEq, rhs.into())
    }

    pub fn gt(self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOp::Gt, rhs.into())
    }

    pub fn gte(self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOp::GtEq, rhs.into())
    }

    pub fn like(self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOp::Like, rhs.into())
    }

    pub fn not_like(self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOp::NotLike, rhs.into())
    }

    pub fn is_null(self) -> Expr {
        self.binary(BinaryOp::Is, Expr::Literal(Value::Null))
    }

    pub fn is_not_null(self) -> Expr {
        self.binary(BinaryOp::IsNot, Expr::Literal(Value::Null))
    }

    /// `self NOT IN (...)`; prefer the `<<` operator for the positive form.
    pub fn not_in(self, rhs: impl IntoInList) -> Expr {
        self.binary(BinaryOp::NotIn, rhs.into_in_list())
    }

    pub fn alias(self, alias: impl Into<String>) -> Expr {
        Expr::Alias {
            expr: Box::new(self),
            alias: alias.into(),
        }
    }

    pub fn asc(self) -> OrderBy {
        OrderBy {
            expr: self,
            direction: Some(SortDirection::Asc),
        }
    }

    pub fn desc(self) -> OrderBy {
        OrderBy {
            expr: self,
            direction: Some(SortDirection::Desc),
        }
    }
}

/// Anything that can appear on the right-hand side of `IN (...)`: a list of
/// expressions, or a sub-query.
pub trait IntoInList {
    fn into_in_list(self) -> Expr;
}

impl IntoInList for Query {
    fn into_in_list(self) -> Expr {
        Expr::Subquery(Box::new(self))
    }
}

impl<T: Into<Expr>> IntoInList for Vec<T> {
    fn into_in_list(self) -> Expr {
        Expr::List(self.into_iter().map(Into::into).collect())
    }
}

impl std::ops::BitAnd for Expr {
    type Output = Expr;
    fn bitand(self, rhs: Expr) -> Expr {
        self.binary(BinaryOp::And, rhs)
    }
}

impl std::ops::BitOr for Expr {
    type Output = Expr;
    fn bitor(self, rhs: Expr) -> Expr {
        self.binary(BinaryOp::Or, rhs)
    }
}

impl std::ops::Not for Expr {
    type Output = Expr;
    fn not(self) -> Expr {
        Expr::UnaryOp {
            op: UnaryOp::Not,
            expr: Box::new(self),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Expr;
    fn add(self, rhs: Expr) -> Expr {
        self.binary(BinaryOp::Add, rhs)
    }
}

impl std::ops::Sub for Expr {
    type Output = Expr;
    fn sub(self, rhs: Expr) -> Expr {
        self.binary(BinaryOp::Sub, rhs)
    }
}

impl std::ops::Mul for Expr {
    type Output = Expr;
    fn mul(self, rhs: Expr) -> Expr {
        self.binary(BinaryOp::Mul, rhs)
    }
}

impl std::ops::Div for Expr {
    type Output = Expr;
    fn div(self, rhs: Expr) -> Expr {
        self.binary(BinaryOp::Div, rhs)
    }
}

impl std::ops::Rem for Expr {
    type Output = Expr;
    fn rem(self, rhs: Expr) -> Expr {
        self.binary(BinaryOp::Mod, rhs)
    }
}

/// `self << rhs` renders `self IN (rhs)`, accepting a list or a sub-query.
impl<T: IntoInList> std::ops::Shl<T> for Expr {
    type Output = Expr;
    fn shl(self, rhs: T) -> Expr {
        self.binary(BinaryOp::In, rhs.into_in_list())
    }
}

/// `self >> rhs` renders `self IS rhs` (typically `None`/`Value::Null`).
impl std::ops::Shr<Expr> for Expr {
    type Output = Expr;
    fn shr(self, rhs: Expr) -> Expr {
        self.binary(BinaryOp::Is, rhs)
    }
}

impl<T: Into<Value>> From<T> for Expr {
    fn from(v: T) -> Self {
        Expr::Literal(v.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Table;

    #[test]
    fn column_identity_equality() {
        let users = Table::new("users");
        let a = users.col("id");
        let b = users.col("id");
        assert_eq!(a, b);
    }

    #[test]
    fn eq_null_becomes_is_null() {
        let users = Table::new("users");
        let expr = users.col("deleted_at").eq(Expr::Literal(Value::Null));
        assert!(matches!(
            expr,
            Expr::BinaryOp {
                op: BinaryOp::Is,
                ..
            }
        ));
    }

    #[test]
    fn and_or_operators() {
        let users = Table::new("users");
        let expr = users.clone().col("a").eq(1) & users.col("b").eq(2);
        assert!(matches!(expr, Expr::BinaryOp { op: BinaryOp::And, .. }));
    }
}
