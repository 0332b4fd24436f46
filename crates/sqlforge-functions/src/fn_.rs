// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The `fn_::*` namespace: constructors for builtin SQL function calls.
//!
//! Python's `fn.<NAME>(args…)` is attribute access returning a callable;
//! Rust has no equivalent dynamic dispatch on an identifier, so each builtin
//! gets its own named constructor, plus [`call`] as the generic escape hatch
//! for any function name not given a dedicated wrapper.

use sqlforge_ir::{Expr, FunctionCall};

/// Build an arbitrary function call. Every named constructor in this module
/// is a thin wrapper around this; construction never checks `name` against
/// the function registry — the core does not validate SQL semantics.
pub fn call(name: impl Into<String>, args: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::Function(FunctionCall {
        name: name.into(),
        args: args.into_iter().collect(),
        distinct: false,
    })
}

/// Build a function call with `DISTINCT` before its argument list, e.g.
/// `COUNT(DISTINCT x)`.
pub fn call_distinct(name: impl Into<String>, args: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::Function(FunctionCall {
        name: name.into(),
        args: args.into_iter().collect(),
        distinct: true,
    })
}

/// `COUNT(*)`.
pub fn count_star() -> Expr {
    call("COUNT", [Expr::Raw(sqlforge_ir::RawSql {
        text: "*".to_string(),
        params: Vec::new(),
    })])
}

/// `COUNT(expr)`.
pub fn count(expr: impl Into<Expr>) -> Expr {
    call("COUNT", [expr.into()])
}

/// `COUNT(DISTINCT expr)`.
pub fn count_distinct(expr: impl Into<Expr>) -> Expr {
    call_distinct("COUNT", [expr.into()])
}

/// `SUM(expr)`.
pub fn sum(expr: impl Into<Expr>) -> Expr {
    call("SUM", [expr.into()])
}

/// `AVG(expr)`.
pub fn avg(expr: impl Into<Expr>) -> Expr {
    call("AVG", [expr.into()])
}

/// `MIN(expr)`.
pub fn min(expr: impl Into<Expr>) -> Expr {
    call("MIN", [expr.into()])
}

/// `MAX(expr)`.
pub fn max(expr: impl Into<Expr>) -> Expr {
    call("MAX", [expr.into()])
}

/// `UPPER(expr)`.
pub fn upper(expr: impl Into<Expr>) -> Expr {
    call("UPPER", [expr.into()])
}

/// `LOWER(expr)`.
pub fn lower(expr: impl Into<Expr>) -> Expr {
    call("LOWER", [expr.into()])
}

/// `TRIM(expr)`.
pub fn trim(expr: impl Into<Expr>) -> Expr {
    call("TRIM", [expr.into()])
}

/// `LENGTH(expr)`.
pub fn length(expr: impl Into<Expr>) -> Expr {
    call("LENGTH", [expr.into()])
}

/// `ABS(expr)`.
pub fn abs(expr: impl Into<Expr>) -> Expr {
    call("ABS", [expr.into()])
}

/// `ROUND(expr)`.
pub fn round(expr: impl Into<Expr>) -> Expr {
    call("ROUND", [expr.into()])
}

/// `CONCAT(args…)`.
pub fn concat(args: impl IntoIterator<Item = Expr>) -> Expr {
    call("CONCAT", args)
}

/// `COALESCE(args…)`.
pub fn coalesce(args: impl IntoIterator<Item = Expr>) -> Expr {
    call("COALESCE", args)
}

/// `NOW()`.
pub fn now() -> Expr {
    call("NOW", [])
}

/// `CURRENT_DATE`, exposed as a zero-argument function call for symmetry
/// with `now()` even though some dialects render it as a bare keyword —
/// the core targets one canonical dialect, where `CURRENT_DATE()` is valid.
pub fn current_date() -> Expr {
    call("CURRENT_DATE", [])
}

/// `ROW_NUMBER()`.
pub fn row_number() -> Expr {
    call("ROW_NUMBER", [])
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlforge_ir::Table;

    #[test]
    fn count_wraps_single_arg() {
        let users = Table::new("users");
        let expr = count(users.col("id"));
        match expr {
            Expr::Function(f) => {
                assert_eq!(f.name, "COUNT");
                assert_eq!(f.args.len(), 1);
                assert!(!f.distinct);
            }
            _ => panic!("expected Function"),
        }
    }

    #[test]
    fn count_distinct_sets_flag() {
        let users = Table::new("users");
        let expr = count_distinct(users.col("id"));
        match expr {
            Expr::Function(f) => assert!(f.distinct),
            _ => panic!("expected Function"),
        }
    }

    #[test]
    fn coalesce_collects_all_args() {
        let expr = coalesce([Expr::from(1i64), Expr::from(2i64)]);
        match expr {
            Expr::Function(f) => {
                assert_eq!(f.name, "COALESCE");
                assert_eq!(f.args.len(), 2);
            }
            _ => panic!("expected Function"),
        }
    }

    #[test]
    fn call_accepts_arbitrary_name() {
        let expr = call("MY_UDF", [Expr::from(1i64)]);
        match expr {
            Expr::Function(f) => assert_eq!(f.name, "MY_UDF"),
            _ => panic!("expected Function"),
        }
    }
}
