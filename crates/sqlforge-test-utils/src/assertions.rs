// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! `assert_sql!`-style helpers for comparing a rendered statement against
//! its expected SQL text and bind parameters.

use sqlforge_ir::{Expr, Value};
use sqlforge_render::{render_to_sql, ContextOptions, Statement};

/// Render `stmt` under default [`ContextOptions`] and assert the resulting
/// SQL text and bind parameters match exactly.
///
/// ```
/// use sqlforge_ir::{SelectQuery, Table};
/// use sqlforge_test_utils::assert_sql;
///
/// let users = Table::with_columns("users", ["id"]);
/// let query = SelectQuery::new().select([users.col("id")]).from_([users]);
/// assert_sql!(query, r#"SELECT "t1"."id" FROM "users" AS "t1""#, []);
/// ```
#[macro_export]
macro_rules! assert_sql {
    ($stmt:expr, $expected_sql:expr) => {
        $crate::assertions::assert_rendered(&$stmt, $expected_sql, &[]);
    };
    ($stmt:expr, $expected_sql:expr, $expected_params:expr) => {
        $crate::assertions::assert_rendered(&$stmt, $expected_sql, &$expected_params);
    };
}

/// The function backing [`assert_sql!`] — kept separate so the macro body
/// stays a one-liner and failures report from here with a useful message.
pub fn assert_rendered<T: Statement>(stmt: &T, expected_sql: &str, expected_params: &[Value]) {
    let (sql, params) = render_to_sql(stmt, ContextOptions::default()).expect("render failed");
    assert_eq!(sql, expected_sql, "rendered SQL did not match");
    assert_eq!(params, expected_params, "bind parameters did not match");
}

/// Assert `expr` is a column reference named `name`.
pub fn assert_column_ref(expr: &Expr, name: &str) {
    match expr {
        Expr::Column(col) => {
            assert_eq!(col.name, name, "expected column '{name}', found '{}'", col.name);
        }
        other => panic!("expected a column reference, found {other:?}"),
    }
}

/// Assert `expr` is an integer literal equal to `value`.
pub fn assert_literal_int(expr: &Expr, value: i64) {
    match expr {
        Expr::Literal(Value::Int(v)) => {
            assert_eq!(*v, value, "expected integer {value}, found {v}");
        }
        other => panic!("expected an integer literal, found {other:?}"),
    }
}

/// Assert `expr` is a text literal equal to `value`.
pub fn assert_literal_text(expr: &Expr, value: &str) {
    match expr {
        Expr::Literal(Value::Text(v)) => {
            assert_eq!(v, value, "expected text '{value}', found '{v}'");
        }
        other => panic!("expected a text literal, found {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlforge_ir::{SelectQuery, Table};

    #[test]
    fn assert_sql_matches_rendered_output() {
        let users = Table::with_columns("users", ["id"]);
        let query = SelectQuery::new().select([users.col("id")]).from_([users]);
        assert_sql!(query, "SELECT \"t1\".\"id\" FROM \"users\" AS \"t1\"", []);
    }

    #[test]
    #[should_panic(expected = "expected a column reference")]
    fn assert_column_ref_rejects_non_column() {
        assert_column_ref(&Expr::Literal(Value::Int(1)), "id");
    }

    #[test]
    fn assert_literal_int_matches() {
        assert_literal_int(&Expr::Literal(Value::Int(42)), 42);
    }

    #[test]
    fn assert_literal_text_matches() {
        assert_literal_text(&Expr::Literal(Value::Text("huey".to_string())), "huey");
    }
}
