// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Integration tests for the statement builders: `SELECT`, `INSERT`,
//! `UPDATE`, `DELETE`, and the compound-select tree.

use std::collections::BTreeMap;

use sqlforge_ir::{
    DeleteQuery, Expr, InsertQuery, InsertSource, JoinCondition, JoinKind, OrderBy, Query,
    SelectQuery, SetOp, Table, UpdateQuery,
};

#[test]
fn select_distinct_sets_the_flag() {
    let users = Table::new("users");
    let query = SelectQuery::new()
        .select([users.col("username")])
        .from_([users])
        .distinct();
    assert!(query.distinct);
}

#[test]
fn join_on_appends_a_join_with_the_given_condition() {
    let users = Table::with_columns("users", ["id"]);
    let tweets = Table::with_columns("tweets", ["id", "user_id"]);
    let query = SelectQuery::new()
        .from_([users.clone()])
        .join_on(tweets.clone(), tweets.col("user_id").eq(users.col("id")));
    assert_eq!(query.joins.len(), 1);
    assert_eq!(query.joins[0].kind, JoinKind::Inner);
    assert!(matches!(query.joins[0].condition, JoinCondition::On(_)));
}

#[test]
fn left_join_on_uses_left_join_kind() {
    let users = Table::new("users");
    let tweets = Table::new("tweets");
    let query = SelectQuery::new()
        .from_([users.clone()])
        .left_join_on(tweets.clone(), tweets.col("user_id").eq(users.col("id")));
    assert_eq!(query.joins[0].kind, JoinKind::Left);
}

#[test]
fn query_limit_and_offset_wrap_the_select_body() {
    let users = Table::new("users");
    let query: Query = SelectQuery::new()
        .select([users.col("id")])
        .from_([users])
        .into();
    let paged = query.limit(10i64).offset(20i64);
    assert!(matches!(paged.limit, Some(Expr::Literal(_))));
    assert!(matches!(paged.offset, Some(Expr::Literal(_))));
}

#[test]
fn query_order_by_accepts_bare_expr_and_explicit_direction() {
    let users = Table::with_columns("users", ["id", "username"]);
    let query: Query = SelectQuery::new()
        .select([users.col("id")])
        .from_([users.clone()])
        .into();
    let ordered = query.order_by([users.col("id").into(), users.col("username").desc()]);
    assert_eq!(ordered.order_by.len(), 2);
    let second: &OrderBy = &ordered.order_by[1];
    assert!(matches!(
        second.direction,
        Some(sqlforge_ir::SortDirection::Desc)
    ));
}

#[test]
fn where_calls_and_combine() {
    let users = Table::new("users");
    let query = SelectQuery::new()
        .from_([users.clone()])
        .where_(users.col("active").eq(true))
        .where_(users.col("age").gt(18i64));
    assert!(matches!(
        query.where_clause,
        Some(Expr::BinaryOp {
            op: sqlforge_ir::BinaryOp::And,
            ..
        })
    ));
}

#[test]
fn compound_is_left_associative() {
    let users = Table::new("users");
    let a: Query = SelectQuery::new()
        .select([users.col("id")])
        .from_([users.clone()])
        .into();
    let b: Query = SelectQuery::new()
        .select([users.col("id")])
        .from_([users.clone()])
        .into();
    let c: Query = SelectQuery::new()
        .select([users.col("id")])
        .from_([users])
        .into();
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
fn insert_values_single_wraps_one_row() {
    let users = Table::new("users");
    let mut row = BTreeMap::new();
    row.insert("username".to_string(), Expr::from("huey"));
    let insert = InsertQuery::values_single(users, row);
    match insert.source {
        InsertSource::Values(rows) => assert_eq!(rows.len(), 1),
        _ => panic!("expected Values source"),
    }
}

#[test]
fn insert_from_select_carries_the_target_columns() {
    let users = Table::with_columns("users", ["id", "username"]);
    let archived = Table::with_columns("archived_users", ["id", "username"]);
    let select: Query = SelectQuery::new()
        .select([users.col("id"), users.col("username")])
        .from_([users])
        .into();
    let insert = InsertQuery::from_select(archived, ["id", "username"], select);
    match insert.source {
        InsertSource::FromSelect { columns, .. } => {
            assert_eq!(columns, vec!["id".to_string(), "username".to_string()])
        }
        _ => panic!("expected FromSelect source"),
    }
}

#[test]
fn update_sorts_assignments() {
    let users = Table::new("users");
    let update = UpdateQuery::new(users)
        .set("username", "bob")
        .set("admin", true);
    let keys: Vec<&str> = update.assignments.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["admin", "username"]);
}

#[test]
fn update_where_calls_and_combine() {
    let users = Table::new("users");
    let update = UpdateQuery::new(users.clone())
        .set("counter", 0i64)
        .where_(users.col("active").eq(true))
        .where_(users.col("id").eq(1i64));
    assert!(matches!(
        update.where_clause,
        Some(Expr::BinaryOp {
            op: sqlforge_ir::BinaryOp::And,
            ..
        })
    ));
}

#[test]
fn delete_accumulates_order_by_and_limit() {
    let users = Table::with_columns("users", ["id", "created_at"]);
    let delete = DeleteQuery::new(users.clone())
        .where_(users.col("id").eq(1i64))
        .order_by([users.col("created_at").asc()])
        .limit(5i64);
    assert_eq!(delete.order_by.len(), 1);
    assert!(matches!(delete.limit, Some(Expr::Literal(_))));
}
