// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Walks a `sqlforge-ir` node tree and writes parameterized SQL text into a
//! [`Context`].
//!
//! `BinaryOp` and `UnaryOp` always wrap their own output in one pair of
//! parentheses; `WHERE`/`ON`/`HAVING` clauses render their expression with
//! no extra wrapper of their own, so the parentheses an onlooker sees there
//! come from the expression, not the clause.

use std::collections::{BTreeMap, BTreeSet};

use sqlforge_ir::{
    Column, CompoundSelect, Cte, DeleteQuery, Expr, FunctionCall, InsertQuery, InsertSource, Join,
    JoinCondition, OrderBy, Query, SelectItem, SelectQuery, SetOp, SetOperator, Source,
    SortDirection, UnaryOp, UpdateQuery, Value,
};

use crate::context::Context;
use crate::error::{RenderError, RenderResult};

/// Implemented by every node type that knows how to write itself into a
/// [`Context`]. Top-level statements go through [`render_to_sql`] instead of
/// this trait directly, since a bare `Query` needs to declare whether it is
/// the render's root.
pub trait Render {
    fn render(&self, ctx: &mut Context) -> RenderResult<()>;
}

/// A node that can appear as the top-level statement passed to a driver.
pub trait Statement {
    fn render_root(&self, ctx: &mut Context) -> RenderResult<()>;
}

impl Statement for Query {
    fn render_root(&self, ctx: &mut Context) -> RenderResult<()> {
        render_query(self, ctx, true)
    }
}

impl Statement for SelectQuery {
    fn render_root(&self, ctx: &mut Context) -> RenderResult<()> {
        render_select(self, ctx, true)
    }
}

impl Statement for InsertQuery {
    fn render_root(&self, ctx: &mut Context) -> RenderResult<()> {
        self.render(ctx)
    }
}

impl Statement for UpdateQuery {
    fn render_root(&self, ctx: &mut Context) -> RenderResult<()> {
        self.render(ctx)
    }
}

impl Statement for DeleteQuery {
    fn render_root(&self, ctx: &mut Context) -> RenderResult<()> {
        self.render(ctx)
    }
}

/// Render a whole statement under the given options, returning the SQL text
/// and the ordered bind parameters.
pub fn render_to_sql<T: Statement>(
    stmt: &T,
    options: crate::context::ContextOptions,
) -> RenderResult<(String, Vec<Value>)> {
    let mut ctx = Context::new(options);
    stmt.render_root(&mut ctx)?;
    Ok(ctx.finish())
}

/// `LIMIT`/`OFFSET` render an integer literal inline rather than as a bind
/// parameter — every dialect requires it and no driver needs to see it as
/// user data. A non-literal expression (e.g. a named bind site) still
/// renders through the normal expression path.
fn render_row_count(expr: &Expr, ctx: &mut Context) -> RenderResult<()> {
    match expr {
        Expr::Literal(Value::Int(n)) => {
            ctx.literal(&n.to_string());
            Ok(())
        }
        other => other.render(ctx),
    }
}

fn render_comma_list<T>(
    items: impl IntoIterator<Item = T>,
    ctx: &mut Context,
    mut f: impl FnMut(T, &mut Context) -> RenderResult<()>,
) -> RenderResult<()> {
    let mut first = true;
    for item in items {
        if !first {
            ctx.literal(", ");
        }
        first = false;
        f(item, ctx)?;
    }
    Ok(())
}

// ---- Query / SetOp --------------------------------------------------

impl Render for Query {
    /// Non-root entry point, used for CTE bodies, FROM-list sub-queries and
    /// `Expr::Subquery` — every position that is never the render's root.
    fn render(&self, ctx: &mut Context) -> RenderResult<()> {
        render_query(self, ctx, false)
    }
}

/// A recursive CTE must be a `UNION`/`UNION ALL` of a base case and a
/// recursive case -- no dialect accepts a bare `SELECT` or an `INTERSECT`/
/// `EXCEPT` body marked recursive.
fn is_union_shaped(cte: &Cte) -> bool {
    matches!(
        &cte.query().body,
        SetOp::Compound(compound) if matches!(compound.op, SetOperator::Union | SetOperator::UnionAll)
    )
}

fn render_query(query: &Query, ctx: &mut Context, is_root: bool) -> RenderResult<()> {
    for cte in &query.ctes {
        if cte.is_recursive() && !is_union_shaped(cte) {
            return Err(RenderError::InvalidRecursiveCte {
                name: cte.name().to_string(),
            });
        }
    }
    let mut cte_scope = ctx.scope_ctes(query.ctes.iter().map(|c| Source::from(c.clone()).id()));
    let ctx = cte_scope.ctx();

    if !query.ctes.is_empty() {
        let keyword = if query.ctes.iter().any(|c| c.is_recursive()) {
            "WITH RECURSIVE "
        } else {
            "WITH "
        };
        ctx.literal(keyword);
        render_comma_list(&query.ctes, ctx, |cte, ctx| {
            ctx.identifier(cte.name());
            ctx.literal(" AS (");
            cte.query().render(ctx)?;
            ctx.literal(")");
            Ok(())
        })?;
        ctx.literal(" ");
    }
    render_set_op(&query.body, ctx, is_root)?;
    if !query.order_by.is_empty() {
        ctx.literal(" ORDER BY ");
        render_comma_list(&query.order_by, ctx, |o, ctx| o.render(ctx))?;
    }
    if let Some(limit) = &query.limit {
        ctx.literal(" LIMIT ");
        render_row_count(limit, ctx)?;
    }
    if let Some(offset) = &query.offset {
        ctx.literal(" OFFSET ");
        render_row_count(offset, ctx)?;
    }
    Ok(())
}

fn render_set_op(op: &SetOp, ctx: &mut Context, is_root: bool) -> RenderResult<()> {
    match op {
        SetOp::Select(select) => render_select(select, ctx, is_root),
        SetOp::Compound(compound) => render_compound(compound, ctx, is_root),
    }
}

fn render_compound(compound: &CompoundSelect, ctx: &mut Context, is_root: bool) -> RenderResult<()> {
    render_query(&compound.left, ctx, is_root)?;
    ctx.literal(" ");
    ctx.literal(compound.op.token());
    ctx.literal(" ");
    render_query(&compound.right, ctx, false)
}

// ---- SelectQuery ------------------------------------------------------

fn render_select(select: &SelectQuery, ctx: &mut Context, is_root: bool) -> RenderResult<()> {
    let mut qualify = ctx.scope_column(true);
    let mut scope = if is_root {
        qualify.ctx().scope_source_root()
    } else {
        qualify.ctx().scope_source()
    };

    // Aliases are allocated in FROM-list encounter order, before any
    // SELECT-list text is written.
    for source in &select.from {
        scope.ctx().alias_for(source)?;
    }
    for join in &select.joins {
        scope.ctx().alias_for(&join.source)?;
    }
    let ctx = scope.ctx();

    ctx.literal("SELECT ");
    if select.distinct {
        ctx.literal("DISTINCT ");
    }
    render_comma_list(&select.projection, ctx, render_select_item)?;

    if !select.from.is_empty() {
        ctx.literal(" FROM ");
        render_comma_list(&select.from, ctx, render_from_source)?;
        for join in &select.joins {
            render_join(join, ctx)?;
        }
    }
    if let Some(where_clause) = &select.where_clause {
        ctx.literal(" WHERE ");
        where_clause.render(ctx)?;
    }
    if !select.group_by.is_empty() {
        ctx.literal(" GROUP BY ");
        render_comma_list(&select.group_by, ctx, |e, ctx| e.render(ctx))?;
    }
    if let Some(having) = &select.having {
        ctx.literal(" HAVING ");
        having.render(ctx)?;
    }
    Ok(())
}

fn render_select_item(item: &SelectItem, ctx: &mut Context) -> RenderResult<()> {
    match item {
        SelectItem::Expr(expr) => expr.render(ctx),
        SelectItem::Wildcard => {
            ctx.literal("*");
            Ok(())
        }
        SelectItem::QualifiedWildcard(source) => {
            let alias = ctx.alias_for(source)?;
            ctx.identifier(&alias);
            ctx.literal(".*");
            Ok(())
        }
    }
}

fn render_from_source(source: &Source, ctx: &mut Context) -> RenderResult<()> {
    match source {
        Source::Table(table) => {
            ctx.identifier(table.name());
            ctx.literal(" AS ");
            let alias = ctx.alias_for(source)?;
            ctx.identifier(&alias);
        }
        Source::Cte(cte) => {
            if !ctx.known_cte(source.id()) {
                return Err(RenderError::UnknownCte {
                    name: cte.name().to_string(),
                });
            }
            let alias = ctx.alias_for(source)?;
            ctx.identifier(&alias);
        }
        Source::Subquery(subquery) => {
            ctx.literal("(");
            subquery.query().render(ctx)?;
            ctx.literal(") AS ");
            let alias = ctx.alias_for(source)?;
            ctx.identifier(&alias);
        }
    }
    Ok(())
}

fn render_join(join: &Join, ctx: &mut Context) -> RenderResult<()> {
    ctx.literal(" ");
    ctx.literal(join.kind.token());
    ctx.literal(" ");
    render_from_source(&join.source, ctx)?;
    match &join.condition {
        JoinCondition::On(expr) => {
            ctx.literal(" ON ");
            expr.render(ctx)?;
        }
        JoinCondition::Using(columns) => {
            ctx.literal(" USING (");
            render_comma_list(columns, ctx, |c, ctx| {
                ctx.identifier(c);
                Ok(())
            })?;
            ctx.literal(")");
        }
    }
    Ok(())
}

// ---- Insert / Update / Delete -----------------------------------------

fn union_sorted_columns(rows: &[BTreeMap<String, Expr>]) -> Vec<String> {
    let mut set = BTreeSet::new();
    for row in rows {
        for key in row.keys() {
            set.insert(key.clone());
        }
    }
    set.into_iter().collect()
}

impl Render for InsertQuery {
    fn render(&self, ctx: &mut Context) -> RenderResult<()> {
        let mut qualify = ctx.scope_column(false);
        let ctx = qualify.ctx();
        ctx.literal("INSERT INTO ");
        ctx.identifier(self.table.name());
        match &self.source {
            InsertSource::Values(rows) => {
                let columns = union_sorted_columns(rows);
                ctx.literal(" (");
                render_comma_list(&columns, ctx, |c, ctx| {
                    ctx.identifier(c);
                    Ok(())
                })?;
                ctx.literal(") VALUES ");
                render_comma_list(rows, ctx, |row, ctx| {
                    ctx.literal("(");
                    render_comma_list(&columns, ctx, |col, ctx| match row.get(col) {
                        Some(expr) => expr.render(ctx),
                        None => {
                            ctx.literal("NULL");
                            Ok(())
                        }
                    })?;
                    ctx.literal(")");
                    Ok(())
                })?;
            }
            InsertSource::FromSelect { columns, query } => {
                ctx.literal(" (");
                render_comma_list(columns, ctx, |c, ctx| {
                    ctx.identifier(c);
                    Ok(())
                })?;
                ctx.literal(") ");
                query.render(ctx)?;
            }
        }
        Ok(())
    }
}

impl Render for UpdateQuery {
    fn render(&self, ctx: &mut Context) -> RenderResult<()> {
        let mut qualify = ctx.scope_column(false);
        let ctx = qualify.ctx();
        ctx.literal("UPDATE ");
        ctx.identifier(self.table.name());
        ctx.literal(" SET ");
        render_comma_list(&self.assignments, ctx, |(column, expr), ctx| {
            ctx.identifier(column);
            ctx.literal(" = ");
            expr.render(ctx)
        })?;
        if let Some(where_clause) = &self.where_clause {
            ctx.literal(" WHERE ");
            where_clause.render(ctx)?;
        }
        Ok(())
    }
}

impl Render for DeleteQuery {
    fn render(&self, ctx: &mut Context) -> RenderResult<()> {
        let mut qualify = ctx.scope_column(false);
        let ctx = qualify.ctx();
        ctx.literal("DELETE FROM ");
        ctx.identifier(self.table.name());
        if let Some(where_clause) = &self.where_clause {
            ctx.literal(" WHERE ");
            where_clause.render(ctx)?;
        }
        if !self.order_by.is_empty() {
            ctx.literal(" ORDER BY ");
            render_comma_list(&self.order_by, ctx, |o, ctx| o.render(ctx))?;
        }
        if let Some(limit) = &self.limit {
            ctx.literal(" LIMIT ");
            render_row_count(limit, ctx)?;
        }
        Ok(())
    }
}

// ---- Expr and leaves ----------------------------------------------------

impl Render for Expr {
    fn render(&self, ctx: &mut Context) -> RenderResult<()> {
        match self {
            Expr::Column(column) => column.render(ctx),
            Expr::Literal(value) => {
                ctx.value(value.clone());
                Ok(())
            }
            Expr::Raw(raw) => {
                ctx.literal(&raw.text);
                for param in &raw.params {
                    ctx.capture(param.clone());
                }
                Ok(())
            }
            Expr::BinaryOp { left, op, right } => {
                ctx.literal("(");
                left.render(ctx)?;
                ctx.literal(" ");
                ctx.literal(op.token());
                ctx.literal(" ");
                right.render(ctx)?;
                ctx.literal(")");
                Ok(())
            }
            Expr::UnaryOp { op, expr } => match op {
                UnaryOp::Not => {
                    ctx.literal("(NOT ");
                    expr.render(ctx)?;
                    ctx.literal(")");
                    Ok(())
                }
                UnaryOp::Neg => {
                    ctx.literal("(-");
                    expr.render(ctx)?;
                    ctx.literal(")");
                    Ok(())
                }
                _ => unreachable!("UnaryOp is non_exhaustive but all known variants are handled above"),
            },
            Expr::Function(call) => call.render(ctx),
            Expr::Alias { expr, alias } => {
                expr.render(ctx)?;
                ctx.literal(" AS ");
                if matches!(**expr, Expr::Function(_)) {
                    ctx.literal(alias);
                } else {
                    ctx.identifier(alias);
                }
                Ok(())
            }
            Expr::List(items) => {
                ctx.literal("(");
                render_comma_list(items, ctx, |e, ctx| e.render(ctx))?;
                ctx.literal(")");
                Ok(())
            }
            Expr::Subquery(query) => {
                ctx.literal("(");
                query.render(ctx)?;
                ctx.literal(")");
                Ok(())
            }
            _ => unreachable!("Expr is non_exhaustive but all known variants are handled above"),
        }
    }
}

impl Render for Column {
    fn render(&self, ctx: &mut Context) -> RenderResult<()> {
        if ctx.qualify_columns() {
            let alias = ctx.alias_for(&self.source).map_err(|_| RenderError::UnqualifiedColumn {
                column: self.name.clone(),
            })?;
            ctx.identifier(&alias);
            ctx.literal(".");
        }
        ctx.identifier(&self.name);
        Ok(())
    }
}

impl Render for FunctionCall {
    fn render(&self, ctx: &mut Context) -> RenderResult<()> {
        ctx.literal(&self.name);
        ctx.literal("(");
        if self.distinct {
            ctx.literal("DISTINCT ");
        }
        render_comma_list(&self.args, ctx, |e, ctx| e.render(ctx))?;
        ctx.literal(")");
        Ok(())
    }
}

impl Render for OrderBy {
    fn render(&self, ctx: &mut Context) -> RenderResult<()> {
        self.expr.render(ctx)?;
        match self.direction {
            Some(SortDirection::Asc) => {
                ctx.literal(" ASC");
            }
            Some(SortDirection::Desc) => {
                ctx.literal(" DESC");
            }
            None => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextOptions;
    use sqlforge_ir::{JoinKind, SelectQuery as Select, Table};

    fn opts() -> ContextOptions {
        ContextOptions::default()
    }

    #[test]
    fn renders_simple_join() {
        let user = Table::with_columns("users", ["id", "username"]);
        let tweet = Table::with_columns("tweets", ["id", "user_id", "content"]);
        let query: Query = Select::new()
            .select([user.col("id"), tweet.col("content")])
            .from_([user.clone()])
            .join_on(tweet.clone(), tweet.col("user_id").eq(user.col("id")))
            .into();
        let (sql, params) = render_to_sql(&query, opts()).unwrap();
        assert_eq!(
            sql,
            "SELECT \"t1\".\"id\", \"t2\".\"content\" FROM \"users\" AS \"t1\" INNER JOIN \"tweets\" AS \"t2\" ON (\"t2\".\"user_id\" = \"t1\".\"id\")"
        );
        assert!(params.is_empty());
    }

    #[test]
    fn renders_where_with_bind_param() {
        let user = Table::with_columns("users", ["id", "username"]);
        let query: Query = Select::new()
            .select([user.col("id")])
            .from_([user.clone()])
            .where_(user.col("username").eq("charlie"))
            .into();
        let (sql, params) = render_to_sql(&query, opts()).unwrap();
        assert_eq!(
            sql,
            "SELECT \"t1\".\"id\" FROM \"users\" AS \"t1\" WHERE (\"t1\".\"username\" = ?)"
        );
        assert_eq!(params, vec![Value::Text("charlie".to_string())]);
    }

    #[test]
    fn update_renders_bare_columns() {
        let users = Table::new("users");
        let update = UpdateQuery::new(users.clone())
            .set("counter", users.col("counter") + Expr::from(1i64))
            .where_(users.col("username").eq("huey"));
        let (sql, params) = render_to_sql(&update, opts()).unwrap();
        assert_eq!(
            sql,
            "UPDATE \"users\" SET \"counter\" = (\"counter\" + ?) WHERE (\"username\" = ?)"
        );
        assert_eq!(
            params,
            vec![Value::Int(1), Value::Text("huey".to_string())]
        );
    }

    #[test]
    fn delete_renders_bare_columns_with_limit() {
        let users = Table::new("users");
        let delete = DeleteQuery::new(users.clone())
            .where_(users.col("username").ne("huey"))
            .limit(3i64);
        let (sql, params) = render_to_sql(&delete, opts()).unwrap();
        assert_eq!(
            sql,
            "DELETE FROM \"users\" WHERE (\"username\" != ?) LIMIT 3"
        );
        assert_eq!(params, vec![Value::Text("huey".to_string())]);
    }

    #[test]
    fn insert_fills_missing_keys_with_null() {
        let users = Table::new("users");
        let mut row_a = BTreeMap::new();
        row_a.insert("username".to_string(), Expr::from("huey"));
        row_a.insert("admin".to_string(), Expr::from(true));
        let mut row_b = BTreeMap::new();
        row_b.insert("username".to_string(), Expr::from("mickey"));
        let insert = InsertQuery::values(users, [row_a, row_b]);
        let (sql, params) = render_to_sql(&insert, opts()).unwrap();
        assert_eq!(
            sql,
            "INSERT INTO \"users\" (\"admin\", \"username\") VALUES (?, ?), (NULL, ?)"
        );
        assert_eq!(
            params,
            vec![
                Value::Bool(true),
                Value::Text("huey".to_string()),
                Value::Text("mickey".to_string())
            ]
        );
    }

    #[test]
    fn cte_body_never_claims_t_prefix() {
        let orders = Table::with_columns("orders", ["region", "amount"]);
        let regional_sales = Select::new()
            .select([orders.col("region"), orders.col("amount").alias("total")])
            .from_([orders.clone()])
            .cte("regional_sales");
        let outer: Query = Select::new()
            .select([regional_sales.col("region")])
            .from_([regional_sales.clone()])
            .with_cte([regional_sales]);
        let (sql, _params) = render_to_sql(&outer, opts()).unwrap();
        assert!(sql.contains("\"orders\" AS \"a1\""));
        assert!(sql.contains("FROM \"regional_sales\""));
    }

    #[test]
    fn compound_left_branch_keeps_root() {
        let a = Table::with_columns("a", ["id"]);
        let b = Table::with_columns("b", ["id"]);
        let c = Table::with_columns("c", ["id"]);
        let left: Query = Select::new().select([a.col("id")]).from_([a.clone()]).into();
        let right: Query = Select::new().select([b.col("id")]).from_([b.clone()]).into();
        let third: Query = Select::new().select([c.col("id")]).from_([c.clone()]).into();
        let combined = left.union(right).union(third);
        let (sql, _params) = render_to_sql(&combined, opts()).unwrap();
        assert!(sql.contains("\"a\" AS \"t1\""));
        assert!(sql.contains("\"b\" AS \"a1\""));
        assert!(sql.contains("\"c\" AS \"a1\""));
    }

    #[test]
    fn referencing_an_undeclared_cte_is_an_error() {
        let orders = Table::with_columns("orders", ["region"]);
        let regional_sales = Select::new()
            .select([orders.col("region")])
            .from_([orders])
            .cte("regional_sales");
        // `regional_sales` is built but never threaded through `.with_cte()`.
        let query: Query = Select::new()
            .select([regional_sales.col("region")])
            .from_([regional_sales.clone()])
            .into();
        let err = render_to_sql(&query, opts()).unwrap_err();
        assert!(matches!(err, RenderError::UnknownCte { name } if name == "regional_sales"));
    }

    #[test]
    fn recursive_cte_that_is_not_a_union_is_rejected() {
        let orders = Table::with_columns("orders", ["id"]);
        let bad = Select::new()
            .select([orders.col("id")])
            .from_([orders])
            .cte_recursive("bad");
        let query: Query = Select::new()
            .select([bad.col("id")])
            .from_([bad.clone()])
            .with_cte([bad])
            .into();
        let err = render_to_sql(&query, opts()).unwrap_err();
        assert!(matches!(err, RenderError::InvalidRecursiveCte { name } if name == "bad"));
    }

    #[test]
    fn column_render_reports_the_unqualified_columns_own_name() {
        let orphan = Table::new("orphan");
        let column = orphan.col("id");
        let mut ctx = Context::new(opts());
        let err = column.render(&mut ctx).unwrap_err();
        assert!(matches!(err, RenderError::UnqualifiedColumn { column } if column == "id"));
    }

    #[test]
    fn user_aliased_table_keeps_explicit_name() {
        let users = Table::with_columns("users", ["id"]);
        let alt = users.alias("U2");
        let query: Query = Select::new()
            .select([alt.col("id")])
            .from_([alt.clone()])
            .join(users.clone(), JoinKind::Cross, JoinCondition::On(Expr::from(true)))
            .into();
        let (sql, _params) = render_to_sql(&query, opts()).unwrap();
        assert!(sql.contains("\"users\" AS \"U2\""));
    }
}
