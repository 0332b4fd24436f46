// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Rendering context: the output buffer, parameter list, and scope state
//! shared across one render pass.
//!
//! Of the five scope pushers in the node algebra's contract, two
//! materially change what gets emitted and are implemented as RAII
//! guards here: [`Context::scope_column`] (qualify a `Column` with its
//! source's alias or not — SELECT-family clauses qualify, `UPDATE`/
//! `DELETE` clauses don't) and [`Context::scope_source`]/
//! [`Context::scope_source_root`] (open a fresh `FROM`-scope alias
//! counter, `a`-prefixed or `t`-prefixed). The others — "normal",
//! "values", "cte" — describe *which render function is running*, not
//! an independent flag, so they aren't modeled as separate state.
//!
//! Root is a structural property, not a race: the caller in
//! `sqlforge-render`'s render pass decides who is root (the outermost
//! statement's own body, or a left-associative compound's leftmost
//! leaf) rather than letting "whichever scope opens first" win — a
//! `WITH` clause's bodies render as text before the main body but must
//! never claim the `t`-prefix.

use std::collections::{HashMap, HashSet};

use sqlforge_ir::{Dialect, Source, Value};

use crate::error::{RenderError, RenderResult};

/// Parameter placeholder style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `?`, `?`, `?`, ...
    Question,
    /// `$1`, `$2`, `$3`, ... (sigil is the leading character)
    Numbered(char),
}

/// Dialect-tunable rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextOptions {
    pub quote: char,
    pub placeholder: Placeholder,
}

impl Default for ContextOptions {
    fn default() -> Self {
        ContextOptions {
            quote: '"',
            placeholder: Placeholder::Question,
        }
    }
}

impl ContextOptions {
    pub fn for_dialect(dialect: Dialect) -> Self {
        match dialect {
            Dialect::Postgres => ContextOptions {
                quote: '"',
                placeholder: Placeholder::Numbered('$'),
            },
            Dialect::Generic | Dialect::Sqlite => ContextOptions::default(),
            _ => ContextOptions::default(),
        }
    }
}

struct AliasFrame {
    prefix: char,
    counter: usize,
}

/// The mutable accumulator threaded through a single render pass.
pub struct Context {
    options: ContextOptions,
    buffer: String,
    params: Vec<Value>,
    qualify_stack: Vec<bool>,
    alias_frames: Vec<AliasFrame>,
    aliases: HashMap<u64, String>,
    cte_scopes: Vec<HashSet<u64>>,
}

impl Context {
    pub fn new(options: ContextOptions) -> Self {
        Context {
            options,
            buffer: String::new(),
            params: Vec::new(),
            qualify_stack: vec![true],
            alias_frames: Vec::new(),
            aliases: HashMap::new(),
            cte_scopes: Vec::new(),
        }
    }

    pub fn options(&self) -> ContextOptions {
        self.options
    }

    /// Append raw text to the buffer.
    pub fn literal(&mut self, text: &str) -> &mut Self {
        self.buffer.push_str(text);
        self
    }

    /// Emit a quoted identifier, doubling any embedded quote character.
    pub fn identifier(&mut self, name: &str) -> &mut Self {
        let q = self.options.quote;
        self.buffer.push(q);
        for ch in name.chars() {
            if ch == q {
                self.buffer.push(q);
            }
            self.buffer.push(ch);
        }
        self.buffer.push(q);
        self
    }

    /// Emit a placeholder and capture `v` in the params list.
    pub fn value(&mut self, v: Value) -> &mut Self {
        self.params.push(v);
        match self.options.placeholder {
            Placeholder::Question => self.buffer.push('?'),
            Placeholder::Numbered(sigil) => {
                self.buffer.push(sigil);
                self.buffer.push_str(&self.params.len().to_string());
            }
        }
        self
    }

    /// Consume the context, returning the rendered SQL and bind params.
    pub fn finish(self) -> (String, Vec<Value>) {
        (self.buffer, self.params)
    }

    /// Append `v` to the params list without emitting a placeholder. Used
    /// for [`sqlforge_ir::RawSql`] fragments, whose caller-supplied text
    /// already embeds its own placeholder markers.
    pub fn capture(&mut self, v: Value) -> &mut Self {
        self.params.push(v);
        self
    }

    pub fn qualify_columns(&self) -> bool {
        *self.qualify_stack.last().unwrap_or(&true)
    }

    /// Push a column-qualification policy for the duration of the guard.
    pub fn scope_column(&mut self, qualify: bool) -> ColumnScopeGuard<'_> {
        self.qualify_stack.push(qualify);
        ColumnScopeGuard { ctx: self }
    }

    /// Open a fresh `FROM`-scope alias counter using the `a`-prefix. Every
    /// scope that isn't the single outermost statement body — sub-queries,
    /// CTE bodies, non-leftmost compound branches — uses this.
    pub fn scope_source(&mut self) -> SourceScopeGuard<'_> {
        self.push_from_scope('a')
    }

    /// Open the `FROM`-scope for the one true root of a render: the
    /// outermost statement's own body (or, for a left-associative compound,
    /// its leftmost leaf). Callers decide structurally who gets to call
    /// this — it is never inferred from call order, since `WITH` bodies
    /// render textually before the main body but must never claim `t`.
    pub fn scope_source_root(&mut self) -> SourceScopeGuard<'_> {
        self.push_from_scope('t')
    }

    fn push_from_scope(&mut self, prefix: char) -> SourceScopeGuard<'_> {
        tracing::trace!(prefix = %prefix, "entering FROM scope");
        self.alias_frames.push(AliasFrame { prefix, counter: 0 });
        SourceScopeGuard { ctx: self }
    }

    /// Open a scope declaring which CTE ids a `WITH` clause just introduced.
    /// Nested bodies inherit every still-open frame, so a CTE can reference
    /// an outer query's own CTEs as well as its own.
    pub fn scope_ctes(&mut self, ids: impl IntoIterator<Item = u64>) -> CteScopeGuard<'_> {
        self.cte_scopes.push(ids.into_iter().collect());
        CteScopeGuard { ctx: self }
    }

    /// Whether `id` was declared by any `WITH` clause currently in scope.
    pub fn known_cte(&self, id: u64) -> bool {
        self.cte_scopes.iter().any(|frame| frame.contains(&id))
    }

    /// Resolve `source`'s alias, allocating one from the innermost open
    /// `FROM` scope on first reference. CTE sources always use their
    /// declared name; user-aliased sources always use that alias; both
    /// are cached so a later reference to the *same* source instance gets
    /// the same alias without consuming a counter slot.
    pub fn alias_for(&mut self, source: &Source) -> RenderResult<String> {
        if let Some(existing) = self.aliases.get(&source.id()) {
            return Ok(existing.clone());
        }
        let alias = if let Source::Cte(cte) = source {
            cte.name().to_string()
        } else if let Some(user) = source.user_alias() {
            user.to_string()
        } else {
            let frame = self.alias_frames.last_mut().ok_or_else(|| RenderError::UnqualifiedColumn {
                column: source_label(source),
            })?;
            frame.counter += 1;
            format!("{}{}", frame.prefix, frame.counter)
        };
        tracing::trace!(source_id = source.id(), alias = %alias, "allocated alias");
        self.aliases.insert(source.id(), alias.clone());
        Ok(alias)
    }
}

/// Best-effort description of a source for error messages, used when a
/// column's owning source has no alias to qualify with.
fn source_label(source: &Source) -> String {
    match source {
        Source::Table(t) => t.name().to_string(),
        Source::Cte(c) => c.name().to_string(),
        Source::Subquery(_) => "<subquery>".to_string(),
    }
}

/// RAII guard restoring the previous column-qualification policy on drop.
pub struct ColumnScopeGuard<'a> {
    ctx: &'a mut Context,
}

impl<'a> ColumnScopeGuard<'a> {
    pub fn ctx(&mut self) -> &mut Context {
        self.ctx
    }
}

impl Drop for ColumnScopeGuard<'_> {
    fn drop(&mut self) {
        self.ctx.qualify_stack.pop();
    }
}

/// RAII guard closing the `FROM`-scope alias counter on drop.
pub struct SourceScopeGuard<'a> {
    ctx: &'a mut Context,
}

impl<'a> SourceScopeGuard<'a> {
    pub fn ctx(&mut self) -> &mut Context {
        self.ctx
    }
}

impl Drop for SourceScopeGuard<'_> {
    fn drop(&mut self) {
        self.ctx.alias_frames.pop();
    }
}

/// RAII guard closing a `WITH`-clause's CTE-id scope on drop.
pub struct CteScopeGuard<'a> {
    ctx: &'a mut Context,
}

impl<'a> CteScopeGuard<'a> {
    pub fn ctx(&mut self) -> &mut Context {
        self.ctx
    }
}

impl Drop for CteScopeGuard<'_> {
    fn drop(&mut self) {
        self.ctx.cte_scopes.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlforge_ir::Table;

    #[test]
    fn aliases_share_identity() {
        let mut ctx = Context::new(ContextOptions::default());
        let users = Table::new("users");
        let source = Source::Table(users.clone());
        let mut _guard = ctx.scope_source_root();
        let a = _guard.ctx().alias_for(&source).unwrap();
        let b = _guard.ctx().alias_for(&Source::Table(users)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, "t1");
    }

    #[test]
    fn nested_scope_gets_a_prefix() {
        let mut ctx = Context::new(ContextOptions::default());
        {
            let _root = ctx.scope_source_root();
        }
        let users = Table::new("users");
        let mut _nested = ctx.scope_source();
        let alias = _nested.ctx().alias_for(&Source::Table(users)).unwrap();
        assert_eq!(alias, "a1");
    }

    #[test]
    fn cte_scope_never_claims_root_regardless_of_order() {
        let mut ctx = Context::new(ContextOptions::default());
        let orders = Table::new("orders");
        {
            let mut _cte_scope = ctx.scope_source();
            let alias = _cte_scope.ctx().alias_for(&Source::Table(orders.clone())).unwrap();
            assert_eq!(alias, "a1");
        }
        let users = Table::new("users");
        let mut _root_scope = ctx.scope_source_root();
        let alias = _root_scope.ctx().alias_for(&Source::Table(users)).unwrap();
        assert_eq!(alias, "t1");
    }

    #[test]
    fn alias_for_reports_unqualified_column_outside_any_from_scope() {
        let mut ctx = Context::new(ContextOptions::default());
        let users = Table::new("users");
        let err = ctx.alias_for(&Source::Table(users)).unwrap_err();
        assert!(matches!(err, RenderError::UnqualifiedColumn { column } if column == "users"));
    }

    #[test]
    fn numbered_placeholder_counts_up() {
        let mut ctx = Context::new(ContextOptions {
            quote: '"',
            placeholder: Placeholder::Numbered('$'),
        });
        ctx.value(Value::Int(1));
        ctx.value(Value::Int(2));
        let (sql, params) = ctx.finish();
        assert_eq!(sql, "$1$2");
        assert_eq!(params.len(), 2);
    }
}
