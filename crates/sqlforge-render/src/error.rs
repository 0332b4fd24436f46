// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Error types for the rendering layer

/// Result type alias for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rendering a node tree into SQL.
///
/// Construction-time programmer mistakes (unknown column on a table with
/// declared columns) surface as `debug_assert!` panics in `sqlforge-ir`
/// instead, per its own scope; this enum covers the errors that can only
/// be detected while walking the tree with a `Context` in hand — a source
/// that never made it into any enclosing `FROM`/`JOIN`/`WITH` list.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A column's owning source never appeared in a `FROM`/`JOIN` list of
    /// any enclosing scope, so it has no alias to qualify with.
    #[error("column '{column}' is not qualified by any source in scope")]
    UnqualifiedColumn { column: String },

    /// A CTE reference resolves to a name no `WITH` clause in scope
    /// declared.
    #[error("reference to undeclared CTE '{name}'")]
    UnknownCte { name: String },

    /// A CTE marked recursive references itself outside of a `UNION
    /// [ALL]` compound body, which no dialect accepts.
    #[error("recursive CTE '{name}' must be a UNION of a base case and a recursive case")]
    InvalidRecursiveCte { name: String },
}
