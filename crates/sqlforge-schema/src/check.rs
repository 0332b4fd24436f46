// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! `CHECK` constraint expressions.

use sqlforge_ir::Expr;

/// A `CHECK (expr)` table constraint.
#[derive(Debug, Clone)]
pub struct Check(pub Expr);

impl Check {
    pub fn new(expr: Expr) -> Self {
        Check(expr)
    }
}
