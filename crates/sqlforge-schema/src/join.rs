// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Fluent joins between declared models.
//!
//! `SelectQuery` itself knows nothing about models; [`Model::join_condition`]
//! derives an `ON` clause from declared foreign keys, and this extension
//! trait wires that into the builder chain so a query can say `.join_model`
//! instead of spelling out the condition by hand.

use sqlforge_ir::SelectQuery;

use crate::model::Model;

/// Join helpers that resolve their `ON` condition from a model's declared
/// foreign keys, the way a bare `.join(Model)` does in the original source.
pub trait JoinModelExt: Sized {
    /// Inner-join `related` into the query, deriving the condition from
    /// whichever foreign key connects `from_model` and `related`.
    fn join_model(self, from_model: &Model, related: &Model) -> Self;

    /// Left-join `related` into the query, deriving the condition the same
    /// way as [`JoinModelExt::join_model`].
    fn left_join_model(self, from_model: &Model, related: &Model) -> Self;
}

impl JoinModelExt for SelectQuery {
    fn join_model(self, from_model: &Model, related: &Model) -> Self {
        let condition = from_model.join_condition(related);
        self.join_on(related.table().clone(), condition)
    }

    fn left_join_model(self, from_model: &Model, related: &Model) -> Self {
        let condition = from_model.join_condition(related);
        self.left_join_on(related.table().clone(), condition)
    }
}
