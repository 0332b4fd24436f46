// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Shared model fixtures, so each crate's own test suite doesn't redeclare
//! the same `person`/`note` pair.

use sqlforge_ir::Table;
use sqlforge_schema::{Field, ForeignKeyField, Model};

/// A `person` model with two required `char` fields and a composite unique
/// index, matching the shape used throughout the schema-layer tests.
pub fn person_model() -> Model {
    Model::define("person")
        .field(Field::char("first", 150))
        .field(Field::char("last", 150))
        .index(["first", "last"], true)
        .build()
}

/// A `note` model with a foreign key back to [`person_model`].
pub fn note_model() -> Model {
    Model::define("note")
        .field(Field::text("content"))
        .foreign_key(ForeignKeyField::new("author", &person_model()))
        .build()
}

/// The bare `sqlforge-ir` source equivalent of [`person_model`], for tests
/// that only need the expression algebra and not the schema layer.
pub fn users_table() -> Table {
    Table::with_columns("users", ["id", "username"])
}
