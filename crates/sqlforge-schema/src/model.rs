// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Declarative model metadata.
//!
//! The original source discovers a model's fields by walking a declared
//! class's attributes. Rust has no such reflection, so a model is built
//! with an explicit builder: `Model::define(name).field(...).foreign_key(...)`.

use std::collections::HashMap;

use std::collections::HashSet;

use sqlforge_ir::{Expr, SelectQuery, Table};

use crate::check::Check;
use crate::data_type::DataType;
use crate::error::{SchemaError, SchemaResult};
use crate::field::Field;
use crate::foreign_key::ForeignKeyField;

/// A composite (or single-column) index declaration.
#[derive(Debug, Clone)]
pub struct IndexDef {
    pub columns: Vec<String>,
    pub unique: bool,
}

/// A declared table: its fields, foreign keys, indexes, and check
/// constraints, bound to a backing [`Table`] source so its fields can be
/// used directly as expression columns.
#[derive(Debug, Clone)]
pub struct Model {
    pub table_name: String,
    pub fields: Vec<Field>,
    pub foreign_keys: Vec<ForeignKeyField>,
    pub primary_key: String,
    pub primary_key_type: DataType,
    pub indexes: Vec<IndexDef>,
    pub checks: Vec<Check>,
    fk_columns: HashMap<String, String>,
    table: Table,
}

impl Model {
    pub fn define(table_name: impl Into<String>) -> ModelBuilder {
        ModelBuilder::new(table_name)
    }

    /// The expression for a plain declared field.
    pub fn c(&self, field_name: &str) -> Expr {
        self.table.col(field_name)
    }

    /// The expression for a foreign key field, by its declared name (not
    /// its resolved column name).
    pub fn fk(&self, name: &str) -> Expr {
        let column = self
            .fk_columns
            .get(name)
            .unwrap_or_else(|| panic!("model '{}' has no foreign key named '{}'", self.table_name, name));
        self.table.col(column.clone())
    }

    /// The backing source, for use in `.from_()`/`.join()`.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// The `ON` condition joining this model, the side that declares the
    /// foreign key, to `related` via the foreign key named `fk_name` —
    /// `note.fk_join_condition("author", &person)` derives
    /// `"note"."author_id" = "person"."id"` the way a bare `.join(Person)`
    /// resolves its condition from `Note`'s declared `author` field.
    pub fn fk_join_condition(&self, fk_name: &str, related: &Model) -> Expr {
        self.fk(fk_name).eq(related.c(&related.primary_key))
    }

    /// Derive the `ON` condition linking `self` and `related`, searching
    /// both models' declared foreign keys for the one connecting them —
    /// the way a bare `.join(Model)` resolves its condition by reflection
    /// in the original source, regardless of which side owns the key.
    ///
    /// # Panics
    ///
    /// Panics if no declared foreign key connects the two models, or if
    /// more than one does (an ambiguous join the original source also
    /// rejects).
    pub fn join_condition(&self, related: &Model) -> Expr {
        let mut candidates: Vec<Expr> = self
            .foreign_keys
            .iter()
            .filter(|fk| fk.target_table(&self.table_name) == related.table_name)
            .map(|fk| self.fk_join_condition(&fk.name, related))
            .collect();
        candidates.extend(
            related
                .foreign_keys
                .iter()
                .filter(|fk| fk.target_table(&related.table_name) == self.table_name)
                .map(|fk| related.fk_join_condition(&fk.name, self)),
        );
        match candidates.len() {
            1 => candidates.remove(0),
            0 => panic!(
                "no foreign key connects '{}' and '{}'",
                self.table_name, related.table_name
            ),
            _ => panic!(
                "ambiguous join between '{}' and '{}': multiple foreign keys connect them",
                self.table_name, related.table_name
            ),
        }
    }

    /// Declared fields in declaration order, including the primary key
    /// when it isn't one of `self.fields` already (i.e. the implicit `id`
    /// case). This is the column list an empty `.select()` expands to.
    pub fn select_columns(&self) -> Vec<Expr> {
        let mut columns = Vec::with_capacity(self.fields.len() + 1);
        if !self.fields.iter().any(|f| f.primary_key) {
            columns.push(self.c(&self.primary_key));
        }
        for field in &self.fields {
            columns.push(self.c(&field.name));
        }
        columns
    }

    /// A `SELECT` over every declared field (plus the primary key) in
    /// declaration order, the way an argument-less `.select()` behaves on
    /// the original model class.
    pub fn select(&self) -> SelectQuery {
        SelectQuery::new().select(self.select_columns()).from_([self.table.clone()])
    }
}

/// Builder for [`Model`].
pub struct ModelBuilder {
    table_name: String,
    fields: Vec<Field>,
    foreign_keys: Vec<ForeignKeyField>,
    indexes: Vec<IndexDef>,
    checks: Vec<Check>,
}

impl ModelBuilder {
    fn new(table_name: impl Into<String>) -> Self {
        ModelBuilder {
            table_name: table_name.into(),
            fields: Vec::new(),
            foreign_keys: Vec::new(),
            indexes: Vec::new(),
            checks: Vec::new(),
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn foreign_key(mut self, fk: ForeignKeyField) -> Self {
        self.foreign_keys.push(fk);
        self
    }

    pub fn index(mut self, columns: impl IntoIterator<Item = impl Into<String>>, unique: bool) -> Self {
        self.indexes.push(IndexDef {
            columns: columns.into_iter().map(Into::into).collect(),
            unique,
        });
        self
    }

    pub fn check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    /// Finalize the model. Unless a field was marked `.primary_key()`, an
    /// implicit `id INTEGER PRIMARY KEY` is assumed.
    ///
    /// # Panics
    ///
    /// Panics if the declaration is malformed (a duplicate field name, or a
    /// composite index naming a column the model never declared). Use
    /// [`ModelBuilder::try_build`] to handle these without panicking.
    pub fn build(self) -> Model {
        self.try_build().unwrap_or_else(|err| panic!("{err}"))
    }

    /// Finalize the model, reporting a malformed declaration instead of
    /// panicking.
    pub fn try_build(self) -> SchemaResult<Model> {
        let mut seen_names = HashSet::new();
        for field in &self.fields {
            if !seen_names.insert(field.name.clone()) {
                return Err(SchemaError::DuplicateField {
                    model: self.table_name.clone(),
                    field: field.name.clone(),
                });
            }
        }

        let (primary_key, primary_key_type) = self
            .fields
            .iter()
            .find(|f| f.primary_key)
            .map(|f| (f.name.clone(), f.data_type.clone()))
            .unwrap_or_else(|| ("id".to_string(), DataType::Integer));

        for index in &self.indexes {
            for column in &index.columns {
                if column != &primary_key && !seen_names.contains(column) {
                    return Err(SchemaError::UnknownField {
                        model: self.table_name.clone(),
                        field: column.clone(),
                    });
                }
            }
        }

        let mut fk_columns = HashMap::new();
        let mut column_names: Vec<String> = Vec::new();
        if !self.fields.iter().any(|f| f.primary_key) {
            column_names.push(primary_key.clone());
        }
        for field in &self.fields {
            column_names.push(field.name.clone());
        }
        for fk in &self.foreign_keys {
            let column = fk.column_name(&primary_key);
            fk_columns.insert(fk.name.clone(), column.clone());
            column_names.push(column);
        }

        let table = Table::with_columns(self.table_name.clone(), column_names);

        Ok(Model {
            table_name: self.table_name,
            fields: self.fields,
            foreign_keys: self.foreign_keys,
            primary_key,
            primary_key_type,
            indexes: self.indexes,
            checks: self.checks,
            fk_columns,
            table,
        })
    }
}
