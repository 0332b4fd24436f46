// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Foreign key field declarations.
//!
//! A foreign key's effective column name and referenced primary key depend
//! on its target, which may be another already-declared [`crate::Model`] or
//! the model currently being declared (`'self'` in the original source).
//! The latter can't be resolved at the call site — the model doesn't exist
//! yet — so resolution is deferred to [`crate::Model`] construction time.

use crate::data_type::DataType;
use crate::model::Model;

/// What a [`ForeignKeyField`] points at.
#[derive(Debug, Clone)]
pub enum ForeignKeyTarget {
    /// An already-declared model, with its primary key captured at
    /// declaration time.
    Explicit {
        table: String,
        pk_name: String,
        pk_type: DataType,
    },
    /// The model being declared right now.
    This,
}

/// A foreign key column.
#[derive(Debug, Clone)]
pub struct ForeignKeyField {
    pub name: String,
    pub target: ForeignKeyTarget,
    pub backref: Option<String>,
    pub nullable: bool,
    pub on_delete: Option<String>,
}

impl ForeignKeyField {
    /// Reference another model, already built.
    pub fn new(name: impl Into<String>, target: &Model) -> Self {
        ForeignKeyField {
            name: name.into(),
            target: ForeignKeyTarget::Explicit {
                table: target.table_name.clone(),
                pk_name: target.primary_key.clone(),
                pk_type: target.primary_key_type.clone(),
            },
            backref: None,
            nullable: false,
            on_delete: None,
        }
    }

    /// Reference the model being declared (a self-referential foreign key).
    pub fn to_self(name: impl Into<String>) -> Self {
        ForeignKeyField {
            name: name.into(),
            target: ForeignKeyTarget::This,
            backref: None,
            nullable: false,
            on_delete: None,
        }
    }

    pub fn backref(mut self, name: impl Into<String>) -> Self {
        self.backref = Some(name.into());
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn on_delete(mut self, action: impl Into<String>) -> Self {
        self.on_delete = Some(action.into());
        self
    }

    /// The column name this field renders as: `<name>_id`, or
    /// `<name>_<pk>` when the target's primary key isn't named `id`.
    /// `self_pk_name` is the declaring model's own primary key, used only
    /// when `target` is [`ForeignKeyTarget::This`].
    pub fn column_name(&self, self_pk_name: &str) -> String {
        let pk_name = match &self.target {
            ForeignKeyTarget::Explicit { pk_name, .. } => pk_name.as_str(),
            ForeignKeyTarget::This => self_pk_name,
        };
        if pk_name == "id" {
            format!("{}_id", self.name)
        } else {
            format!("{}_{}", self.name, pk_name)
        }
    }

    /// The column's DDL type: matches the target primary key's type.
    pub fn column_type(&self, self_pk_type: &DataType) -> DataType {
        match &self.target {
            ForeignKeyTarget::Explicit { pk_type, .. } => pk_type.clone(),
            ForeignKeyTarget::This => self_pk_type.clone(),
        }
    }

    /// The referenced table name.
    pub fn target_table<'a>(&'a self, self_table: &'a str) -> &'a str {
        match &self.target {
            ForeignKeyTarget::Explicit { table, .. } => table.as_str(),
            ForeignKeyTarget::This => self_table,
        }
    }

    /// The referenced primary key column name.
    pub fn target_pk<'a>(&'a self, self_pk_name: &'a str) -> &'a str {
        match &self.target {
            ForeignKeyTarget::Explicit { pk_name, .. } => pk_name.as_str(),
            ForeignKeyTarget::This => self_pk_name,
        }
    }
}
