// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sqlforge-schema
//!
//! The schema/model layer: declares fields, models, and foreign keys, and
//! bridges them to both the expression algebra (column references) and the
//! DDL emitted for table creation.
//!
//! ## Usage
//!
//! ```rust
//! use sqlforge_schema::{Field, ForeignKeyField, Model, create_table_sql};
//!
//! let person = Model::define("person")
//!     .field(Field::char("first", 150))
//!     .field(Field::char("last", 150))
//!     .index(["first", "last"], true)
//!     .build();
//!
//! let note = Model::define("note")
//!     .field(Field::text("content"))
//!     .foreign_key(ForeignKeyField::new("author", &person))
//!     .build();
//!
//! let sql = create_table_sql(&note);
//! assert!(sql.contains("FOREIGN KEY"));
//! ```

pub mod check;
pub mod data_type;
pub mod error;
pub mod field;
pub mod foreign_key;
pub mod join;
pub mod manager;
pub mod model;
pub mod pk_value;

pub use check::Check;
pub use data_type::DataType;
pub use error::{SchemaError, SchemaResult};
pub use field::Field;
pub use foreign_key::{ForeignKeyField, ForeignKeyTarget};
pub use join::JoinModelExt;
pub use manager::{create_index_sql, create_table_sql, SchemaManager};
pub use model::{IndexDef, Model, ModelBuilder};
pub use pk_value::{pk_expr, PrimaryKeyValue};
