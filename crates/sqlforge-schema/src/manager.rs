// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! DDL emission: turns a declared [`Model`] into `CREATE TABLE`/`CREATE
//! INDEX` statements.
//!
//! A registry of already-declared models is threaded through so a foreign
//! key's target and a self-reference both resolve the same way.

use std::collections::HashMap;

use sqlforge_ir::{Expr, Value};

use crate::data_type::DataType;
use crate::model::Model;

fn quote(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Render a DDL literal: `DEFAULT` values and `CHECK` expressions can only
/// be inline text, never bind parameters, so only the node shapes that make
/// sense as static SQL text are supported.
fn render_ddl_expr(expr: &Expr) -> String {
    match expr {
        Expr::Literal(Value::Null) => "NULL".to_string(),
        Expr::Literal(Value::Bool(b)) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Expr::Literal(Value::Int(n)) => n.to_string(),
        Expr::Literal(Value::Float(f)) => f.to_string(),
        Expr::Literal(Value::Text(s)) => format!("'{}'", s.replace('\'', "''")),
        Expr::Literal(Value::Bytes(_)) => panic!("byte literals are not valid DDL text"),
        Expr::Raw(raw) => raw.text.clone(),
        other => panic!("expression {other:?} cannot appear in DDL text"),
    }
}

fn index_name(table: &str, columns: &[String]) -> String {
    let mut name = table.to_string();
    for col in columns {
        name.push('_');
        name.push_str(col);
    }
    name
}

/// Registry of declared models. Foreign keys resolve their target at
/// [`ForeignKeyField::new`](crate::foreign_key::ForeignKeyField::new) time,
/// not through this registry — it exists so callers can emit DDL for every
/// declared model in one pass without threading them through individually.
#[derive(Debug, Default)]
pub struct SchemaManager {
    models: HashMap<String, Model>,
}

impl SchemaManager {
    pub fn new() -> Self {
        SchemaManager::default()
    }

    pub fn register(&mut self, model: Model) {
        self.models.insert(model.table_name.clone(), model);
    }

    pub fn get(&self, table_name: &str) -> Option<&Model> {
        self.models.get(table_name)
    }

    /// All registered models, in no particular order — iteration over a
    /// `HashMap` isn't deterministic, so callers that need a fixed emission
    /// order should drive [`create_table_sql`]/[`create_index_sql`] over
    /// their own ordered model list instead of this iterator.
    pub fn all(&self) -> impl Iterator<Item = &Model> {
        self.models.values()
    }
}

/// `CREATE TABLE` for `model`, columns in declaration order (primary-key
/// column first when the primary key isn't the implicit `id`), followed by
/// trailing `FOREIGN KEY` lines.
pub fn create_table_sql(model: &Model) -> String {
    let mut lines = Vec::new();

    let implicit_pk = !model.fields.iter().any(|f| f.primary_key);
    if implicit_pk {
        lines.push(format!(
            "{} {} PRIMARY KEY",
            quote(&model.primary_key),
            model.primary_key_type.ddl_token()
        ));
    }

    for field in &model.fields {
        let mut line = format!("{} {}", quote(&field.name), field.data_type.ddl_token());
        if field.primary_key {
            line.push_str(" PRIMARY KEY");
        }
        if !field.nullable && !field.primary_key {
            line.push_str(" NOT NULL");
        }
        if let Some(default) = &field.default {
            line.push_str(" DEFAULT ");
            line.push_str(&render_ddl_expr(default));
        }
        lines.push(line);
    }

    for fk in &model.foreign_keys {
        let column = fk.column_name(&model.primary_key);
        let data_type = fk.column_type(&model.primary_key_type);
        let mut line = format!("{} {}", quote(&column), data_type.ddl_token());
        if !fk.nullable {
            line.push_str(" NOT NULL");
        }
        lines.push(line);
    }

    for check in &model.checks {
        lines.push(format!("CHECK ({})", render_ddl_expr(&check.0)));
    }

    for fk in &model.foreign_keys {
        let column = fk.column_name(&model.primary_key);
        let target_table = fk.target_table(&model.table_name);
        let target_pk = fk.target_pk(&model.primary_key);
        lines.push(format!(
            "FOREIGN KEY ({}) REFERENCES {} ({})",
            quote(&column),
            quote(target_table),
            quote(target_pk)
        ));
    }

    format!(
        "CREATE TABLE {} (\n    {}\n)",
        quote(&model.table_name),
        lines.join(",\n    ")
    )
}

/// `CREATE INDEX`/`CREATE UNIQUE INDEX` statements: one per field marked
/// `.indexed()`, one per foreign key column (non-unique, automatic), and
/// one per composite index declared on the model.
pub fn create_index_sql(model: &Model) -> Vec<String> {
    let mut statements = Vec::new();

    for field in &model.fields {
        if field.indexed {
            let columns = vec![field.name.clone()];
            let name = index_name(&model.table_name, &columns);
            statements.push(single_index_statement(&model.table_name, &name, &columns, false));
        }
    }

    for fk in &model.foreign_keys {
        // The index is named from the FK's *declared* field name
        // (`author`), not its resolved column (`author_id`) — matching
        // `CREATE INDEX "note_author" ON "note" ("author_id")`.
        let name = index_name(&model.table_name, &[fk.name.clone()]);
        let columns = vec![fk.column_name(&model.primary_key)];
        statements.push(single_index_statement(&model.table_name, &name, &columns, false));
    }

    for index in &model.indexes {
        let name = index_name(&model.table_name, &index.columns);
        statements.push(single_index_statement(&model.table_name, &name, &index.columns, index.unique));
    }

    statements
}

fn single_index_statement(table: &str, name: &str, columns: &[String], unique: bool) -> String {
    let kind = if unique { "CREATE UNIQUE INDEX" } else { "CREATE INDEX" };
    let column_list = columns.iter().map(|c| quote(c)).collect::<Vec<_>>().join(", ");
    format!("{kind} {} ON {} ({column_list})", quote(name), quote(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use crate::foreign_key::ForeignKeyField;

    #[test]
    fn implicit_pk_comes_first_in_create_table() {
        let person = Model::define("person").field(Field::char("name", 150)).build();
        let sql = create_table_sql(&person);
        assert!(sql.starts_with("CREATE TABLE \"person\" (\n    \"id\" INTEGER PRIMARY KEY"));
    }

    #[test]
    fn foreign_key_emits_trailing_reference() {
        let person = Model::define("person").field(Field::char("name", 150)).build();
        let note = Model::define("note")
            .field(Field::text("content"))
            .foreign_key(ForeignKeyField::new("author", &person))
            .build();
        let sql = create_table_sql(&note);
        assert!(sql.contains("\"author_id\" INTEGER NOT NULL"));
        assert!(sql.contains("FOREIGN KEY (\"author_id\") REFERENCES \"person\" (\"id\")"));
    }

    #[test]
    fn composite_unique_index_name_joins_all_columns() {
        let person = Model::define("person")
            .field(Field::char("first", 150))
            .field(Field::char("last", 150))
            .index(["first", "last"], true)
            .build();
        let statements = create_index_sql(&person);
        assert!(statements
            .iter()
            .any(|s| s == "CREATE UNIQUE INDEX \"person_first_last\" ON \"person\" (\"first\", \"last\")"));
    }

    #[test]
    fn schema_manager_round_trips_registered_models() {
        let mut manager = SchemaManager::new();
        manager.register(Model::define("person").field(Field::char("name", 150)).build());
        assert!(manager.get("person").is_some());
        assert!(manager.get("ghost").is_none());
    }

    #[test]
    fn foreign_key_gets_automatic_non_unique_index() {
        let person = Model::define("person").field(Field::char("name", 150)).build();
        let note = Model::define("note")
            .foreign_key(ForeignKeyField::new("author", &person))
            .build();
        let statements = create_index_sql(&note);
        assert!(statements
            .iter()
            .any(|s| s == "CREATE INDEX \"note_author\" ON \"note\" (\"author_id\")"));
    }
}
