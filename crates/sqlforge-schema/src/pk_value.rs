// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Coercing an owning row into its primary key value, so it can appear
//! directly as the right-hand side of a foreign-key column comparison
//! (`Note.author == Person(id=123)` in the original source).
//!
//! Rust's orphan rule blocks a blanket `impl<T: PrimaryKeyValue> From<T> for
//! Expr` here (neither `From` nor `Expr` is local to this crate), so the
//! coercion is an explicit function, [`pk_expr`], rather than an implicit
//! conversion through `.eq()`.

use sqlforge_ir::{Expr, Value};

/// Implemented by any type that can stand in for "an instance of a model
/// row, for the purpose of extracting its primary key". Blanket-implemented
/// for raw primary key value types; user-defined row structs implement it
/// directly to extract their own id field.
pub trait PrimaryKeyValue {
    fn primary_key_value(&self) -> Value;
}

impl<T> PrimaryKeyValue for T
where
    T: Clone + Into<Value>,
{
    fn primary_key_value(&self) -> Value {
        self.clone().into()
    }
}

/// Build the literal expression to compare a foreign-key column against.
pub fn pk_expr(value: &impl PrimaryKeyValue) -> Expr {
    Expr::Literal(value.primary_key_value())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Person {
        id: i64,
    }

    impl PrimaryKeyValue for Person {
        fn primary_key_value(&self) -> Value {
            Value::Int(self.id)
        }
    }

    #[test]
    fn raw_value_is_its_own_pk() {
        let expr = pk_expr(&123i64);
        assert!(matches!(expr, Expr::Literal(Value::Int(123))));
    }

    #[test]
    fn row_struct_extracts_its_id_field() {
        let person = Person { id: 42 };
        let expr = pk_expr(&person);
        assert!(matches!(expr, Expr::Literal(Value::Int(42))));
    }
}
