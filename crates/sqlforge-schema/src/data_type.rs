// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! DDL data types.
//!
//! One enum rather than a per-dialect family: a field's declared type maps
//! to exactly one DDL token regardless of backend, since emission only
//! varies by placeholder style, not by type vocabulary.

use serde::{Deserialize, Serialize};

/// A column's declared SQL type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DataType {
    Integer,
    BigInt,
    SmallInt,
    Decimal,
    Float,
    Double,
    Varchar(Option<usize>),
    Char(Option<usize>),
    Text,
    Date,
    Time,
    DateTime,
    Timestamp,
    Boolean,
    Blob,
}

impl DataType {
    /// The DDL token this type renders as in a `CREATE TABLE` column
    /// definition, e.g. `VARCHAR(255)`.
    pub fn ddl_token(&self) -> String {
        match self {
            DataType::Integer => "INTEGER".to_string(),
            DataType::BigInt => "BIGINT".to_string(),
            DataType::SmallInt => "SMALLINT".to_string(),
            DataType::Decimal => "DECIMAL".to_string(),
            DataType::Float => "FLOAT".to_string(),
            DataType::Double => "DOUBLE".to_string(),
            DataType::Varchar(Some(n)) => format!("VARCHAR({n})"),
            DataType::Varchar(None) => "VARCHAR".to_string(),
            DataType::Char(Some(n)) => format!("CHAR({n})"),
            DataType::Char(None) => "CHAR".to_string(),
            DataType::Text => "TEXT".to_string(),
            DataType::Date => "DATE".to_string(),
            DataType::Time => "TIME".to_string(),
            DataType::DateTime => "DATETIME".to_string(),
            DataType::Timestamp => "TIMESTAMP".to_string(),
            DataType::Boolean => "BOOLEAN".to_string(),
            DataType::Blob => "BLOB".to_string(),
        }
    }
}
