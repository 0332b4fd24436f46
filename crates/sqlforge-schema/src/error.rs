// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Error types for the schema layer.

use thiserror::Error;

/// Result type alias for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur while declaring a model.
#[derive(Debug, Error, Clone)]
pub enum SchemaError {
    /// A composite index named a column the model never declared.
    #[error("model '{model}' has no field named '{field}'")]
    UnknownField { model: String, field: String },

    /// Two fields on the same model declared the same name.
    #[error("duplicate field name '{field}' on model '{model}'")]
    DuplicateField { model: String, field: String },
}
