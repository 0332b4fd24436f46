// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Error type for the driver façade.

use thiserror::Error;

/// Result type alias for driver operations.
pub type DriverResult<T> = Result<T, DriverError>;

/// Errors a [`crate::Database`] implementation can report.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The underlying backend rejected the statement or the connection
    /// failed.
    #[error("database error: {0}")]
    Backend(#[from] sqlx::Error),
}
