// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sqlforge-driver
//!
//! The driver façade: a thin `execute_sql(sql, params)` trait plus concrete
//! backends. Everything past "hand the backend a rendered statement" —
//! pooling, transactions, result-row materialization — belongs to the
//! caller, not this crate.

pub mod counting;
pub mod database;
pub mod error;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use counting::CountingDatabase;
pub use database::Database;
pub use error::{DriverError, DriverResult};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;

#[cfg(feature = "postgres")]
pub use postgres::PostgresDatabase;
