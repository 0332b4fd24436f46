// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Test-only helpers shared across sqlforge's own test suites:
//! `assert_sql!` for comparing rendered output, and a handful of model
//! fixtures so every crate's tests don't redeclare the same schema.

pub mod assertions;
pub mod fixtures;

pub use assertions::{assert_column_ref, assert_literal_int, assert_literal_text, assert_rendered};
