// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sqlforge-functions
//!
//! Builtin SQL function constructors (the `fn_::*` namespace) and a
//! lookup registry of builtin function names.
//!
//! ## Usage
//!
//! ```rust
//! use sqlforge_functions::fn_;
//! use sqlforge_ir::Table;
//!
//! let tweets = Table::new("tweets");
//! let expr = fn_::count(tweets.col("id")).alias("ct");
//! ```

pub mod builtin;
pub mod fn_;
pub mod registry;

pub use registry::{FunctionKind, FunctionMetadata, FunctionRegistry};
