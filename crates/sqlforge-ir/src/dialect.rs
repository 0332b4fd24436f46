// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Dialect
//!
//! The core targets a single canonical dialect; [`Dialect`] only selects
//! the placeholder token and quote character a [`crate`]-independent
//! renderer should use, it does not gate feature availability or rewrite
//! the node tree.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Dialect {
    /// `"` identifiers, `?` placeholders.
    #[default]
    Generic,
    /// `"` identifiers, `$1`-style numbered placeholders.
    Postgres,
    /// `"` identifiers, `?` placeholders, no feature differences from
    /// [`Dialect::Generic`] at the core-rendering level.
    Sqlite,
}
