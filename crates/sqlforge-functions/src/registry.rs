// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

use std::collections::HashMap;

use crate::builtin;

/// What broad category a function belongs to.
///
/// The core does not use this for rendering — every `FunctionCall` renders
/// identically regardless of kind — it exists so callers building their own
/// tooling on top of `sqlforge` (completion, linting) can ask "is this an
/// aggregate?" without hardcoding a name list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FunctionKind {
    Scalar,
    Aggregate,
    Window,
}

/// Metadata describing one builtin SQL function.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FunctionMetadata {
    pub name: &'static str,
    pub kind: FunctionKind,
    pub description: &'static str,
}

impl FunctionMetadata {
    pub(crate) const fn new(name: &'static str, kind: FunctionKind, description: &'static str) -> Self {
        FunctionMetadata {
            name,
            kind,
            description,
        }
    }
}

/// Lookup table for builtin SQL function names.
///
/// The core renders any `fn_::call(name, args)` without consulting this —
/// semantic validation of function names is an explicit non-goal. This
/// exists for callers who want to check "is COUNT a known aggregate" without
/// re-deriving the builtin list themselves.
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    functions: HashMap<&'static str, FunctionMetadata>,
}

impl FunctionRegistry {
    /// Build a registry preloaded with every builtin function.
    pub fn new() -> Self {
        let functions = builtin::all_functions()
            .into_iter()
            .map(|f| (f.name, f))
            .collect();
        FunctionRegistry { functions }
    }

    /// Look up a function by name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&FunctionMetadata> {
        self.functions
            .values()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Whether `name` names a known builtin function.
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All registered functions, in no particular order.
    pub fn all(&self) -> impl Iterator<Item = &FunctionMetadata> {
        self.functions.values()
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
