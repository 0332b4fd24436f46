// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Builtin SQL function metadata.
//!
//! One flat list rather than a per-dialect split: the core targets a single
//! canonical dialect plus parameter-placeholder variation, so a function's
//! name and kind don't change across backends the way they would in a
//! dialect-aware completion engine.

use crate::registry::{FunctionKind, FunctionMetadata};

/// All builtin functions known to the registry.
pub fn all_functions() -> Vec<FunctionMetadata> {
    use FunctionKind::{Aggregate, Scalar, Window};
    vec![
        FunctionMetadata::new("COUNT", Aggregate, "Count the number of rows"),
        FunctionMetadata::new("SUM", Aggregate, "Sum of values"),
        FunctionMetadata::new("AVG", Aggregate, "Average of values"),
        FunctionMetadata::new("MIN", Aggregate, "Minimum value"),
        FunctionMetadata::new("MAX", Aggregate, "Maximum value"),
        FunctionMetadata::new(
            "GROUP_CONCAT",
            Aggregate,
            "Concatenate values from multiple rows",
        ),
        FunctionMetadata::new("ABS", Scalar, "Absolute value"),
        FunctionMetadata::new("CEIL", Scalar, "Round up to the nearest integer"),
        FunctionMetadata::new("FLOOR", Scalar, "Round down to the nearest integer"),
        FunctionMetadata::new("ROUND", Scalar, "Round to nearest decimal"),
        FunctionMetadata::new("CONCAT", Scalar, "Concatenate strings"),
        FunctionMetadata::new("SUBSTR", Scalar, "Extract a substring"),
        FunctionMetadata::new("LENGTH", Scalar, "String length"),
        FunctionMetadata::new("UPPER", Scalar, "Convert to uppercase"),
        FunctionMetadata::new("LOWER", Scalar, "Convert to lowercase"),
        FunctionMetadata::new("TRIM", Scalar, "Remove leading/trailing whitespace"),
        FunctionMetadata::new("COALESCE", Scalar, "Return the first non-null argument"),
        FunctionMetadata::new("NOW", Scalar, "Current date and time"),
        FunctionMetadata::new("CURRENT_DATE", Scalar, "Current date"),
        FunctionMetadata::new("CURRENT_TIME", Scalar, "Current time"),
        FunctionMetadata::new("ROW_NUMBER", Window, "Row number within partition"),
        FunctionMetadata::new("RANK", Window, "Rank within partition"),
        FunctionMetadata::new("DENSE_RANK", Window, "Dense rank within partition"),
        FunctionMetadata::new("LAG", Window, "Value from a previous row"),
        FunctionMetadata::new("LEAD", Window, "Value from a following row"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_count() {
        let funcs = all_functions();
        assert!(funcs.iter().any(|f| f.name == "COUNT"));
    }

    #[test]
    fn names_are_unique() {
        let funcs = all_functions();
        let mut names: Vec<_> = funcs.iter().map(|f| f.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), funcs.len());
    }
}
