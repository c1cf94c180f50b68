// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use core::fmt;

/// Validation errors that can occur when validating a Value against a Schema.
///
/// Payloads are owned strings so the error is `Send + Sync` and composes
/// with `anyhow` even though schemas and values themselves are `Rc`-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Value type does not match the expected schema type.
    TypeMismatch {
        expected: String,
        actual: String,
        path: String,
    },
    /// Numeric value is outside the allowed range.
    OutOfRange {
        value: String,
        min: Option<String>,
        max: Option<String>,
        path: String,
    },
    /// String length constraint violation.
    LengthConstraint {
        actual_length: usize,
        min_length: Option<usize>,
        max_length: Option<usize>,
        path: String,
    },
    /// Array size constraint violation.
    ArraySizeConstraint {
        actual_size: usize,
        min_items: Option<usize>,
        max_items: Option<usize>,
        path: String,
    },
    /// Required object property is missing.
    MissingRequiredProperty { property: String, path: String },
    /// Object property failed validation.
    PropertyValidationFailed {
        property: String,
        path: String,
        error: Box<ValidationError>,
    },
    /// Property is not declared and no additionalProperties schema is given.
    AdditionalPropertiesNotAllowed { property: String, path: String },
    /// Array item validation failed.
    ArrayItemValidationFailed {
        index: usize,
        path: String,
        error: Box<ValidationError>,
    },
}

// Renders an optional [min, max] bound pair for range-style errors.
fn bounds<T: fmt::Display>(min: &Option<T>, max: &Option<T>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("at least {min} and at most {max}"),
        (Some(min), None) => format!("at least {min}"),
        (None, Some(max)) => format!("at most {max}"),
        (None, None) => "unconstrained".to_string(),
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::TypeMismatch {
                expected,
                actual,
                path,
            } => {
                write!(
                    f,
                    "value at '{path}' has wrong type: expected {expected}, got {actual}"
                )
            }
            ValidationError::OutOfRange {
                value,
                min,
                max,
                path,
            } => {
                write!(
                    f,
                    "value {value} at '{path}' is out of range: must be {}",
                    bounds(min, max)
                )
            }
            ValidationError::LengthConstraint {
                actual_length,
                min_length,
                max_length,
                path,
            } => {
                write!(
                    f,
                    "String length {actual_length} at '{path}' is not allowed: must be {} characters",
                    bounds(min_length, max_length)
                )
            }
            ValidationError::ArraySizeConstraint {
                actual_size,
                min_items,
                max_items,
                path,
            } => {
                write!(
                    f,
                    "array with {actual_size} items at '{path}' is not allowed: must have {} items",
                    bounds(min_items, max_items)
                )
            }
            ValidationError::MissingRequiredProperty { property, path } => {
                write!(f, "required property '{property}' is missing at '{path}'")
            }
            ValidationError::PropertyValidationFailed {
                property,
                path,
                error,
            } => {
                write!(f, "property '{property}' at '{path}': {error}")
            }
            ValidationError::AdditionalPropertiesNotAllowed { property, path } => {
                write!(
                    f,
                    "property '{property}' at '{path}' is not declared and additional properties are not allowed"
                )
            }
            ValidationError::ArrayItemValidationFailed { index, path, error } => {
                write!(f, "array item {index} at '{path}': {error}")
            }
        }
    }
}

impl core::error::Error for ValidationError {}
