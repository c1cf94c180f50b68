// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![allow(missing_debug_implementations)] // validator is zero-sized marker

use crate::schema::{error::ValidationError, Schema, Type};
use crate::Value;

use std::collections::BTreeMap;
use std::rc::Rc;

type String = Rc<str>;

/// Validator for checking if a Value conforms to a Schema.
pub struct SchemaValidator;

impl SchemaValidator {
    /// Validates a Value against a Schema.
    ///
    /// Returns `Ok(())` if the value conforms to the schema, and a
    /// [`ValidationError`] locating the failure site with a dotted path
    /// otherwise.
    pub fn validate(value: &Value, schema: &Schema) -> Result<(), ValidationError> {
        Self::validate_with_path(value, schema, "")
    }

    /// Internal validation function that tracks the current path for error reporting.
    fn validate_with_path(
        value: &Value,
        schema: &Schema,
        path: &str,
    ) -> Result<(), ValidationError> {
        match schema.as_type() {
            Type::Any { .. } => Ok(()),
            Type::Null { .. } => Self::validate_null(value, path),
            Type::Boolean { .. } => Self::validate_boolean(value, path),
            Type::Integer {
                minimum, maximum, ..
            } => Self::validate_integer(value, *minimum, *maximum, path),
            Type::Number {
                minimum, maximum, ..
            } => Self::validate_number(value, *minimum, *maximum, path),
            Type::String {
                min_length,
                max_length,
                ..
            } => Self::validate_string(value, *min_length, *max_length, path),
            Type::Array {
                items,
                min_items,
                max_items,
                ..
            } => Self::validate_array(value, items, *min_items, *max_items, path),
            Type::Object {
                properties,
                required,
                additional_properties,
                ..
            } => Self::validate_object(
                value,
                properties.as_ref().map(|p| &**p),
                required.as_ref().map(|r| &**r),
                additional_properties.as_deref(),
                path,
            ),
        }
    }

    fn type_name(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    fn type_mismatch(expected: &str, value: &Value, path: &str) -> ValidationError {
        ValidationError::TypeMismatch {
            expected: expected.into(),
            actual: Self::type_name(value).into(),
            path: path.into(),
        }
    }

    fn validate_null(value: &Value, path: &str) -> Result<(), ValidationError> {
        match value {
            Value::Null => Ok(()),
            _ => Err(Self::type_mismatch("null", value, path)),
        }
    }

    fn validate_boolean(value: &Value, path: &str) -> Result<(), ValidationError> {
        match value {
            Value::Bool(_) => Ok(()),
            _ => Err(Self::type_mismatch("boolean", value, path)),
        }
    }

    fn validate_integer(
        value: &Value,
        minimum: Option<i64>,
        maximum: Option<i64>,
        path: &str,
    ) -> Result<(), ValidationError> {
        let n = match value {
            Value::Number(n) => n,
            _ => return Err(Self::type_mismatch("integer", value, path)),
        };
        let i = match n.as_i64() {
            Some(i) => i,
            None => return Err(Self::type_mismatch("integer", value, path)),
        };
        let below = minimum.is_some_and(|min| i < min);
        let above = maximum.is_some_and(|max| i > max);
        if below || above {
            return Err(ValidationError::OutOfRange {
                value: i.to_string(),
                min: minimum.map(|m| m.to_string()),
                max: maximum.map(|m| m.to_string()),
                path: path.into(),
            });
        }
        Ok(())
    }

    fn validate_number(
        value: &Value,
        minimum: Option<f64>,
        maximum: Option<f64>,
        path: &str,
    ) -> Result<(), ValidationError> {
        let n = match value {
            Value::Number(n) => n,
            _ => return Err(Self::type_mismatch("number", value, path)),
        };
        let f = n.to_f64_lossy();
        let below = minimum.is_some_and(|min| f < min);
        let above = maximum.is_some_and(|max| f > max);
        if below || above {
            return Err(ValidationError::OutOfRange {
                value: f.to_string(),
                min: minimum.map(|m| m.to_string()),
                max: maximum.map(|m| m.to_string()),
                path: path.into(),
            });
        }
        Ok(())
    }

    fn validate_string(
        value: &Value,
        min_length: Option<usize>,
        max_length: Option<usize>,
        path: &str,
    ) -> Result<(), ValidationError> {
        let s = match value {
            Value::String(s) => s,
            _ => return Err(Self::type_mismatch("string", value, path)),
        };
        let actual_length = s.chars().count();
        let below = min_length.is_some_and(|min| actual_length < min);
        let above = max_length.is_some_and(|max| actual_length > max);
        if below || above {
            return Err(ValidationError::LengthConstraint {
                actual_length,
                min_length,
                max_length,
                path: path.into(),
            });
        }
        Ok(())
    }

    fn validate_array(
        value: &Value,
        items: &Schema,
        min_items: Option<usize>,
        max_items: Option<usize>,
        path: &str,
    ) -> Result<(), ValidationError> {
        let arr = match value {
            Value::Array(a) => a,
            _ => return Err(Self::type_mismatch("array", value, path)),
        };
        let actual_size = arr.len();
        let below = min_items.is_some_and(|min| actual_size < min);
        let above = max_items.is_some_and(|max| actual_size > max);
        if below || above {
            return Err(ValidationError::ArraySizeConstraint {
                actual_size,
                min_items,
                max_items,
                path: path.into(),
            });
        }
        for (index, item) in arr.iter().enumerate() {
            let item_path = format!("{path}[{index}]");
            if let Err(error) = Self::validate_with_path(item, items, &item_path) {
                return Err(ValidationError::ArrayItemValidationFailed {
                    index,
                    path: path.into(),
                    error: Box::new(error),
                });
            }
        }
        Ok(())
    }

    fn validate_object(
        value: &Value,
        properties: Option<&BTreeMap<String, Schema>>,
        required: Option<&Vec<String>>,
        additional_properties: Option<&Schema>,
        path: &str,
    ) -> Result<(), ValidationError> {
        let fields = match value {
            Value::Object(m) => m,
            _ => return Err(Self::type_mismatch("object", value, path)),
        };

        if let Some(required) = required {
            for property in required.iter() {
                if !fields.contains_key(property.as_ref()) {
                    return Err(ValidationError::MissingRequiredProperty {
                        property: property.to_string(),
                        path: path.into(),
                    });
                }
            }
        }

        for (key, item) in fields.iter() {
            let declared = properties.and_then(|p| p.get(key));
            let subschema = match (declared, additional_properties) {
                (Some(s), _) => s,
                (None, Some(s)) => s,
                (None, None) => {
                    return Err(ValidationError::AdditionalPropertiesNotAllowed {
                        property: key.to_string(),
                        path: path.into(),
                    })
                }
            };
            let item_path = if path.is_empty() {
                key.to_string()
            } else {
                format!("{path}.{key}")
            };
            if let Err(error) = Self::validate_with_path(item, subschema, &item_path) {
                return Err(ValidationError::PropertyValidationFailed {
                    property: key.to_string(),
                    path: path.into(),
                    error: Box::new(error),
                });
            }
        }
        Ok(())
    }
}
