// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Record-shape descriptions for the path resolver.
//!
//! A schema is a tree of key → kind-or-subschema, written as a small subset
//! of JSON Schema: the basic types (`any`, `null`, `boolean`, `integer`,
//! `number`, `string`), `array` with `items`, and `object` with
//! `properties`, `required` and `additionalProperties`. This is all the
//! structure path enumeration needs; the constraint fields (`minimum`,
//! `minLength`, `minItems`, ...) are carried for instance validation.
//!
//! Two rules are enforced at construction time rather than at lookup time:
//!     - Unknown schema fields are a deserialization error
//!       (`deny_unknown_fields`), so a misspelled constraint cannot be
//!       silently ignored.
//!     - Object property names must be non-empty and must not contain a
//!       literal `.`, which would be indistinguishable from a path
//!       separator. Shapes that parse therefore have unambiguous paths.
//!
//! `required` has no effect on which paths exist: path validity is computed
//! against the all-keys-present view of the shape. It is honored by
//! [`Schema::validate`], which checks a concrete [`Value`] for conformance.

use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Deserializer};

use crate::Value;

type String = Rc<str>;

pub mod error;
pub mod validate;


/// A record-shape description.
///
/// `Schema` is a lightweight wrapper around a [`Type`] that provides
/// reference counting for efficient sharing and cloning. Schemas are
/// immutable once built, so the paths derived from one can be computed once
/// and cached by the caller.
///
/// ```rust
/// use serde_json::json;
///
/// let schema = Schema::from_serde_json_value(json!({
///     "type": "object",
///     "properties": {
///         "name": { "type": "string" },
///         "age": { "type": "integer", "minimum": 0 }
///     },
///     "required": ["name"]
/// }))
/// .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Schema {
    t: Rc<Type>,
}

impl Schema {
    fn new(t: Type) -> Self {
        Schema { t: Rc::new(t) }
    }

    /// Returns a reference to the underlying type definition.
    pub fn as_type(&self) -> &Type {
        &self.t
    }

    /// Parse a JSON Schema document into a `Schema` instance.
    pub fn from_serde_json_value(schema: serde_json::Value) -> Result<Self> {
        serde_json::from_value::<Schema>(schema).map_err(|e| anyhow!("failed to parse schema: {e}"))
    }

    /// Parse a JSON Schema document from a string into a `Schema` instance.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(s).map_err(|e| anyhow!("failed to parse schema: {e}"))?;
        Self::from_serde_json_value(value)
    }

    /// The set of valid dot-notation paths for this shape.
    ///
    /// See [`crate::enumerate_paths`].
    pub fn paths(&self) -> BTreeSet<String> {
        crate::path::enumerate_paths(self)
    }

    /// Validates a `Value` against this schema.
    ///
    /// Returns `Ok(())` if the value conforms to the schema, or a
    /// `ValidationError` locating the failure with the same dotted path
    /// syntax the resolver uses.
    pub fn validate(&self, value: &Value) -> Result<(), error::ValidationError> {
        validate::SchemaValidator::validate(value, self)
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v: serde_json::Value = Deserialize::deserialize(deserializer)?;
        let t: Type =
            Deserialize::deserialize(v).map_err(|e| serde::de::Error::custom(format!("{e}")))?;

        // Nested schemas pass through this impl themselves, so checking the
        // immediate property names covers the whole tree.
        if let Type::Object {
            properties: Some(properties),
            ..
        } = &t
        {
            for key in properties.keys() {
                if key.is_empty() {
                    return Err(serde::de::Error::custom(
                        "object property names must not be empty",
                    ));
                }
                if key.contains('.') {
                    return Err(serde::de::Error::custom(format!(
                        "object property name '{key}' must not contain '.'"
                    )));
                }
            }
        }

        Ok(Schema::new(t))
    }
}

#[derive(Debug, Clone, Deserialize)]
// Use `type` when deserializing to discriminate between different types.
#[serde(tag = "type")]
// match JSON Schema casing.
#[serde(rename_all = "camelCase")]
// Raise error if unsupported fields are encountered.
#[serde(deny_unknown_fields)]
pub enum Type {
    /// Accepts any value. A property of this type is always a leaf.
    Any { description: Option<String> },

    /// Accepts only `null`.
    Null { description: Option<String> },

    /// Accepts `true` or `false`.
    Boolean { description: Option<String> },

    /// A 64-bit signed integer with optional range constraints.
    Integer {
        description: Option<String>,
        minimum: Option<i64>,
        maximum: Option<i64>,
    },

    /// A 64-bit floating-point number with optional range constraints.
    Number {
        description: Option<String>,
        minimum: Option<f64>,
        maximum: Option<f64>,
    },

    /// A string with optional length constraints.
    #[serde(rename_all = "camelCase")]
    String {
        description: Option<String>,
        min_length: Option<usize>,
        max_length: Option<usize>,
    },

    /// An array with a single item type and optional size constraints.
    ///
    /// Array indices are not part of the path language; an array-typed
    /// property is a leaf when enumerating paths.
    #[serde(rename_all = "camelCase")]
    Array {
        description: Option<String>,
        items: Box<Schema>,
        min_items: Option<usize>,
        max_items: Option<usize>,
    },

    /// An object with declared properties.
    ///
    /// Properties absent from `required` are optional for validation, but
    /// are treated as present when enumerating paths. Keys not listed in
    /// `properties` are rejected by validation unless an
    /// `additionalProperties` schema is given; either way they never
    /// contribute paths.
    #[serde(rename_all = "camelCase")]
    Object {
        description: Option<String>,
        properties: Option<Rc<BTreeMap<String, Schema>>>,
        required: Option<Rc<Vec<String>>>,
        additional_properties: Option<Box<Schema>>,
    },
}
