// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Dot-notation path enumeration and value resolution.
//!
//! A path is one or more object keys joined by `.` (for example
//! `"address.city"`). [`enumerate_paths`] computes the full set of paths a
//! record shape admits; [`resolve_value`] looks a path up in a concrete
//! value. Both are pure functions; every call is independent and
//! idempotent.

use std::collections::BTreeSet;
use std::rc::Rc;

use crate::schema::{Schema, Type};
use crate::Value;

/// Error raised when a path cannot be resolved against a value.
///
/// Carries the full offending path and the segment at which resolution
/// stopped. A failed resolution is a permanent result for that input;
/// retrying cannot succeed without changing the value or the path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidPathError {
    /// The path is empty or contains a zero-length segment
    /// (leading, trailing or doubled `.`).
    #[error("invalid path '{path}': empty segment")]
    EmptySegment { path: String },
    /// A segment does not name a key at its nesting level.
    #[error("invalid path '{path}': no key '{segment}' at that level")]
    UnknownKey { path: String, segment: String },
    /// A non-final segment named a value that cannot be traversed into.
    #[error("invalid path '{path}': '{segment}' is not an object")]
    NotTraversable { path: String, segment: String },
}

/// Computes the set of valid dot-notation paths for a record shape.
///
/// Every intermediate key and every leaf key yields a path; top-level
/// non-nested keys are single-segment paths. Array indices are not part of
/// the path language, so an array-typed property is a leaf. The result is
/// deterministic for a given schema and never fails; a shape with no object
/// keys yields an empty set.
pub fn enumerate_paths(schema: &Schema) -> BTreeSet<Rc<str>> {
    let mut paths = BTreeSet::new();
    collect_paths(schema.as_type(), "", &mut paths);
    paths
}

fn collect_paths(t: &Type, prefix: &str, paths: &mut BTreeSet<Rc<str>>) {
    let Type::Object {
        properties: Some(properties),
        ..
    } = t
    else {
        return;
    };
    for (key, subschema) in properties.iter() {
        let path = if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        };
        paths.insert(path.as_str().into());
        collect_paths(subschema.as_type(), &path, paths);
    }
}

/// Resolves a dot-notation path against a value, returning a reference to
/// the value stored at that path.
///
/// Each segment is looked up as an exact-match object key at its nesting
/// level; no case folding, no escaping. Resolution fails with
/// [`InvalidPathError`] when the path contains an empty segment, when a
/// segment does not name a key at its level (including keys a schema marks
/// optional but the value does not carry), or when a non-final segment
/// names a value that is not an object. No partial value is produced.
pub fn resolve_value<'a>(value: &'a Value, path: &str) -> Result<&'a Value, InvalidPathError> {
    // Malformedness is a property of the path itself, so it is checked in
    // full before any lookup happens.
    if path.split('.').any(str::is_empty) {
        return Err(InvalidPathError::EmptySegment { path: path.into() });
    }

    let mut resolved = value;
    // The segment that produced `resolved`, reported when traversal cannot
    // continue through a non-object.
    let mut traversed: Option<&str> = None;

    for segment in path.split('.') {
        let fields = match resolved {
            Value::Object(fields) => fields,
            _ => {
                return Err(InvalidPathError::NotTraversable {
                    path: path.into(),
                    segment: traversed.unwrap_or(segment).into(),
                })
            }
        };
        resolved = match fields.get(segment) {
            Some(v) => v,
            None => {
                return Err(InvalidPathError::UnknownKey {
                    path: path.into(),
                    segment: segment.into(),
                })
            }
        };
        traversed = Some(segment);
    }
    Ok(resolved)
}
