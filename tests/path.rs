// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use anyhow::Result;
use dotpath::schema::Schema;
use dotpath::{enumerate_paths, resolve_value, InvalidPathError, Value};
use serde_json::json;

fn contact_schema() -> Result<Schema> {
    Schema::from_serde_json_value(json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "address": {
                "type": "object",
                "properties": {
                    "city": { "type": "string" },
                    "zip": { "type": "integer" }
                },
                "required": ["city", "zip"]
            }
        },
        "required": ["name", "address"]
    }))
}

fn contact() -> Result<Value> {
    Value::from_json_str(
        r#"{
            "name": "Pontiac Ifesinachi",
            "address": { "city": "Pontiac", "zip": 48342 }
        }"#,
    )
}

#[test]
fn enumerates_intermediate_and_leaf_paths() -> Result<()> {
    let schema = contact_schema()?;
    let paths = enumerate_paths(&schema);

    let expected = ["address", "address.city", "address.zip", "name"];
    let actual: Vec<&str> = paths.iter().map(|p| p.as_ref()).collect();
    assert_eq!(actual, expected);
    Ok(())
}

#[test]
fn enumeration_is_deterministic() -> Result<()> {
    let schema = contact_schema()?;
    assert_eq!(enumerate_paths(&schema), enumerate_paths(&schema));
    assert_eq!(schema.paths(), enumerate_paths(&schema));
    Ok(())
}

#[test]
fn resolves_nested_leaves() -> Result<()> {
    let instance = contact()?;

    assert_eq!(
        resolve_value(&instance, "address.city")?,
        &Value::from("Pontiac")
    );
    assert_eq!(
        resolve_value(&instance, "address.zip")?,
        &Value::from(48342u64)
    );
    Ok(())
}

#[test]
fn resolves_intermediate_node_to_subobject() -> Result<()> {
    let instance = contact()?;

    let address = resolve_value(&instance, "address")?;
    assert!(address.as_object().is_ok());
    assert_eq!(resolve_value(address, "city")?, &Value::from("Pontiac"));
    Ok(())
}

#[test]
fn resolves_single_segment_directly() -> Result<()> {
    let instance = contact()?;

    assert_eq!(
        resolve_value(&instance, "name")?,
        &Value::from("Pontiac Ifesinachi")
    );
    Ok(())
}

#[test]
fn every_enumerated_path_resolves() -> Result<()> {
    let schema = contact_schema()?;
    let instance = contact()?;

    for path in enumerate_paths(&schema).iter() {
        let resolved = resolve_value(&instance, path)?;

        // Must agree with manual segment-wise indexing.
        let mut expected = &instance;
        for segment in path.split('.') {
            expected = &expected.as_object()?[segment];
        }
        assert_eq!(resolved, expected, "path '{path}'");
    }
    Ok(())
}

#[test]
fn resolution_is_idempotent() -> Result<()> {
    let instance = contact()?;

    let first = resolve_value(&instance, "address.zip")?.clone();
    let second = resolve_value(&instance, "address.zip")?.clone();
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn unknown_key_reports_failing_segment() -> Result<()> {
    let instance = contact()?;

    match resolve_value(&instance, "address.country") {
        Err(InvalidPathError::UnknownKey { path, segment }) => {
            assert_eq!(path, "address.country");
            assert_eq!(segment, "country");
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
    Ok(())
}

#[test]
fn unknown_top_level_key_fails() -> Result<()> {
    let instance = contact()?;

    assert!(matches!(
        resolve_value(&instance, "phone"),
        Err(InvalidPathError::UnknownKey { .. })
    ));
    Ok(())
}

#[test]
fn empty_and_malformed_paths_fail() -> Result<()> {
    let instance = contact()?;

    for path in ["", ".", "a..b", ".name", "name.", "address..city"] {
        assert!(
            matches!(
                resolve_value(&instance, path),
                Err(InvalidPathError::EmptySegment { .. })
            ),
            "path '{path}'"
        );
    }
    Ok(())
}

// A malformed path is rejected as such even when its leading segments would
// already fail lookup for another reason.
#[test]
fn malformed_path_detected_before_lookup() -> Result<()> {
    let instance = contact()?;

    match resolve_value(&instance, "a..b") {
        Err(InvalidPathError::EmptySegment { path }) => {
            assert_eq!(path, "a..b");
        }
        other => panic!("expected EmptySegment, got {other:?}"),
    }

    // Same precedence over a non-traversable prefix.
    assert!(matches!(
        resolve_value(&instance, "name..x"),
        Err(InvalidPathError::EmptySegment { .. })
    ));
    Ok(())
}

#[test]
fn traversal_through_leaf_reports_leaf_segment() -> Result<()> {
    let instance = contact()?;

    match resolve_value(&instance, "name.length") {
        Err(InvalidPathError::NotTraversable { path, segment }) => {
            assert_eq!(path, "name.length");
            assert_eq!(segment, "name");
        }
        other => panic!("expected NotTraversable, got {other:?}"),
    }
    Ok(())
}

#[test]
fn non_object_root_is_not_traversable() -> Result<()> {
    let root = Value::from("scalar");
    assert!(matches!(
        resolve_value(&root, "anything"),
        Err(InvalidPathError::NotTraversable { .. })
    ));
    Ok(())
}

// Optional keys count as present for enumeration, but resolving through an
// actually-absent one is an error, not a silent null.
#[test]
fn absent_optional_key_fails_at_runtime() -> Result<()> {
    let schema = Schema::from_serde_json_value(json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "address": {
                "type": "object",
                "properties": { "city": { "type": "string" } }
            }
        },
        "required": ["name"]
    }))?;
    let instance = Value::from_json_str(r#"{ "name": "n" }"#)?;
    schema.validate(&instance)?;

    assert!(enumerate_paths(&schema).contains("address.city"));
    assert!(matches!(
        resolve_value(&instance, "address.city"),
        Err(InvalidPathError::UnknownKey { .. })
    ));
    Ok(())
}

#[test]
fn arrays_are_leaves() -> Result<()> {
    let schema = Schema::from_serde_json_value(json!({
        "type": "object",
        "properties": {
            "tags": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": { "label": { "type": "string" } }
                }
            }
        }
    }))?;

    let paths = enumerate_paths(&schema);
    let actual: Vec<&str> = paths.iter().map(|p| p.as_ref()).collect();
    assert_eq!(actual, ["tags"]);
    Ok(())
}

#[test]
fn empty_shape_yields_empty_set() -> Result<()> {
    let schema = Schema::from_serde_json_value(json!({ "type": "object", "properties": {} }))?;
    assert!(enumerate_paths(&schema).is_empty());
    Ok(())
}

#[test]
fn error_display_names_path_and_segment() -> Result<()> {
    let instance = contact()?;

    let err = resolve_value(&instance, "address.country").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("address.country"), "{msg}");
    assert!(msg.contains("country"), "{msg}");
    Ok(())
}
