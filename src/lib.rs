// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

// Use README.md as crate documentation.
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

mod number;
mod path;
mod value;

pub mod schema;

pub use number::Number;
pub use path::{enumerate_paths, resolve_value, InvalidPathError};
pub use value::Value;
