//! File overlay: merge a decoded document over the current record.
//!
//! The record is serialized to a JSON value tree, the decoded file is merged
//! over it and the result is deserialized back. Keys present in the file
//! overwrite, absent keys keep the record's current value.
//!
//! Merge rules:
//! - Objects: deep-merge by key
//! - Arrays: replace
//! - Scalars: replace

use super::sources::file_source::FileFormat;
use crate::error::LoadError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Deep merge `overlay` over `base`.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_, overlay) => overlay,
    }
}

/// Overlay a decoded document onto `target`.
///
/// `target` is only replaced once the merged tree deserializes, so a decode
/// failure leaves it unchanged.
///
/// The whole record goes through serde, which decides a few edge cases:
/// - fields marked `#[serde(skip)]` are not part of the tree and come back as
///   `Default`, whatever the earlier layers set;
/// - an explicit `null` in the document replaces the key, so it only decodes
///   into `Option` fields and is a [`LoadError::Decode`] elsewhere;
/// - non-finite floats serialize to `null`, so a record holding one fails to
///   decode. Defaults and environment bindings never produce such values.
pub fn overlay_into<T>(target: &mut T, format: FileFormat, overlay: Value) -> Result<(), LoadError>
where
    T: Serialize + DeserializeOwned,
{
    let overlay = match overlay {
        // Empty documents carry no keys.
        Value::Null => return Ok(()),
        Value::Object(map) => Value::Object(map),
        other => {
            return Err(LoadError::Decode {
                format,
                message: format!("expected a table at the top level, found {}", kind_of(&other)),
            })
        }
    };

    let base = serde_json::to_value(&*target).map_err(|e| LoadError::Decode {
        format,
        message: format!("current value does not serialize: {}", e),
    })?;

    let merged = deep_merge(base, overlay);
    *target = serde_json::from_value(merged).map_err(|e| LoadError::Decode {
        format,
        message: e.to_string(),
    })?;
    Ok(())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a table",
    }
}
