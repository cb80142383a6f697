//! Outgoing payload cleaning.
//!
//! Partial updates must only touch fields the user actually changed, so
//! request bodies drop every key whose value is `null`, an empty string,
//! or an empty array before transmission.  Serde already elides `None`
//! fields; this pass additionally strips blanks that made it into set
//! fields (e.g. a cleared text input submitted as `""`).

use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;

/// Remove empty values from the top level of a JSON object.
///
/// Non-object values are returned unchanged.  The clean is shallow:
/// nested objects keep their contents.
pub fn clean(value: Value) -> Value {
    match value {
        Value::Object(mut map) => {
            map.retain(|_, v| !is_blank(v));
            Value::Object(map)
        }
        other => other,
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Serialize a create DTO and strip empty values.
pub fn clean_create<T: Serialize>(dto: &T) -> Result<Value, CoreError> {
    Ok(clean(serde_json::to_value(dto)?))
}

/// Serialize an update DTO, strip empty values, and reject the update
/// outright if nothing is left to send.
pub fn clean_update<T: Serialize>(dto: &T) -> Result<Value, CoreError> {
    let body = clean(serde_json::to_value(dto)?);
    match &body {
        Value::Object(map) if map.is_empty() => Err(CoreError::EmptyUpdate),
        _ => Ok(body),
    }
}
