//! Field accessors over decoded settings objects.
//!
//! Every helper takes the settings key it is reading from so that failures
//! name the offending namespace. A JSON `null` counts as an absent field.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use volt_shared::error::UnknownVariant;
use volt_shared::protocol::RawSettings;
use volt_shared::Patch;

use crate::error::{DecodeError, Result};

/// A decoded settings value.
pub type JsonObject = Map<String, Value>;

/// The stored string for `key`. Empty strings count as absent.
pub(crate) fn raw_value<'a>(source: &'a RawSettings, key: &str) -> Option<&'a str> {
    source
        .get(key)
        .map(|(_, value)| value.as_str())
        .filter(|value| !value.is_empty())
}

pub(crate) fn parse_object(key: &str, raw: &str) -> Result<JsonObject> {
    serde_json::from_str(raw).map_err(|e| DecodeError::json(key, e))
}

pub(crate) fn encode(object: JsonObject) -> String {
    Value::Object(object).to_string()
}

/// Write one field edit into `payload`: `Cleared` removes the key.
pub(crate) fn apply(payload: &mut JsonObject, name: &str, patch: Patch<Value>) {
    match patch {
        Patch::Omitted => {}
        Patch::Cleared => {
            payload.shift_remove(name);
        }
        Patch::Set(value) => {
            payload.insert(name.to_string(), value);
        }
    }
}

fn field<'a>(object: &'a JsonObject, name: &str) -> Option<&'a Value> {
    object.get(name).filter(|value| !value.is_null())
}

fn vocabulary_error(key: &str) -> impl FnOnce(UnknownVariant) -> DecodeError + '_ {
    move |source| DecodeError::Vocabulary {
        key: key.to_string(),
        source,
    }
}

pub(crate) fn opt_str<'a>(
    key: &str,
    object: &'a JsonObject,
    name: &str,
) -> Result<Option<&'a str>> {
    match field(object, name) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(DecodeError::shape(key, name, "a string")),
    }
}

pub(crate) fn opt_bool(key: &str, object: &JsonObject, name: &str) -> Result<Option<bool>> {
    match field(object, name) {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(DecodeError::shape(key, name, "a boolean")),
    }
}

pub(crate) fn opt_i64(key: &str, object: &JsonObject, name: &str) -> Result<Option<i64>> {
    match field(object, name) {
        None => Ok(None),
        Some(value) => value
            .as_i64()
            .map(Some)
            .ok_or_else(|| DecodeError::shape(key, name, "an integer")),
    }
}

/// A string-backed vocabulary field; an empty string counts as unset.
pub(crate) fn opt_vocab<T>(
    key: &str,
    object: &JsonObject,
    name: &str,
    from_raw: impl FnOnce(&str) -> std::result::Result<T, UnknownVariant>,
) -> Result<Option<T>> {
    match opt_str(key, object, name)? {
        None | Some("") => Ok(None),
        Some(raw) => from_raw(raw).map(Some).map_err(vocabulary_error(key)),
    }
}

pub(crate) fn opt_int_vocab<T>(
    key: &str,
    object: &JsonObject,
    name: &str,
    from_raw: impl FnOnce(i64) -> std::result::Result<T, UnknownVariant>,
) -> Result<Option<T>> {
    match opt_i64(key, object, name)? {
        None => Ok(None),
        Some(raw) => from_raw(raw).map(Some).map_err(vocabulary_error(key)),
    }
}

/// Any other structured field, decoded through serde.
pub(crate) fn opt_typed<T: DeserializeOwned>(
    key: &str,
    object: &JsonObject,
    name: &str,
    expected: &'static str,
) -> Result<Option<T>> {
    match field(object, name) {
        None => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|_| DecodeError::shape(key, name, expected)),
    }
}

/// A required field: absent is as bad as mistyped.
pub(crate) fn required<T>(
    key: &str,
    name: &str,
    expected: &'static str,
    value: Option<T>,
) -> Result<T> {
    value.ok_or_else(|| DecodeError::shape(key, name, expected))
}
