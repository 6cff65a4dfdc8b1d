//! Structural validation of the generic JSON tree.
//!
//! Every decoder runs [`check_value`] for each declared field and [`check_extra_keys`] once per
//! object before it extracts anything. Missing or mistyped fields are fatal; keys the reader
//! does not know about are reported as [`UnrecognizedKey`] diagnostics and otherwise ignored,
//! so documents written by newer versions still load.
//!
//! The typed getters (`string_field` and friends) repeat the check they depend on, which keeps
//! extraction free of panics even when a decoder is written without the up-front checks.

use crate::{ProfileError, ProfileResult, Severity};
use serde_json::{Map, Value};
use std::fmt;

pub type JsonObject = Map<String, Value>;

/// The JSON type a field is required to have.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JsonType {
    String,
    Number,
    Object,
    Array,
    Boolean,
    /// A number with no fractional part that fits in `u32`.
    UnsignedInteger,
}

impl JsonType {
    fn matches(self, value: &Value) -> bool {
        match self {
            JsonType::String => value.is_string(),
            JsonType::Number | JsonType::UnsignedInteger => value.is_number(),
            JsonType::Object => value.is_object(),
            JsonType::Array => value.is_array(),
            JsonType::Boolean => value.is_boolean(),
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JsonType::String => "a string",
            JsonType::Number => "a number",
            JsonType::Object => "an object",
            JsonType::Array => "an array",
            JsonType::Boolean => "a boolean",
            JsonType::UnsignedInteger => "a non-negative integer",
        };
        f.write_str(name)
    }
}

/// A key present in the document that the reader does not support.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnrecognizedKey {
    pub context: String,
    pub key: String,
}

impl UnrecognizedKey {
    pub fn severity(&self) -> Severity {
        Severity::Info
    }
}

impl fmt::Display for UnrecognizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key '{}' not supported in '{}'", self.key, self.context)
    }
}

/// Non-fatal findings collected while decoding a document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<UnrecognizedKey>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record and log a diagnostic.
    pub fn push(&mut self, diagnostic: UnrecognizedKey) {
        tracing::info!(target: "profile", "{}", diagnostic);
        self.entries.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UnrecognizedKey> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<UnrecognizedKey> {
        self.entries
    }
}

fn field_path(context: &str, key: &str) -> String {
    format!("{context}.{key}")
}

/// View `value` as an object, failing with a type mismatch on `context` otherwise.
pub fn as_object<'a>(value: &'a Value, context: &str) -> ProfileResult<&'a JsonObject> {
    value.as_object().ok_or_else(|| ProfileError::TypeMismatch {
        path: context.to_string(),
        expected: JsonType::Object,
    })
}

/// Verify presence and type of `key` in `object`.
///
/// # Errors
///
/// - [`ProfileError::MissingField`] if the key is absent and `optional` is false.
/// - [`ProfileError::TypeMismatch`] if the key is present with the wrong type.
pub fn check_value(
    object: &JsonObject,
    key: &str,
    expected: JsonType,
    context: &str,
    optional: bool,
) -> ProfileResult<()> {
    match object.get(key) {
        None if optional => Ok(()),
        None => Err(ProfileError::MissingField {
            path: field_path(context, key),
        }),
        Some(value) if expected.matches(value) => Ok(()),
        Some(_) => Err(ProfileError::TypeMismatch {
            path: field_path(context, key),
            expected,
        }),
    }
}

/// Report every key of `object` that is not in `allowed`.
pub fn check_extra_keys(
    object: &JsonObject,
    context: &str,
    allowed: &[&str],
    diagnostics: &mut Diagnostics,
) {
    for key in object.keys() {
        if !allowed.contains(&key.as_str()) {
            diagnostics.push(UnrecognizedKey {
                context: context.to_string(),
                key: key.clone(),
            });
        }
    }
}

fn checked<'a>(
    object: &'a JsonObject,
    key: &str,
    expected: JsonType,
    context: &str,
) -> ProfileResult<Option<&'a Value>> {
    check_value(object, key, expected, context, true)?;
    Ok(object.get(key))
}

fn required<'a>(
    object: &'a JsonObject,
    key: &str,
    expected: JsonType,
    context: &str,
) -> ProfileResult<&'a Value> {
    check_value(object, key, expected, context, false)?;
    checked(object, key, expected, context)?.ok_or_else(|| ProfileError::MissingField {
        path: field_path(context, key),
    })
}

fn mismatch(context: &str, key: &str, expected: JsonType) -> ProfileError {
    ProfileError::TypeMismatch {
        path: field_path(context, key),
        expected,
    }
}

pub fn string_field(object: &JsonObject, key: &str, context: &str) -> ProfileResult<String> {
    required(object, key, JsonType::String, context)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| mismatch(context, key, JsonType::String))
}

pub fn optional_string_field(
    object: &JsonObject,
    key: &str,
    context: &str,
) -> ProfileResult<Option<String>> {
    Ok(checked(object, key, JsonType::String, context)?
        .and_then(Value::as_str)
        .map(str::to_string))
}

pub fn number_field(object: &JsonObject, key: &str, context: &str) -> ProfileResult<f64> {
    required(object, key, JsonType::Number, context)?
        .as_f64()
        .ok_or_else(|| mismatch(context, key, JsonType::Number))
}

pub fn optional_number_field(
    object: &JsonObject,
    key: &str,
    context: &str,
) -> ProfileResult<Option<f64>> {
    Ok(checked(object, key, JsonType::Number, context)?.and_then(Value::as_f64))
}

pub fn bool_field(object: &JsonObject, key: &str, context: &str) -> ProfileResult<bool> {
    required(object, key, JsonType::Boolean, context)?
        .as_bool()
        .ok_or_else(|| mismatch(context, key, JsonType::Boolean))
}

/// Extract a `u32`, accepting integral floats such as `1.0`.
pub fn unsigned_field(object: &JsonObject, key: &str, context: &str) -> ProfileResult<u32> {
    let value = required(object, key, JsonType::UnsignedInteger, context)?;
    let integral = match value.as_u64() {
        Some(n) => Some(n),
        None => value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0)
            .map(|f| f as u64),
    };
    integral
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| mismatch(context, key, JsonType::UnsignedInteger))
}

pub fn object_field<'a>(
    object: &'a JsonObject,
    key: &str,
    context: &str,
) -> ProfileResult<&'a Value> {
    required(object, key, JsonType::Object, context)
}

pub fn optional_object_field<'a>(
    object: &'a JsonObject,
    key: &str,
    context: &str,
) -> ProfileResult<Option<&'a Value>> {
    checked(object, key, JsonType::Object, context)
}

pub fn optional_array_field<'a>(
    object: &'a JsonObject,
    key: &str,
    context: &str,
) -> ProfileResult<Option<&'a Vec<Value>>> {
    Ok(checked(object, key, JsonType::Array, context)?.and_then(Value::as_array))
}

fn element_mismatch(key: &str, index: usize, expected: JsonType) -> ProfileError {
    ProfileError::TypeMismatch {
        path: format!("{key}[{index}]"),
        expected,
    }
}

/// Decode an array whose elements must all be strings.
pub fn string_list(values: &[Value], key: &str) -> ProfileResult<Vec<String>> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            value
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| element_mismatch(key, index, JsonType::String))
        })
        .collect()
}

/// Decode an array whose elements must all be numbers.
pub fn number_list(values: &[Value], key: &str) -> ProfileResult<Vec<f64>> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            value
                .as_f64()
                .ok_or_else(|| element_mismatch(key, index, JsonType::Number))
        })
        .collect()
}
