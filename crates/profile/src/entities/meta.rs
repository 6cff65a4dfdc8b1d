use super::JsonCodec;
use crate::validation::{
    as_object, check_extra_keys, check_value, optional_string_field, Diagnostics, JsonType,
};
use crate::ProfileResult;
use serde_json::{Map, Value};

/// Free-form descriptive metadata about a profile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Meta {
    pub name: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub license: Option<String>,
}

const CONTEXT: &str = "meta";
const KEYS: [&str; 6] = ["name", "version", "description", "author", "url", "license"];

impl Meta {
    /// Fields paired with their wire keys, in write order.
    fn fields(&self) -> [(&'static str, &Option<String>); 6] {
        [
            (KEYS[0], &self.name),
            (KEYS[1], &self.version),
            (KEYS[2], &self.description),
            (KEYS[3], &self.author),
            (KEYS[4], &self.url),
            (KEYS[5], &self.license),
        ]
    }
}

impl JsonCodec for Meta {
    fn to_json(&self) -> Value {
        let mut obj = Map::new();
        for (key, field) in self.fields() {
            if let Some(text) = field {
                obj.insert(key.into(), Value::from(text.as_str()));
            }
        }
        Value::Object(obj)
    }

    fn from_json(value: &Value, diagnostics: &mut Diagnostics) -> ProfileResult<Self> {
        let obj = as_object(value, CONTEXT)?;
        for key in KEYS {
            check_value(obj, key, JsonType::String, CONTEXT, true)?;
        }
        check_extra_keys(obj, CONTEXT, &KEYS, diagnostics);

        Ok(Self {
            name: optional_string_field(obj, "name", CONTEXT)?,
            version: optional_string_field(obj, "version", CONTEXT)?,
            description: optional_string_field(obj, "description", CONTEXT)?,
            author: optional_string_field(obj, "author", CONTEXT)?,
            url: optional_string_field(obj, "url", CONTEXT)?,
            license: optional_string_field(obj, "license", CONTEXT)?,
        })
    }
}
