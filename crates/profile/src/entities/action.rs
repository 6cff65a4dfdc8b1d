use super::JsonCodec;
use crate::validation::{
    as_object, bool_field, check_extra_keys, check_value, string_field, Diagnostics, JsonType,
};
use crate::ProfileResult;
use profile_types::KeyWithModifier;
use serde_json::{json, Value};

/// A named, registerable command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Action {
    pub identifier: String,
    pub documentation: String,
    pub name: String,
    pub gui_path: String,
    pub is_local: bool,
    pub script: String,
}

const ACTION_CONTEXT: &str = "action";
const ACTION_KEYS: [&str; 6] = [
    "identifier",
    "documentation",
    "name",
    "gui_path",
    "is_local",
    "script",
];

impl JsonCodec for Action {
    fn to_json(&self) -> Value {
        json!({
            "identifier": self.identifier,
            "documentation": self.documentation,
            "name": self.name,
            "gui_path": self.gui_path,
            "is_local": self.is_local,
            "script": self.script,
        })
    }

    fn from_json(value: &Value, diagnostics: &mut Diagnostics) -> ProfileResult<Self> {
        let obj = as_object(value, ACTION_CONTEXT)?;
        for key in ACTION_KEYS {
            let expected = if key == "is_local" {
                JsonType::Boolean
            } else {
                JsonType::String
            };
            check_value(obj, key, expected, ACTION_CONTEXT, false)?;
        }
        check_extra_keys(obj, ACTION_CONTEXT, &ACTION_KEYS, diagnostics);

        Ok(Self {
            identifier: string_field(obj, "identifier", ACTION_CONTEXT)?,
            documentation: string_field(obj, "documentation", ACTION_CONTEXT)?,
            name: string_field(obj, "name", ACTION_CONTEXT)?,
            gui_path: string_field(obj, "gui_path", ACTION_CONTEXT)?,
            is_local: bool_field(obj, "is_local", ACTION_CONTEXT)?,
            script: string_field(obj, "script", ACTION_CONTEXT)?,
        })
    }
}

/// Binds a key combination to an action identifier.
///
/// The identifier is not checked against the profile's declared actions; it may name an action
/// registered elsewhere by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keybinding {
    pub key: KeyWithModifier,
    pub action: String,
}

const KEYBINDING_CONTEXT: &str = "keybinding";

impl JsonCodec for Keybinding {
    fn to_json(&self) -> Value {
        json!({ "key": self.key.to_string(), "action": self.action })
    }

    fn from_json(value: &Value, diagnostics: &mut Diagnostics) -> ProfileResult<Self> {
        let obj = as_object(value, KEYBINDING_CONTEXT)?;
        check_value(obj, "key", JsonType::String, KEYBINDING_CONTEXT, false)?;
        check_value(obj, "action", JsonType::String, KEYBINDING_CONTEXT, false)?;
        check_extra_keys(obj, KEYBINDING_CONTEXT, &["key", "action"], diagnostics);

        Ok(Self {
            key: KeyWithModifier::parse(&string_field(obj, "key", KEYBINDING_CONTEXT)?)?,
            action: string_field(obj, "action", KEYBINDING_CONTEXT)?,
        })
    }
}
