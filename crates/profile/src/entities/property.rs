use super::JsonCodec;
use crate::validation::{
    as_object, check_extra_keys, check_value, string_field, Diagnostics, JsonType,
};
use crate::{ProfileError, ProfileResult};
use serde_json::{json, Value};

/// Which host call applies a [`Property`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetType {
    /// `setPropertyValue`: the name may be a pattern matching several properties.
    SetValue,
    /// `setPropertyValueSingle`: the name is one fully qualified identifier.
    SetValueSingle,
}

impl SetType {
    pub fn token(self) -> &'static str {
        match self {
            SetType::SetValue => "setPropertyValue",
            SetType::SetValueSingle => "setPropertyValueSingle",
        }
    }

    pub fn from_token(token: &str) -> ProfileResult<Self> {
        match token {
            "setPropertyValue" => Ok(SetType::SetValue),
            "setPropertyValueSingle" => Ok(SetType::SetValueSingle),
            other => Err(ProfileError::UnknownEnumValue {
                kind: "property set type",
                value: other.to_string(),
            }),
        }
    }
}

/// A deferred property mutation. `value` is literal script expression text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Property {
    pub set_type: SetType,
    pub name: String,
    pub value: String,
}

const CONTEXT: &str = "property";

impl JsonCodec for Property {
    fn to_json(&self) -> Value {
        json!({
            "type": self.set_type.token(),
            "name": self.name,
            "value": self.value,
        })
    }

    fn from_json(value: &Value, diagnostics: &mut Diagnostics) -> ProfileResult<Self> {
        let obj = as_object(value, CONTEXT)?;
        check_value(obj, "type", JsonType::String, CONTEXT, false)?;
        check_value(obj, "name", JsonType::String, CONTEXT, false)?;
        check_value(obj, "value", JsonType::String, CONTEXT, false)?;
        check_extra_keys(obj, CONTEXT, &["type", "name", "value"], diagnostics);

        Ok(Self {
            set_type: SetType::from_token(&string_field(obj, "type", CONTEXT)?)?,
            name: string_field(obj, "name", CONTEXT)?,
            value: string_field(obj, "value", CONTEXT)?,
        })
    }
}
