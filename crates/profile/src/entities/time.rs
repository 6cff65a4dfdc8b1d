use super::JsonCodec;
use crate::validation::{
    as_object, check_extra_keys, check_value, string_field, Diagnostics, JsonType,
};
use crate::{ProfileError, ProfileResult};
use serde_json::{json, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeType {
    /// `value` is an ISO-like timestamp.
    Absolute,
    /// `value` is a signed offset from the current wall time, e.g. `-1d`.
    Relative,
}

impl TimeType {
    pub fn token(self) -> &'static str {
        match self {
            TimeType::Absolute => "absolute",
            TimeType::Relative => "relative",
        }
    }

    pub fn from_token(token: &str) -> ProfileResult<Self> {
        match token {
            "absolute" => Ok(TimeType::Absolute),
            "relative" => Ok(TimeType::Relative),
            other => Err(ProfileError::UnknownEnumValue {
                kind: "time type",
                value: other.to_string(),
            }),
        }
    }
}

/// The simulation time a session starts at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Time {
    pub time_type: TimeType,
    pub value: String,
}

impl Time {
    pub fn absolute(value: impl Into<String>) -> Self {
        Self {
            time_type: TimeType::Absolute,
            value: value.into(),
        }
    }
}

const CONTEXT: &str = "time";

impl JsonCodec for Time {
    fn to_json(&self) -> Value {
        json!({ "type": self.time_type.token(), "value": self.value })
    }

    fn from_json(value: &Value, diagnostics: &mut Diagnostics) -> ProfileResult<Self> {
        let obj = as_object(value, CONTEXT)?;
        check_value(obj, "type", JsonType::String, CONTEXT, false)?;
        check_value(obj, "value", JsonType::String, CONTEXT, false)?;
        check_extra_keys(obj, CONTEXT, &["type", "value"], diagnostics);

        Ok(Self {
            time_type: TimeType::from_token(&string_field(obj, "type", CONTEXT)?)?,
            value: string_field(obj, "value", CONTEXT)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_relative_time() {
        let mut diagnostics = Diagnostics::new();
        let time = Time::from_json(&json!({ "type": "relative", "value": "-1d" }), &mut diagnostics)
            .expect("valid time");
        assert_eq!(time.time_type, TimeType::Relative);
        assert_eq!(time.value, "-1d");
    }

    #[test]
    fn unknown_time_type_is_rejected() {
        let mut diagnostics = Diagnostics::new();
        let err = Time::from_json(&json!({ "type": "Absolute", "value": "x" }), &mut diagnostics)
            .expect_err("tokens are lower case");
        assert!(matches!(err, ProfileError::UnknownEnumValue { kind: "time type", .. }));
    }
}
