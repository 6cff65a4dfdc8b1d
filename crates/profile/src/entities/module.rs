use super::JsonCodec;
use crate::validation::{
    as_object, check_extra_keys, check_value, optional_string_field, string_field, Diagnostics,
    JsonType,
};
use crate::ProfileResult;
use serde_json::{Map, Value};

/// Script text that runs depending on whether a named module is loaded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    pub loaded_instruction: Option<String>,
    pub not_loaded_instruction: Option<String>,
}

const CONTEXT: &str = "module";
const NAME: &str = "name";
const LOADED: &str = "loadedInstruction";
const NOT_LOADED: &str = "notLoadedInstruction";

impl JsonCodec for Module {
    fn to_json(&self) -> Value {
        let mut obj = Map::new();
        obj.insert(NAME.into(), Value::from(self.name.as_str()));
        if let Some(loaded) = &self.loaded_instruction {
            obj.insert(LOADED.into(), Value::from(loaded.as_str()));
        }
        if let Some(not_loaded) = &self.not_loaded_instruction {
            obj.insert(NOT_LOADED.into(), Value::from(not_loaded.as_str()));
        }
        Value::Object(obj)
    }

    fn from_json(value: &Value, diagnostics: &mut Diagnostics) -> ProfileResult<Self> {
        let obj = as_object(value, CONTEXT)?;
        check_value(obj, NAME, JsonType::String, CONTEXT, false)?;
        check_value(obj, LOADED, JsonType::String, CONTEXT, true)?;
        check_value(obj, NOT_LOADED, JsonType::String, CONTEXT, true)?;
        check_extra_keys(obj, CONTEXT, &[NAME, LOADED, NOT_LOADED], diagnostics);

        Ok(Self {
            name: string_field(obj, NAME, CONTEXT)?,
            loaded_instruction: optional_string_field(obj, LOADED, CONTEXT)?,
            not_loaded_instruction: optional_string_field(obj, NOT_LOADED, CONTEXT)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_instructions_are_not_written() {
        let module = Module {
            name: "Globebrowsing".into(),
            loaded_instruction: Some("x()".into()),
            not_loaded_instruction: None,
        };
        assert_eq!(
            module.to_json(),
            json!({ "name": "Globebrowsing", "loadedInstruction": "x()" })
        );
    }

    #[test]
    fn decodes_optional_instructions() {
        let mut diagnostics = Diagnostics::new();
        let module = Module::from_json(
            &json!({ "name": "Base", "notLoadedInstruction": "print('no')" }),
            &mut diagnostics,
        )
        .expect("valid module");
        assert_eq!(module.name, "Base");
        assert_eq!(module.loaded_instruction, None);
        assert_eq!(module.not_loaded_instruction.as_deref(), Some("print('no')"));
        assert!(diagnostics.is_empty());
    }
}
