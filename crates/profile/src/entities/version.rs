use super::JsonCodec;
use crate::validation::{
    as_object, check_extra_keys, check_value, unsigned_field, Diagnostics, JsonType,
};
use crate::ProfileResult;
use serde_json::{json, Value};
use std::fmt;

/// Document schema version, ordered by major then minor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

const CONTEXT: &str = "version";

impl JsonCodec for Version {
    fn to_json(&self) -> Value {
        json!({ "major": self.major, "minor": self.minor })
    }

    fn from_json(value: &Value, diagnostics: &mut Diagnostics) -> ProfileResult<Self> {
        let obj = as_object(value, CONTEXT)?;
        check_value(obj, "major", JsonType::Number, CONTEXT, false)?;
        check_value(obj, "minor", JsonType::Number, CONTEXT, false)?;
        check_extra_keys(obj, CONTEXT, &["major", "minor"], diagnostics);

        Ok(Self {
            major: unsigned_field(obj, "major", CONTEXT)?,
            minor: unsigned_field(obj, "minor", CONTEXT)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProfileError;

    #[test]
    fn orders_by_major_then_minor() {
        assert!(Version::new(1, 0) < Version::new(1, 1));
        assert!(Version::new(1, 9) < Version::new(2, 0));
        assert_eq!(Version::new(1, 1).to_string(), "1.1");
    }

    #[test]
    fn decode_requires_minor() {
        let mut diagnostics = Diagnostics::new();
        let err = Version::from_json(&json!({ "major": 1 }), &mut diagnostics)
            .expect_err("minor is required");
        assert!(matches!(err, ProfileError::MissingField { path } if path == "version.minor"));
    }

    #[test]
    fn encodes_as_integers() {
        assert_eq!(
            Version::new(1, 1).to_json(),
            json!({ "major": 1, "minor": 1 })
        );
    }
}
