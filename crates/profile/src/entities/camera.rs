//! Camera start pose: a tagged union of two variants.
//!
//! The wire form carries a `type` discriminator next to the variant's own fields:
//! `"setNavigationState"` for [`CameraNavState`] and `"goToGeo"` for [`CameraGoToGeo`].

use super::JsonCodec;
use crate::constants::{CAMERA_GO_TO_GEO_TYPE, CAMERA_NAV_STATE_TYPE};
use crate::validation::{
    as_object, check_extra_keys, check_value, number_field, optional_number_field,
    optional_string_field, string_field, Diagnostics, JsonObject, JsonType,
};
use crate::{ProfileError, ProfileResult};
use profile_types::DVec3;
use serde_json::{json, Map, Value};

const CONTEXT: &str = "camera";
const TYPE: &str = "type";

/// Full navigation state: anchor node, orientation and position in a reference frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CameraNavState {
    pub anchor: String,
    pub aim: Option<String>,
    pub reference_frame: String,
    pub position: DVec3,
    pub up: Option<DVec3>,
    pub yaw: Option<f64>,
    pub pitch: Option<f64>,
}

/// Geographic position above a globe.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CameraGoToGeo {
    pub anchor: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Camera {
    NavState(CameraNavState),
    GoToGeo(CameraGoToGeo),
}

impl From<CameraNavState> for Camera {
    fn from(state: CameraNavState) -> Self {
        Camera::NavState(state)
    }
}

impl From<CameraGoToGeo> for Camera {
    fn from(geo: CameraGoToGeo) -> Self {
        Camera::GoToGeo(geo)
    }
}

fn vec3_to_json(v: &DVec3) -> Value {
    json!({ "x": v.x, "y": v.y, "z": v.z })
}

fn vec3_from_json(
    value: &Value,
    context: &str,
    diagnostics: &mut Diagnostics,
) -> ProfileResult<DVec3> {
    let obj = as_object(value, context)?;
    for axis in ["x", "y", "z"] {
        check_value(obj, axis, JsonType::Number, context, false)?;
    }
    check_extra_keys(obj, context, &["x", "y", "z"], diagnostics);

    Ok(DVec3 {
        x: number_field(obj, "x", context)?,
        y: number_field(obj, "y", context)?,
        z: number_field(obj, "z", context)?,
    })
}

/// Read the discriminator without validating the rest of the object.
fn read_type(obj: &JsonObject) -> ProfileResult<String> {
    check_value(obj, TYPE, JsonType::String, CONTEXT, false)?;
    string_field(obj, TYPE, CONTEXT)
}

fn expect_type(obj: &JsonObject, expected: &str) -> ProfileResult<()> {
    let found = read_type(obj)?;
    if found != expected {
        return Err(ProfileError::UnknownVariant(found));
    }
    Ok(())
}

const NAV_STATE_KEYS: [&str; 8] = [
    "type", "anchor", "aim", "frame", "position", "up", "yaw", "pitch",
];

impl JsonCodec for CameraNavState {
    fn to_json(&self) -> Value {
        let mut obj = Map::new();
        obj.insert(TYPE.into(), Value::from(CAMERA_NAV_STATE_TYPE));
        obj.insert("anchor".into(), Value::from(self.anchor.as_str()));
        if let Some(aim) = &self.aim {
            obj.insert("aim".into(), Value::from(aim.as_str()));
        }
        obj.insert("frame".into(), Value::from(self.reference_frame.as_str()));
        obj.insert("position".into(), vec3_to_json(&self.position));
        if let Some(up) = &self.up {
            obj.insert("up".into(), vec3_to_json(up));
        }
        if let Some(yaw) = self.yaw {
            obj.insert("yaw".into(), Value::from(yaw));
        }
        if let Some(pitch) = self.pitch {
            obj.insert("pitch".into(), Value::from(pitch));
        }
        Value::Object(obj)
    }

    fn from_json(value: &Value, diagnostics: &mut Diagnostics) -> ProfileResult<Self> {
        let obj = as_object(value, CONTEXT)?;
        expect_type(obj, CAMERA_NAV_STATE_TYPE)?;

        check_value(obj, "anchor", JsonType::String, CONTEXT, false)?;
        check_value(obj, "aim", JsonType::String, CONTEXT, true)?;
        check_value(obj, "frame", JsonType::String, CONTEXT, false)?;
        check_value(obj, "position", JsonType::Object, CONTEXT, false)?;
        check_value(obj, "up", JsonType::Object, CONTEXT, true)?;
        check_value(obj, "yaw", JsonType::Number, CONTEXT, true)?;
        check_value(obj, "pitch", JsonType::Number, CONTEXT, true)?;
        check_extra_keys(obj, CONTEXT, &NAV_STATE_KEYS, diagnostics);

        let position = match obj.get("position") {
            Some(p) => vec3_from_json(p, "camera.position", diagnostics)?,
            None => {
                return Err(ProfileError::MissingField {
                    path: "camera.position".into(),
                })
            }
        };
        let up = obj
            .get("up")
            .map(|u| vec3_from_json(u, "camera.up", diagnostics))
            .transpose()?;

        Ok(Self {
            anchor: string_field(obj, "anchor", CONTEXT)?,
            aim: optional_string_field(obj, "aim", CONTEXT)?,
            reference_frame: string_field(obj, "frame", CONTEXT)?,
            position,
            up,
            yaw: optional_number_field(obj, "yaw", CONTEXT)?,
            pitch: optional_number_field(obj, "pitch", CONTEXT)?,
        })
    }
}

const GO_TO_GEO_KEYS: [&str; 5] = ["type", "anchor", "latitude", "longitude", "altitude"];

impl JsonCodec for CameraGoToGeo {
    fn to_json(&self) -> Value {
        let mut obj = Map::new();
        obj.insert(TYPE.into(), Value::from(CAMERA_GO_TO_GEO_TYPE));
        obj.insert("anchor".into(), Value::from(self.anchor.as_str()));
        obj.insert("latitude".into(), Value::from(self.latitude));
        obj.insert("longitude".into(), Value::from(self.longitude));
        if let Some(altitude) = self.altitude {
            obj.insert("altitude".into(), Value::from(altitude));
        }
        Value::Object(obj)
    }

    fn from_json(value: &Value, diagnostics: &mut Diagnostics) -> ProfileResult<Self> {
        let obj = as_object(value, CONTEXT)?;
        expect_type(obj, CAMERA_GO_TO_GEO_TYPE)?;

        check_value(obj, "anchor", JsonType::String, CONTEXT, false)?;
        check_value(obj, "latitude", JsonType::Number, CONTEXT, false)?;
        check_value(obj, "longitude", JsonType::Number, CONTEXT, false)?;
        check_value(obj, "altitude", JsonType::Number, CONTEXT, true)?;
        check_extra_keys(obj, CONTEXT, &GO_TO_GEO_KEYS, diagnostics);

        Ok(Self {
            anchor: string_field(obj, "anchor", CONTEXT)?,
            latitude: number_field(obj, "latitude", CONTEXT)?,
            longitude: number_field(obj, "longitude", CONTEXT)?,
            altitude: optional_number_field(obj, "altitude", CONTEXT)?,
        })
    }
}

impl JsonCodec for Camera {
    fn to_json(&self) -> Value {
        match self {
            Camera::NavState(state) => state.to_json(),
            Camera::GoToGeo(geo) => geo.to_json(),
        }
    }

    fn from_json(value: &Value, diagnostics: &mut Diagnostics) -> ProfileResult<Self> {
        let obj = as_object(value, CONTEXT)?;
        match read_type(obj)?.as_str() {
            CAMERA_NAV_STATE_TYPE => CameraNavState::from_json(value, diagnostics).map(Camera::from),
            CAMERA_GO_TO_GEO_TYPE => CameraGoToGeo::from_json(value, diagnostics).map(Camera::from),
            other => Err(ProfileError::UnknownVariant(other.to_string())),
        }
    }
}
