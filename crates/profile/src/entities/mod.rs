//! Profile section types and their JSON codecs.
//!
//! Each section implements [`JsonCodec`]. Decoders validate the whole object with the schema
//! checks in [`crate::validation`] before extracting any value; encoders only write optional
//! fields that are present.

mod action;
mod camera;
mod meta;
mod module;
mod property;
mod time;
mod version;

pub use action::{Action, Keybinding};
pub use camera::{Camera, CameraGoToGeo, CameraNavState};
pub use meta::Meta;
pub use module::Module;
pub use property::{Property, SetType};
pub use time::{Time, TimeType};
pub use version::Version;

use crate::validation::Diagnostics;
use crate::ProfileResult;
use serde_json::Value;

/// Bidirectional transform between a section value and the generic JSON tree.
pub trait JsonCodec: Sized {
    fn to_json(&self) -> Value;

    /// # Errors
    ///
    /// Returns the first structural error found; unknown keys are added to `diagnostics`.
    fn from_json(value: &Value, diagnostics: &mut Diagnostics) -> ProfileResult<Self>;
}

pub(crate) fn encode_list<T: JsonCodec>(items: &[T]) -> Value {
    Value::Array(items.iter().map(JsonCodec::to_json).collect())
}

pub(crate) fn decode_list<T: JsonCodec>(
    values: &[Value],
    diagnostics: &mut Diagnostics,
) -> ProfileResult<Vec<T>> {
    values
        .iter()
        .map(|value| T::from_json(value, diagnostics))
        .collect()
}
