//! The [`Profile`] aggregate.
//!
//! A profile is built either by parsing a document ([`Profile::parse`]) or by snapshotting the
//! live session ([`Profile::capture_session`]). Parsing runs in three phases and stops at the
//! first fatal error:
//!
//! 1. Syntax: the text must be a JSON object.
//! 2. Migration: the raw tree is upgraded to [`CURRENT_VERSION`].
//! 3. Decoding: every present section is validated and decoded by its codec.
//!
//! Unknown keys never fail a parse; they are collected in [`Diagnostics`].

use crate::constants::{
    CURRENT_VERSION, KEY_ACTIONS, KEY_ADDITIONAL_SCRIPTS, KEY_ASSETS, KEY_CAMERA,
    KEY_DELTA_TIMES, KEY_KEYBINDINGS, KEY_MARK_NODES, KEY_META, KEY_MODULES, KEY_PROPERTIES,
    KEY_TIME, KEY_VERSION, PROFILE_CONTEXT, TOP_LEVEL_KEYS,
};
use crate::entities::{
    decode_list, encode_list, Action, Camera, CameraNavState, JsonCodec, Keybinding, Meta,
    Module, Property, SetType, Time, Version,
};
use crate::migration::migrate;
use crate::session::{changed_properties, NavigationState, PropertyOwner, TimeStepSource};
use crate::validation::{
    check_extra_keys, number_list, optional_array_field, optional_object_field, string_list,
    Diagnostics, JsonObject, JsonType,
};
use crate::{ProfileError, ProfileResult};
use serde_json::{Map, Value};

#[derive(Clone, Debug)]
pub struct Profile {
    pub version: Version,
    pub modules: Vec<Module>,
    pub meta: Option<Meta>,
    /// Required asset paths, in load order and without duplicates.
    pub assets: Vec<String>,
    pub properties: Vec<Property>,
    pub actions: Vec<Action>,
    pub keybindings: Vec<Keybinding>,
    pub time: Option<Time>,
    pub delta_times: Vec<f64>,
    pub camera: Option<Camera>,
    pub mark_nodes: Vec<String>,
    pub additional_scripts: Vec<String>,
    /// Suppresses asset tracking while a profile is being loaded in bulk. Never persisted.
    pub ignore_updates: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            modules: Vec::new(),
            meta: None,
            assets: Vec::new(),
            properties: Vec::new(),
            actions: Vec::new(),
            keybindings: Vec::new(),
            time: None,
            delta_times: Vec::new(),
            camera: None,
            mark_nodes: Vec::new(),
            additional_scripts: Vec::new(),
            ignore_updates: false,
        }
    }
}

impl PartialEq for Profile {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.modules == other.modules
            && self.meta == other.meta
            && self.assets == other.assets
            && self.properties == other.properties
            && self.actions == other.actions
            && self.keybindings == other.keybindings
            && self.time == other.time
            && self.delta_times == other.delta_times
            && self.camera == other.camera
            && self.mark_nodes == other.mark_nodes
            && self.additional_scripts == other.additional_scripts
    }
}

fn decode_optional_list<T: JsonCodec>(
    tree: &JsonObject,
    key: &str,
    diagnostics: &mut Diagnostics,
) -> ProfileResult<Vec<T>> {
    match optional_array_field(tree, key, PROFILE_CONTEXT)? {
        Some(values) => decode_list(values, diagnostics),
        None => Ok(Vec::new()),
    }
}

fn decode_optional<T: JsonCodec>(
    tree: &JsonObject,
    key: &str,
    diagnostics: &mut Diagnostics,
) -> ProfileResult<Option<T>> {
    optional_object_field(tree, key, PROFILE_CONTEXT)?
        .map(|value| T::from_json(value, diagnostics))
        .transpose()
}

fn optional_strings(tree: &JsonObject, key: &str) -> ProfileResult<Vec<String>> {
    match optional_array_field(tree, key, PROFILE_CONTEXT)? {
        Some(values) => string_list(values, key),
        None => Ok(Vec::new()),
    }
}

impl Profile {
    /// Parse a profile document, discarding diagnostics after logging them.
    ///
    /// # Errors
    ///
    /// Returns the first syntax, structural or migration error; see [`ProfileError`].
    pub fn parse(text: &str) -> ProfileResult<Self> {
        Self::parse_with_diagnostics(text).map(|(profile, _)| profile)
    }

    /// Parse a profile document and return the non-fatal diagnostics alongside it.
    pub fn parse_with_diagnostics(text: &str) -> ProfileResult<(Self, Diagnostics)> {
        let root: Value = serde_json::from_str(text).map_err(ProfileError::SyntaxError)?;
        let Value::Object(tree) = root else {
            return Err(ProfileError::TypeMismatch {
                path: PROFILE_CONTEXT.to_string(),
                expected: JsonType::Object,
            });
        };

        let mut diagnostics = Diagnostics::new();
        check_extra_keys(&tree, PROFILE_CONTEXT, TOP_LEVEL_KEYS, &mut diagnostics);
        let (tree, version) = migrate(tree, &mut diagnostics)?;

        let profile = Self {
            version,
            modules: decode_optional_list(&tree, KEY_MODULES, &mut diagnostics)?,
            meta: decode_optional(&tree, KEY_META, &mut diagnostics)?,
            assets: optional_strings(&tree, KEY_ASSETS)?,
            properties: decode_optional_list(&tree, KEY_PROPERTIES, &mut diagnostics)?,
            actions: decode_optional_list(&tree, KEY_ACTIONS, &mut diagnostics)?,
            keybindings: decode_optional_list(&tree, KEY_KEYBINDINGS, &mut diagnostics)?,
            time: decode_optional(&tree, KEY_TIME, &mut diagnostics)?,
            delta_times: match optional_array_field(&tree, KEY_DELTA_TIMES, PROFILE_CONTEXT)? {
                Some(values) => number_list(values, KEY_DELTA_TIMES)?,
                None => Vec::new(),
            },
            camera: decode_optional(&tree, KEY_CAMERA, &mut diagnostics)?,
            mark_nodes: optional_strings(&tree, KEY_MARK_NODES)?,
            additional_scripts: optional_strings(&tree, KEY_ADDITIONAL_SCRIPTS)?,
            ignore_updates: false,
        };

        Ok((profile, diagnostics))
    }

    /// Encode the profile as a JSON tree under the current version.
    ///
    /// Empty lists and absent sections are left out.
    pub fn to_json(&self) -> Value {
        let mut tree = Map::new();
        tree.insert(KEY_VERSION.into(), CURRENT_VERSION.to_json());

        if !self.modules.is_empty() {
            tree.insert(KEY_MODULES.into(), encode_list(&self.modules));
        }
        if let Some(meta) = &self.meta {
            tree.insert(KEY_META.into(), meta.to_json());
        }
        if !self.assets.is_empty() {
            tree.insert(KEY_ASSETS.into(), Value::from(self.assets.clone()));
        }
        if !self.properties.is_empty() {
            tree.insert(KEY_PROPERTIES.into(), encode_list(&self.properties));
        }
        if !self.actions.is_empty() {
            tree.insert(KEY_ACTIONS.into(), encode_list(&self.actions));
        }
        if !self.keybindings.is_empty() {
            tree.insert(KEY_KEYBINDINGS.into(), encode_list(&self.keybindings));
        }
        if let Some(time) = &self.time {
            tree.insert(KEY_TIME.into(), time.to_json());
        }
        if !self.delta_times.is_empty() {
            tree.insert(KEY_DELTA_TIMES.into(), Value::from(self.delta_times.clone()));
        }
        if let Some(camera) = &self.camera {
            tree.insert(KEY_CAMERA.into(), camera.to_json());
        }
        if !self.mark_nodes.is_empty() {
            tree.insert(KEY_MARK_NODES.into(), Value::from(self.mark_nodes.clone()));
        }
        if !self.additional_scripts.is_empty() {
            tree.insert(
                KEY_ADDITIONAL_SCRIPTS.into(),
                Value::from(self.additional_scripts.clone()),
            );
        }

        Value::Object(tree)
    }

    /// Pretty printed document text with two-space indentation.
    pub fn serialize(&self) -> ProfileResult<String> {
        serde_json::to_string_pretty(&self.to_json()).map_err(ProfileError::Serialization)
    }

    /// Record an asset the session required. Duplicates are ignored.
    pub fn add_asset(&mut self, path: &str) {
        if self.ignore_updates {
            return;
        }
        if !self.assets.iter().any(|asset| asset == path) {
            self.assets.push(path.to_string());
        }
    }

    /// Forget an asset the session removed.
    ///
    /// # Errors
    ///
    /// [`ProfileError::AssetNotFound`] if `path` was never added.
    pub fn remove_asset(&mut self, path: &str) -> ProfileResult<()> {
        if self.ignore_updates {
            return Ok(());
        }
        let index = self
            .assets
            .iter()
            .position(|asset| asset == path)
            .ok_or_else(|| ProfileError::AssetNotFound(path.to_string()))?;
        self.assets.remove(index);
        Ok(())
    }

    /// Copy the live session state into this profile.
    ///
    /// Changed properties are appended as `setPropertyValueSingle` entries; time, delta time
    /// steps and camera are replaced. The collaborators are only read.
    pub fn capture_session<S>(
        &mut self,
        root: &dyn PropertyOwner,
        current_time: &str,
        navigation_state: &NavigationState,
        time_steps: &S,
    ) where
        S: TimeStepSource + ?Sized,
    {
        self.version = CURRENT_VERSION;

        let captured = changed_properties(root);
        tracing::info!(target: "profile", "Captured {} changed properties", captured.len());
        self.properties
            .extend(captured.into_iter().map(|property| Property {
                set_type: SetType::SetValueSingle,
                name: property.fully_qualified_identifier(),
                value: property.string_value(),
            }));

        self.time = Some(Time::absolute(current_time));
        self.delta_times = time_steps.delta_time_steps();

        let nav = navigation_state.clone();
        self.camera = Some(Camera::NavState(CameraNavState {
            anchor: nav.anchor,
            aim: nav.aim,
            reference_frame: nav.reference_frame,
            position: nav.position,
            up: nav.up,
            yaw: nav.yaw,
            pitch: nav.pitch,
        }));
    }
}
