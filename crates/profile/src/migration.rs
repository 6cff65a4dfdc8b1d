//! Forward-only migration of legacy profile documents.
//!
//! Migrations operate on the raw JSON tree before any section is decoded. [`MIGRATIONS`] holds
//! one step per legacy version; [`migrate`] applies the step registered for the tree's
//! declared version until the tree reaches [`CURRENT_VERSION`]. Supporting a new version means
//! appending one entry to the registry.

use crate::constants::{
    CURRENT_VERSION, KEY_ACTIONS, KEY_KEYBINDINGS, KEY_VERSION, MIGRATED_KEYBIND_PREFIX,
    PROFILE_CONTEXT,
};
use crate::entities::{encode_list, Action, JsonCodec, Keybinding, Version};
use crate::validation::{
    as_object, bool_field, check_extra_keys, check_value, object_field, optional_array_field,
    string_field, Diagnostics, JsonObject, JsonType,
};
use crate::{ProfileError, ProfileResult};
use profile_types::KeyWithModifier;
use serde_json::Value;

/// Transform a tree declared at one version into the next version.
pub type MigrationFn = fn(JsonObject, &mut Diagnostics) -> ProfileResult<JsonObject>;

/// A registered migration step.
#[derive(Clone, Copy)]
pub struct MigrationStep {
    /// The exact version this step accepts.
    pub from: Version,
    pub apply: MigrationFn,
}

/// Every known legacy version with its upgrade step.
pub const MIGRATIONS: &[MigrationStep] = &[MigrationStep {
    from: Version::new(1, 0),
    apply: version_1_0::migrate_to_1_1,
}];

/// Read and validate the `version` field of a raw tree.
pub fn declared_version(tree: &JsonObject, diagnostics: &mut Diagnostics) -> ProfileResult<Version> {
    Version::from_json(object_field(tree, KEY_VERSION, PROFILE_CONTEXT)?, diagnostics)
}

/// Upgrade `tree` to the current version.
///
/// Returns the migrated tree together with its (now current) version.
///
/// # Errors
///
/// - [`ProfileError::UnsupportedVersion`] if the declared version, or any intermediate one, is
///   neither current nor registered, or if a step fails to advance the version.
/// - Any structural error raised by a step while reading legacy data.
pub fn migrate(
    mut tree: JsonObject,
    diagnostics: &mut Diagnostics,
) -> ProfileResult<(JsonObject, Version)> {
    let mut version = declared_version(&tree, diagnostics)?;

    while version != CURRENT_VERSION {
        let step = MIGRATIONS
            .iter()
            .find(|step| step.from == version)
            .ok_or(ProfileError::UnsupportedVersion(version))?;

        tree = (step.apply)(tree, diagnostics)?;
        let next = declared_version(&tree, diagnostics)?;
        if next <= version {
            return Err(ProfileError::UnsupportedVersion(next));
        }
        tracing::info!(target: "profile", "Migrated profile from version {} to {}", version, next);
        version = next;
    }

    Ok((tree, version))
}

mod version_1_0 {
    //! Version 1.1 introduced actions; 1.0 keybindings carried their script inline.

    use super::*;

    const CONTEXT: &str = "keybinding";
    const KEYS: [&str; 6] = [
        "key",
        "documentation",
        "name",
        "gui_path",
        "is_local",
        "script",
    ];

    /// A keybinding as written by version 1.0 documents.
    struct LegacyKeybinding {
        key: KeyWithModifier,
        documentation: String,
        name: String,
        gui_path: String,
        is_local: bool,
        script: String,
    }

    impl LegacyKeybinding {
        fn from_json(value: &Value, diagnostics: &mut Diagnostics) -> ProfileResult<Self> {
            let obj = as_object(value, CONTEXT)?;
            for key in KEYS {
                let expected = if key == "is_local" {
                    JsonType::Boolean
                } else {
                    JsonType::String
                };
                check_value(obj, key, expected, CONTEXT, false)?;
            }
            check_extra_keys(obj, CONTEXT, &KEYS, diagnostics);

            Ok(Self {
                key: KeyWithModifier::parse(&string_field(obj, "key", CONTEXT)?)?,
                documentation: string_field(obj, "documentation", CONTEXT)?,
                name: string_field(obj, "name", CONTEXT)?,
                gui_path: string_field(obj, "gui_path", CONTEXT)?,
                is_local: bool_field(obj, "is_local", CONTEXT)?,
                script: string_field(obj, "script", CONTEXT)?,
            })
        }
    }

    pub(super) fn migrate_to_1_1(
        mut tree: JsonObject,
        diagnostics: &mut Diagnostics,
    ) -> ProfileResult<JsonObject> {
        if let Some(legacy) = optional_array_field(&tree, KEY_KEYBINDINGS, PROFILE_CONTEXT)? {
            let mut actions = Vec::with_capacity(legacy.len());
            let mut keybindings = Vec::with_capacity(legacy.len());

            for (index, value) in legacy.iter().enumerate() {
                let kb = LegacyKeybinding::from_json(value, diagnostics)?;
                let identifier = format!("{MIGRATED_KEYBIND_PREFIX}.{index}");

                actions.push(Action {
                    identifier: identifier.clone(),
                    documentation: kb.documentation,
                    name: kb.name,
                    gui_path: kb.gui_path,
                    is_local: kb.is_local,
                    script: kb.script,
                });
                keybindings.push(Keybinding {
                    key: kb.key,
                    action: identifier,
                });
            }

            tree.insert(KEY_ACTIONS.into(), encode_list(&actions));
            tree.insert(KEY_KEYBINDINGS.into(), encode_list(&keybindings));
        }

        tree.insert(KEY_VERSION.into(), Version::new(1, 1).to_json());
        Ok(tree)
    }
}
