//! Tokens and fixed names used by the profile document format.

use crate::entities::Version;

/// The version every document is written under.
pub const CURRENT_VERSION: Version = Version::new(1, 1);

/// Extension appended to generated asset script files.
pub const ASSET_FILE_EXTENSION: &str = ".asset";

/// Prefix of action identifiers synthesized when migrating legacy keybindings.
pub const MIGRATED_KEYBIND_PREFIX: &str = "profile.keybind";

/// Camera discriminator for [`crate::CameraNavState`].
pub const CAMERA_NAV_STATE_TYPE: &str = "setNavigationState";

/// Camera discriminator for [`crate::CameraGoToGeo`].
pub const CAMERA_GO_TO_GEO_TYPE: &str = "goToGeo";

pub const KEY_VERSION: &str = "version";
pub const KEY_MODULES: &str = "modules";
pub const KEY_META: &str = "meta";
pub const KEY_ASSETS: &str = "assets";
pub const KEY_PROPERTIES: &str = "properties";
pub const KEY_ACTIONS: &str = "actions";
pub const KEY_KEYBINDINGS: &str = "keybindings";
pub const KEY_TIME: &str = "time";
pub const KEY_DELTA_TIMES: &str = "delta_times";
pub const KEY_CAMERA: &str = "camera";
pub const KEY_MARK_NODES: &str = "mark_nodes";
pub const KEY_ADDITIONAL_SCRIPTS: &str = "additional_scripts";

/// Top-level keys in the order they are written.
pub const TOP_LEVEL_KEYS: &[&str] = &[
    KEY_VERSION,
    KEY_MODULES,
    KEY_META,
    KEY_ASSETS,
    KEY_PROPERTIES,
    KEY_ACTIONS,
    KEY_KEYBINDINGS,
    KEY_TIME,
    KEY_DELTA_TIMES,
    KEY_CAMERA,
    KEY_MARK_NODES,
    KEY_ADDITIONAL_SCRIPTS,
];

/// Context label used for top-level fields in error messages.
pub const PROFILE_CONTEXT: &str = "profile";
