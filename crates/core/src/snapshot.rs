//! Session snapshots.
//!
//! A snapshot is a JSON dump of the live state a profile capture reads: the current simulation
//! time, the configured delta time steps, the camera's navigation state and the property tree.
//! It lets a capture run outside the host application.
//!
//! ```json
//! {
//!   "current_time": "2024-03-01T12:00:00",
//!   "delta_time_steps": [1, 60, 3600],
//!   "navigation_state": {
//!     "anchor": "Earth",
//!     "reference_frame": "Root",
//!     "position": { "x": 0, "y": 0, "z": 1e7 }
//!   },
//!   "root": {
//!     "identifier": "",
//!     "owners": [
//!       {
//!         "identifier": "Scene",
//!         "properties": [{ "identifier": "Enabled", "value": "false", "default": "true" }]
//!       }
//!     ]
//!   }
//! }
//! ```

use crate::{SessionError, SessionResult};
use profile_types::DVec3;
use serde::Deserialize;
use session_profile::{LiveProperty, NavigationState, PropertyOwner, TimeStepSource};

/// Live session state a profile capture reads from.
pub trait LiveSession {
    fn root(&self) -> &dyn PropertyOwner;
    fn current_time(&self) -> String;
    fn navigation_state(&self) -> NavigationState;
    fn time_steps(&self) -> &dyn TimeStepSource;
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotProperty {
    pub identifier: String,
    /// Current value as script expression text.
    pub value: String,
    /// Value the property had at startup.
    pub default: String,
    #[serde(skip)]
    full_identifier: String,
}

impl SnapshotProperty {
    pub fn new(identifier: &str, value: &str, default: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            value: value.to_string(),
            default: default.to_string(),
            full_identifier: identifier.to_string(),
        }
    }
}

impl LiveProperty for SnapshotProperty {
    fn has_changed(&self) -> bool {
        self.value != self.default
    }

    fn fully_qualified_identifier(&self) -> String {
        self.full_identifier.clone()
    }

    fn string_value(&self) -> String {
        self.value.clone()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotOwner {
    pub identifier: String,
    #[serde(default)]
    pub properties: Vec<SnapshotProperty>,
    #[serde(default)]
    pub owners: Vec<SnapshotOwner>,
}

impl SnapshotOwner {
    /// Fill in fully qualified identifiers below this owner.
    ///
    /// Identifiers are joined with `.`; empty identifiers (such as the root's) are skipped.
    fn resolve_identifiers(&mut self, parent: &str) {
        let prefix = join_identifier(parent, &self.identifier);
        for property in &mut self.properties {
            property.full_identifier = join_identifier(&prefix, &property.identifier);
        }
        for owner in &mut self.owners {
            owner.resolve_identifiers(&prefix);
        }
    }
}

fn join_identifier(prefix: &str, identifier: &str) -> String {
    match (prefix.is_empty(), identifier.is_empty()) {
        (true, _) => identifier.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{prefix}.{identifier}"),
    }
}

impl PropertyOwner for SnapshotOwner {
    fn sub_owners(&self) -> Vec<&dyn PropertyOwner> {
        self.owners
            .iter()
            .map(|owner| owner as &dyn PropertyOwner)
            .collect()
    }

    fn properties(&self) -> Vec<&dyn LiveProperty> {
        self.properties
            .iter()
            .map(|property| property as &dyn LiveProperty)
            .collect()
    }
}

/// Wire form of [`NavigationState`].
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotNavigationState {
    pub anchor: String,
    #[serde(default)]
    pub aim: Option<String>,
    pub reference_frame: String,
    pub position: DVec3,
    #[serde(default)]
    pub up: Option<DVec3>,
    #[serde(default)]
    pub yaw: Option<f64>,
    #[serde(default)]
    pub pitch: Option<f64>,
}

impl From<&SnapshotNavigationState> for NavigationState {
    fn from(state: &SnapshotNavigationState) -> Self {
        Self {
            anchor: state.anchor.clone(),
            aim: state.aim.clone(),
            reference_frame: state.reference_frame.clone(),
            position: state.position,
            up: state.up,
            yaw: state.yaw,
            pitch: state.pitch,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionSnapshot {
    pub current_time: String,
    #[serde(default)]
    pub delta_time_steps: Vec<f64>,
    pub navigation_state: SnapshotNavigationState,
    pub root: SnapshotOwner,
}

impl SessionSnapshot {
    /// Strictly parse a snapshot from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Snapshot`] naming the failing path (e.g.
    /// `navigation_state.position.z`) when the text does not match the snapshot schema.
    pub fn parse(text: &str) -> SessionResult<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(text);

        let mut snapshot: Self = match serde_path_to_error::deserialize(&mut deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let path = if path.is_empty() || path == "." {
                    "<root>".to_string()
                } else {
                    path
                };
                return Err(SessionError::Snapshot {
                    path,
                    message: err.into_inner().to_string(),
                });
            }
        };

        snapshot.root.resolve_identifiers("");
        Ok(snapshot)
    }
}

impl LiveSession for SessionSnapshot {
    fn root(&self) -> &dyn PropertyOwner {
        &self.root
    }

    fn current_time(&self) -> String {
        self.current_time.clone()
    }

    fn navigation_state(&self) -> NavigationState {
        NavigationState::from(&self.navigation_state)
    }

    fn time_steps(&self) -> &dyn TimeStepSource {
        &self.delta_time_steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use session_profile::session::changed_properties;

    const SNAPSHOT: &str = r#"{
        "current_time": "2024-03-01T12:00:00",
        "delta_time_steps": [1, 60],
        "navigation_state": {
            "anchor": "Earth",
            "reference_frame": "Root",
            "position": { "x": 0, "y": 0, "z": 10000000 },
            "yaw": 0.5
        },
        "root": {
            "identifier": "",
            "properties": [{ "identifier": "Speed", "value": "2", "default": "1" }],
            "owners": [
                {
                    "identifier": "Scene",
                    "owners": [
                        {
                            "identifier": "Earth",
                            "properties": [
                                { "identifier": "Enabled", "value": "false", "default": "true" },
                                { "identifier": "Opacity", "value": "1", "default": "1" }
                            ]
                        }
                    ]
                }
            ]
        }
    }"#;

    #[test]
    fn parse_resolves_fully_qualified_identifiers() {
        let snapshot = SessionSnapshot::parse(SNAPSHOT).expect("valid snapshot");
        let changed: Vec<(String, String)> = changed_properties(snapshot.root())
            .iter()
            .map(|p| (p.fully_qualified_identifier(), p.string_value()))
            .collect();
        assert_eq!(
            changed,
            [
                ("Scene.Earth.Enabled".to_string(), "false".to_string()),
                ("Speed".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn exposes_time_and_navigation() {
        let snapshot = SessionSnapshot::parse(SNAPSHOT).expect("valid snapshot");
        assert_eq!(snapshot.current_time(), "2024-03-01T12:00:00");
        assert_eq!(snapshot.time_steps().delta_time_steps(), vec![1.0, 60.0]);

        let nav = snapshot.navigation_state();
        assert_eq!(nav.anchor, "Earth");
        assert_eq!(nav.position, DVec3::new(0.0, 0.0, 1.0e7));
        assert_eq!(nav.yaw, Some(0.5));
        assert!(nav.up.is_none());
    }

    #[test]
    fn positions_are_read_exactly() {
        let snapshot = SessionSnapshot::parse(
            r#"{
                "current_time": "now",
                "delta_time_steps": [-1.1193133179981887e-17],
                "navigation_state": {
                    "anchor": "Earth",
                    "reference_frame": "Root",
                    "position": {
                        "x": 6.100029174392375e177,
                        "y": 4.9715275161848454e60,
                        "z": 0.1
                    }
                },
                "root": { "identifier": "" }
            }"#,
        )
        .expect("valid snapshot");
        assert_eq!(
            snapshot.navigation_state().position,
            DVec3::new(6.100029174392375e177, 4.9715275161848454e60, 0.1)
        );
        assert_eq!(snapshot.delta_time_steps, [-1.1193133179981887e-17]);
    }

    #[test]
    fn schema_errors_name_the_path() {
        let err = SessionSnapshot::parse(
            r#"{
                "current_time": "now",
                "navigation_state": {
                    "anchor": "Earth",
                    "reference_frame": "Root",
                    "position": { "x": 0, "y": 0, "z": "far" }
                },
                "root": { "identifier": "" }
            }"#,
        )
        .expect_err("z is not a number");
        assert!(
            matches!(&err, SessionError::Snapshot { path, .. } if path == "navigation_state.position.z"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn unknown_snapshot_keys_are_rejected() {
        let err = SessionSnapshot::parse(
            r#"{ "current_time": "now", "camera": {}, "navigation_state": {}, "root": {} }"#,
        )
        .expect_err("camera is not a snapshot key");
        assert!(matches!(err, SessionError::Snapshot { .. }));
    }
}
