//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the store. Library
//! code never reads environment variables; the binary does that and hands the values in.

use crate::constants::{
    DEFAULT_PROFILE_DATA_DIR, DEFAULT_PROFILE_NAME, FORBIDDEN_NAME_CHARS, PROFILE_FILE_EXTENSION,
};
use crate::{SessionError, SessionResult};
use session_profile::constants::ASSET_FILE_EXTENSION;
use std::path::{Path, PathBuf};

/// Session configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    profile_data_dir: PathBuf,
    profile_name: String,
    asset_extension: String,
}

impl SessionConfig {
    /// Create a new `SessionConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidInput`] if `asset_extension` does not start with `.`,
    /// and [`SessionError::InvalidProfileName`] if `profile_name` is not a valid name.
    pub fn new(
        profile_data_dir: PathBuf,
        profile_name: String,
        asset_extension: String,
    ) -> SessionResult<Self> {
        validate_profile_name(&profile_name)?;
        if asset_extension.len() < 2 || !asset_extension.starts_with('.') {
            return Err(SessionError::InvalidInput(format!(
                "asset extension '{asset_extension}' must start with '.'"
            )));
        }

        Ok(Self {
            profile_data_dir,
            profile_name,
            asset_extension,
        })
    }

    /// Build a configuration from optional overrides, falling back to the defaults.
    ///
    /// Empty or whitespace-only values count as absent.
    pub fn from_overrides(
        profile_data_dir: Option<String>,
        profile_name: Option<String>,
        asset_extension: Option<String>,
    ) -> SessionResult<Self> {
        fn non_empty(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self::new(
            PathBuf::from(
                non_empty(profile_data_dir).unwrap_or_else(|| DEFAULT_PROFILE_DATA_DIR.into()),
            ),
            non_empty(profile_name).unwrap_or_else(|| DEFAULT_PROFILE_NAME.into()),
            non_empty(asset_extension).unwrap_or_else(|| ASSET_FILE_EXTENSION.into()),
        )
    }

    pub fn profile_data_dir(&self) -> &Path {
        &self.profile_data_dir
    }

    /// The profile the session was started with.
    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    pub fn asset_extension(&self) -> &str {
        &self.asset_extension
    }

    /// `<profile_data_dir>/<name>.profile`
    pub fn profile_path(&self, name: &str) -> PathBuf {
        self.profile_data_dir
            .join(format!("{name}.{PROFILE_FILE_EXTENSION}"))
    }
}

/// Check that `name` can be used as a profile file stem.
pub fn validate_profile_name(name: &str) -> SessionResult<()> {
    if name.trim().is_empty() || name.contains(FORBIDDEN_NAME_CHARS) {
        return Err(SessionError::InvalidProfileName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_values() {
        let cfg = SessionConfig::from_overrides(None, Some("  ".into()), None)
            .expect("defaults are valid");
        assert_eq!(cfg.profile_data_dir(), Path::new("profiles"));
        assert_eq!(cfg.profile_name(), "default");
        assert_eq!(cfg.asset_extension(), ".asset");
        assert_eq!(cfg.profile_path("mars"), Path::new("profiles/mars.profile"));
    }

    #[test]
    fn rejects_extension_without_dot() {
        let err = SessionConfig::new("p".into(), "default".into(), "asset".into())
            .expect_err("extension must start with a dot");
        assert!(matches!(err, SessionError::InvalidInput(_)));
    }

    #[test]
    fn rejects_names_with_separators() {
        for name in ["a/b", "a\\b", "c:", "v1.2", ""] {
            assert!(
                matches!(validate_profile_name(name), Err(SessionError::InvalidProfileName(_))),
                "{name:?} should be rejected"
            );
        }
        assert!(validate_profile_name("my_profile-2").is_ok());
    }
}
