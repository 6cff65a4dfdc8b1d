//! Profile documents on disk.
//!
//! [`ProfileStore`] owns the profiles directory. It loads and writes `<name>.profile`
//! documents and implements the save-settings command, which captures the live session into
//! a profile and persists it either under a new name or in place of the profile the session
//! was started with.

use crate::config::{validate_profile_name, SessionConfig};
use crate::constants::BACKUP_TIMESTAMP_FORMAT;
use crate::snapshot::LiveSession;
use crate::{SessionError, SessionResult};
use chrono::{DateTime, Utc};
use session_profile::Profile;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct ProfileStore {
    cfg: Arc<SessionConfig>,
    current_name: String,
}

impl ProfileStore {
    pub fn new(cfg: Arc<SessionConfig>) -> Self {
        let current_name = cfg.profile_name().to_string();
        Self { cfg, current_name }
    }

    /// Name of the profile the session is currently associated with.
    ///
    /// Starts as the configured profile and follows every named save.
    pub fn current_profile_name(&self) -> &str {
        &self.current_name
    }

    pub fn profile_path(&self, name: &str) -> PathBuf {
        self.cfg.profile_path(name)
    }

    /// Read and parse `<dir>/<name>.profile`.
    ///
    /// Unknown keys in the document are logged and otherwise ignored.
    pub fn load_profile(&self, name: &str) -> SessionResult<Profile> {
        let path = self.profile_path(name);
        let text = fs::read_to_string(&path).map_err(SessionError::FileRead)?;
        let (profile, diagnostics) = Profile::parse_with_diagnostics(&text)?;
        if !diagnostics.is_empty() {
            tracing::warn!(
                "Profile {} contains {} unsupported key(s)",
                path.display(),
                diagnostics.len()
            );
        }
        Ok(profile)
    }

    /// Load the profile a session starts from.
    ///
    /// A profile that has never been saved yet starts out empty.
    pub fn load_starting_profile(&self) -> SessionResult<Profile> {
        match self.load_profile(&self.current_name) {
            Err(SessionError::FileRead(err)) if err.kind() == ErrorKind::NotFound => {
                tracing::info!(
                    "No profile at {}, starting from an empty profile",
                    self.profile_path(&self.current_name).display()
                );
                Ok(Profile::default())
            }
            result => result,
        }
    }

    /// Serialize `profile` to `<dir>/<name>.profile`, replacing any existing file.
    pub fn write_profile(&self, name: &str, profile: &Profile) -> SessionResult<PathBuf> {
        let text = profile.serialize()?;
        fs::create_dir_all(self.cfg.profile_data_dir()).map_err(SessionError::DirCreation)?;

        let path = self.profile_path(name);
        fs::write(&path, text).map_err(SessionError::FileWrite)?;
        tracing::info!("Saved profile {}", path.display());
        Ok(path)
    }

    /// Capture the live session into `profile` and save it.
    ///
    /// With `name` set, the profile is written to `<dir>/<name>.profile`; an existing file is
    /// only replaced when `overwrite` is true. Without a name, the current profile is first
    /// copied to a timestamped backup and then overwritten in place. On success the store's
    /// current profile name becomes the target name.
    ///
    /// # Errors
    ///
    /// - [`SessionError::InvalidProfileName`] if `name` contains a path separator, `:` or `.`.
    /// - [`SessionError::ProfileExists`] if the target exists and `overwrite` is false.
    /// - [`SessionError::Backup`] if the backup copy fails; nothing is overwritten then.
    /// - I/O and serialization errors from writing the profile.
    pub fn save_settings_to_profile(
        &mut self,
        profile: &mut Profile,
        session: &dyn LiveSession,
        name: Option<&str>,
        overwrite: bool,
    ) -> SessionResult<PathBuf> {
        let target = match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => {
                validate_profile_name(name)?;
                let path = self.profile_path(name);
                if path.exists() && !overwrite {
                    return Err(SessionError::ProfileExists(path));
                }
                name.to_string()
            }
            None => {
                self.backup_current(Utc::now())?;
                self.current_name.clone()
            }
        };

        profile.capture_session(
            session.root(),
            &session.current_time(),
            &session.navigation_state(),
            session.time_steps(),
        );

        let path = self.write_profile(&target, profile)?;
        self.current_name = target;
        Ok(path)
    }

    /// Copy the current profile to `<current>_<timestamp>.profile`.
    ///
    /// An existing backup is never replaced: a second backup within the same second gets a
    /// `_<n>` suffix.
    ///
    /// Returns the backup path, or `None` when there is no file to back up yet.
    pub fn backup_current(&self, now: DateTime<Utc>) -> SessionResult<Option<PathBuf>> {
        let source = self.profile_path(&self.current_name);
        if !source.exists() {
            return Ok(None);
        }

        let backup = backup_path(&self.cfg, &self.current_name, now);
        fs::copy(&source, &backup).map_err(|err| SessionError::Backup {
            path: backup.clone(),
            source: err,
        })?;
        tracing::info!("Backed up profile {} to {}", source.display(), backup.display());
        Ok(Some(backup))
    }

    pub fn profile_data_dir(&self) -> &Path {
        self.cfg.profile_data_dir()
    }
}

fn backup_path(cfg: &SessionConfig, name: &str, now: DateTime<Utc>) -> PathBuf {
    let stamp = now.format(BACKUP_TIMESTAMP_FORMAT).to_string();
    let mut path = cfg.profile_path(&format!("{name}_{stamp}"));
    let mut n = 1;
    while path.exists() {
        path = cfg.profile_path(&format!("{name}_{stamp}_{n}"));
        n += 1;
    }
    path
}
