use session_profile::ProfileError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid profile name '{0}': names must not contain '/', '\\', ':' or '.'")]
    InvalidProfileName(String),
    #[error("profile '{}' already exists; pass overwrite to replace it", .0.display())]
    ProfileExists(PathBuf),
    #[error("failed to create profile directory: {0}")]
    DirCreation(std::io::Error),
    #[error("failed to read profile file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write profile file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to back up profile '{}': {source}", path.display())]
    Backup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session snapshot schema mismatch at {path}: {message}")]
    Snapshot { path: String, message: String },

    #[error("profile error: {0}")]
    Profile(#[from] ProfileError),
}

pub type SessionResult<T> = std::result::Result<T, SessionError>;
