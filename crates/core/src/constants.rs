//! Constants used throughout the session core crate.
//!
//! File name conventions live here so the store, the asset writer and the CLI agree on them.

/// Default directory for profile storage when no explicit directory is configured.
pub const DEFAULT_PROFILE_DATA_DIR: &str = "profiles";

/// Profile loaded when the session does not name one.
pub const DEFAULT_PROFILE_NAME: &str = "default";

/// Extension of profile documents on disk.
pub const PROFILE_FILE_EXTENSION: &str = "profile";

/// `chrono` format of the timestamp appended to backup file names.
///
/// Colons are replaced with underscores so the name is valid on every platform.
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H_%M_%S";

/// Characters a new profile name may not contain.
pub const FORBIDDEN_NAME_CHARS: &[char] = &['/', '\\', ':', '.'];
