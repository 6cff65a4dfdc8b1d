//! Writing generated asset scripts to disk.

use crate::{SessionError, SessionResult};
use session_profile::asset_script::{asset_file_name, generate_asset_scripts};
use session_profile::Profile;
use std::fs;
use std::path::PathBuf;

/// Write one file per asset section to `<prefix>_<section><extension>`.
///
/// Every section is written, including empty ones, so a previous export is always fully
/// replaced. The parent directory of `prefix` is created if needed.
///
/// Returns the written paths in section order.
pub fn write_asset_files(
    profile: &Profile,
    prefix: &str,
    extension: &str,
) -> SessionResult<Vec<PathBuf>> {
    if let Some(parent) = PathBuf::from(prefix).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(SessionError::DirCreation)?;
        }
    }

    let mut written = Vec::new();
    for (section, text) in generate_asset_scripts(profile) {
        let path = PathBuf::from(asset_file_name(prefix, section, extension));
        fs::write(&path, text).map_err(SessionError::FileWrite)?;
        written.push(path);
    }

    tracing::info!("Wrote {} asset files with prefix {}", written.len(), prefix);
    Ok(written)
}
