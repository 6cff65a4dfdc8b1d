//! # Session Core
//!
//! File and session plumbing around the profile codec.
//!
//! This crate contains the operations that touch the filesystem or the live session:
//! - Loading and writing profile documents under the configured profiles directory
//! - The save-settings command (capture, backup, write)
//! - Writing generated asset scripts
//! - Session snapshots standing in for the live application state
//!
//! **No codec concerns**: parsing, validation, migration and script generation belong in
//! `session-profile`.

pub mod assets;
pub mod config;
pub mod constants;
pub mod error;
pub mod snapshot;
pub mod store;

pub use assets::write_asset_files;
pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use snapshot::{LiveSession, SessionSnapshot};
pub use store::ProfileStore;
