//! Session profile document support.
//!
//! This crate is responsible for translating between the on-disk profile document (pretty
//! printed JSON) and the in-memory [`Profile`] aggregate, and for projecting a profile into
//! the initialization scripts understood by the scripting host.
//!
//! Responsibilities:
//! - Structural validation of the generic JSON tree ([`validation`]).
//! - One codec per profile section ([`entities`]).
//! - Forward-only migration of legacy documents to the current version ([`migration`]).
//! - The [`Profile`] aggregate: parse, serialize, asset mutation and session capture.
//! - Asset script generation ([`asset_script`]).
//!
//! No I/O happens here. Text is handed in and out as values; reading and writing files is the
//! caller's concern (see `session-core`).

pub mod asset_script;
pub mod constants;
pub mod entities;
pub mod migration;
pub mod profile;
pub mod session;
pub mod validation;

pub use entities::{
    Action, Camera, CameraGoToGeo, CameraNavState, JsonCodec, Keybinding, Meta, Module, Property,
    SetType, Time, TimeType, Version,
};
pub use profile::Profile;
pub use profile_types::{DVec3, Key, KeyModifiers, KeyWithModifier};
pub use session::{LiveProperty, NavigationState, PropertyOwner, TimeStepSource};
pub use validation::{Diagnostics, JsonType, UnrecognizedKey};

use thiserror::Error;

/// How serious a reported profile problem is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Error,
}

/// Errors returned while parsing, migrating or mutating a profile.
///
/// Every variant is fatal for the operation that produced it: a failed parse never yields a
/// partially decoded profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("invalid profile syntax: {0}")]
    SyntaxError(serde_json::Error),

    #[error("failed to serialize profile: {0}")]
    Serialization(serde_json::Error),

    #[error("\"{path}\" field is missing")]
    MissingField { path: String },

    #[error("\"{path}\" must be {expected}")]
    TypeMismatch { path: String, expected: JsonType },

    #[error("unknown {kind} '{value}'")]
    UnknownEnumValue { kind: &'static str, value: String },

    #[error("unknown camera type '{0}'")]
    UnknownVariant(String),

    #[error("unsupported profile version {0}")]
    UnsupportedVersion(Version),

    #[error("invalid key binding: {0}")]
    InvalidKey(#[from] profile_types::KeyError),

    #[error("tried to remove non-existing asset '{0}'")]
    AssetNotFound(String),
}

impl ProfileError {
    /// Severity marker carried alongside the message.
    pub fn severity(&self) -> Severity {
        // Recoverable problems are reported as diagnostics, never as errors.
        Severity::Error
    }
}

pub type ProfileResult<T> = std::result::Result<T, ProfileError>;
