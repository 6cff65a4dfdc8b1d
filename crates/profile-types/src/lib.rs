//! Shared value types for session profiles.
//!
//! These types have no knowledge of the profile document format. They are the plain values
//! that profile sections carry (a keyboard shortcut, a position in space) together with their
//! canonical text forms.

mod keys;
mod vector;

pub use keys::{Key, KeyError, KeyModifiers, KeyWithModifier};
pub use vector::DVec3;
