//! # volt-store
//!
//! Client-side cache of the user's synced settings.
//!
//! The server keeps settings as `key -> (revision, JSON string)`. This crate
//! holds that raw map in a [`UserSettings`] record, decodes the keys owned by
//! each official client (Android, Revite, Jolt) into typed views, folds
//! server-pushed deltas into the record, and builds the minimal key set an
//! edit needs to send back through a [`SettingsApi`].

pub mod android;
pub mod api;
pub mod jolt;
pub mod revite;
pub mod settings;

mod decode;
mod error;

pub use android::{AndroidPatch, AndroidSettings};
pub use api::SettingsApi;
pub use decode::JsonObject;
pub use error::{DecodeError, Result};
pub use jolt::{JoltPatch, JoltSettings};
pub use revite::{NotificationOptions, RevitePatch, ReviteSettings};
pub use settings::UserSettings;
