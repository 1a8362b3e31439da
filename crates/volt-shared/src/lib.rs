//! # volt-shared
//!
//! Leaf types shared by the settings store and the client: sortable
//! identifiers, the three-way [`Patch`] used by edit builders, the closed
//! vocabularies stored inside settings blobs, and the REST wire payloads.

mod vocabulary;

pub mod constants;
pub mod enums;
pub mod error;
pub mod language;
pub mod patch;
pub mod protocol;
pub mod types;

pub use enums::*;
pub use error::{HttpError, IdError, UnknownVariant};
pub use language::Language;
pub use patch::Patch;
pub use types::{HasId, Ulid};
