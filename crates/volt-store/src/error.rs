use std::sync::Arc;

use thiserror::Error;
use volt_shared::error::UnknownVariant;

/// Failure to decode one settings namespace.
///
/// Cached per namespace and handed out on every access, so it must be
/// `Clone`; the JSON error is shared behind an `Arc` for that reason.
#[derive(Error, Debug, Clone)]
pub enum DecodeError {
    /// The stored value is not valid JSON, or not a JSON object.
    #[error("Malformed JSON in setting {key:?}: {source}")]
    Json {
        key: String,
        #[source]
        source: Arc<serde_json::Error>,
    },

    /// A field holds a value outside its vocabulary.
    #[error("Setting {key:?}: {source}")]
    Vocabulary {
        key: String,
        #[source]
        source: UnknownVariant,
    },

    /// A field is present but has the wrong JSON type.
    #[error("Setting {key:?}: field {field:?} must be {expected}")]
    Shape {
        key: String,
        field: String,
        expected: &'static str,
    },
}

impl DecodeError {
    pub(crate) fn json(key: &str, source: serde_json::Error) -> Self {
        Self::Json {
            key: key.to_string(),
            source: Arc::new(source),
        }
    }

    pub(crate) fn shape(key: &str, field: &str, expected: &'static str) -> Self {
        Self::Shape {
            key: key.to_string(),
            field: field.to_string(),
            expected,
        }
    }

    /// The settings key whose value failed to decode.
    pub fn key(&self) -> &str {
        match self {
            Self::Json { key, .. } | Self::Vocabulary { key, .. } | Self::Shape { key, .. } => key,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DecodeError>;
