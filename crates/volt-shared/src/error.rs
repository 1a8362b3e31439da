use thiserror::Error;

/// A raw value that does not belong to a closed vocabulary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{value:?} is not a valid {vocabulary}")]
pub struct UnknownVariant {
    pub vocabulary: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub fn new(vocabulary: &'static str, value: impl ToString) -> Self {
        Self {
            vocabulary,
            value: value.to_string(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    #[error("Invalid identifier length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid identifier character {0:?}")]
    InvalidCharacter(char),

    #[error("Identifier timestamp overflows 48 bits")]
    Overflow,
}

/// Failures surfaced by the HTTP collaborator.
///
/// This layer never retries; these are handed back to the caller as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HttpError {
    #[error("Unauthorized: {kind}")]
    Unauthorized { kind: String },

    #[error("HTTP {status}: {kind}")]
    Status { status: u16, kind: String },

    #[error("Transport error: {0}")]
    Transport(String),
}
