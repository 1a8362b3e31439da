//! Three-way field updates.
//!
//! Partial-update APIs need to tell apart "leave this field alone", "remove
//! this field" and "set this field". `Option<T>` only has two states, so edit
//! arguments that can be cleared take a [`Patch<T>`] instead.

/// Keep, clear, or set a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Not supplied; the existing value is left untouched.
    Omitted,
    /// Explicitly cleared; the field is removed.
    Cleared,
    /// Explicitly set to a value.
    Set(T),
}

// Manual impl: no `T: Default` bound.
impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Omitted
    }
}

impl<T> Patch<T> {
    /// True for anything other than [`Patch::Omitted`].
    pub fn is_defined(&self) -> bool {
        !matches!(self, Patch::Omitted)
    }

    pub fn is_omitted(&self) -> bool {
        matches!(self, Patch::Omitted)
    }

    pub fn as_ref(&self) -> Patch<&T> {
        match self {
            Patch::Omitted => Patch::Omitted,
            Patch::Cleared => Patch::Cleared,
            Patch::Set(value) => Patch::Set(value),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Patch<U> {
        match self {
            Patch::Omitted => Patch::Omitted,
            Patch::Cleared => Patch::Cleared,
            Patch::Set(value) => Patch::Set(f(value)),
        }
    }

    /// `None` when omitted, `Some(None)` when cleared, `Some(Some(v))` when set.
    pub fn into_option(self) -> Option<Option<T>> {
        match self {
            Patch::Omitted => None,
            Patch::Cleared => Some(None),
            Patch::Set(value) => Some(Some(value)),
        }
    }
}

/// `None` clears, `Some(v)` sets. There is no way to omit through this
/// conversion; use [`Patch::Omitted`] (the default) for that.
impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Patch::Set(value),
            None => Patch::Cleared,
        }
    }
}
