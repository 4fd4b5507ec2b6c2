//! Error types for Trellis.
//!
//! Building a collection is permissive by default and never fails; these
//! errors come from the strict entry points that validate input first.

use crate::key::Key;

/// Result type alias for Trellis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by strict construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// More than one column capability flag was set.
    #[error("conflicting column flags: {flags} are mutually exclusive")]
    ConflictingFlags {
        /// The names of the flags that were set.
        flags: String,
    },

    /// The same key was used by more than one node.
    #[error("duplicate key '{key}'")]
    DuplicateKey { key: Key },

    /// A caller node used a key from the reserved synthetic namespace.
    #[error("key '{key}' belongs to the reserved synthetic namespace")]
    ReservedKey { key: Key },

    /// The tree did not contain exactly one body node.
    #[error("expected exactly one body node, found {count}")]
    BodyCount { count: usize },

    /// A column's parent chain leads back to itself.
    #[error("column '{key}' has a cyclic parent chain")]
    CyclicParent { key: Key },
}

impl Error {
    /// Create a conflicting-flags error from the flag triple.
    pub fn conflicting_flags(
        is_row_header: bool,
        is_selection_cell: bool,
        is_drag_button_cell: bool,
    ) -> Self {
        let flags = [
            (is_row_header, "is_row_header"),
            (is_selection_cell, "is_selection_cell"),
            (is_drag_button_cell, "is_drag_button_cell"),
        ]
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, name)| *name)
        .collect::<Vec<_>>()
        .join(", ");
        Self::ConflictingFlags { flags }
    }

    /// Create a duplicate-key error.
    pub fn duplicate_key(key: impl Into<Key>) -> Self {
        Self::DuplicateKey { key: key.into() }
    }

    /// Create a reserved-key error.
    pub fn reserved_key(key: impl Into<Key>) -> Self {
        Self::ReservedKey { key: key.into() }
    }

    /// Create a cyclic-parent error.
    pub fn cyclic_parent(key: impl Into<Key>) -> Self {
        Self::CyclicParent { key: key.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::duplicate_key("a").to_string(),
            "duplicate key 'a'"
        );
        assert_eq!(
            Error::BodyCount { count: 2 }.to_string(),
            "expected exactly one body node, found 2"
        );
        assert_eq!(
            Error::conflicting_flags(false, true, true).to_string(),
            "conflicting column flags: is_selection_cell, is_drag_button_cell are mutually exclusive"
        );
        assert!(Error::reserved_key(Key::header_row(0))
            .to_string()
            .contains("__trellis:headerrow-0"));
    }
}
