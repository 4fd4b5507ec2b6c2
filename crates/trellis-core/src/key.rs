//! Keys for addressing nodes in a collection.
//!
//! Every node that ends up in a collection (rows, cells, columns, header
//! rows, placeholders) is addressed by a [`Key`]. Navigation is by key, never
//! by structural path, so keys must be unique across the whole collection.
//!
//! # Reserved namespace
//!
//! Keys minted by the engine itself are [`Key::Synthetic`] and display with
//! the [`RESERVED_PREFIX`]. Caller keys live in the [`Key::Int`] and
//! [`Key::Str`] variants, so the two key spaces cannot collide. String keys
//! that start with the reserved prefix are rejected by strict construction.

use std::fmt;
use std::sync::Arc;

/// Display prefix shared by all synthetic keys.
pub const RESERVED_PREFIX: &str = "__trellis:";

/// Identifies a node within a collection.
///
/// Keys are cheap to clone: string keys share their allocation.
///
/// # Example
///
/// ```
/// use trellis_core::Key;
///
/// let name = Key::from("name");
/// let id = Key::from(42);
///
/// assert_eq!(name.to_string(), "name");
/// assert_eq!(id.as_int(), Some(42));
/// assert!(!name.is_synthetic());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// A numeric caller key.
    Int(i64),
    /// A string caller key.
    Str(Arc<str>),
    /// A key minted by the engine.
    Synthetic(SyntheticKey),
}

/// Keys the engine creates for nodes that have no caller counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SyntheticKey {
    /// The injected selection-checkbox column.
    SelectionColumn,
    /// The injected drag-button column.
    DragButtonColumn,
    /// A header row, by row position.
    HeaderRow(usize),
    /// A placeholder header cell, by header row and starting column.
    Placeholder {
        /// Header row the placeholder sits in.
        row: usize,
        /// First leaf column the placeholder covers.
        col: usize,
    },
    /// The selection cell injected into the row with the given key.
    SelectionCell(Box<Key>),
    /// The drag-button cell injected into the row with the given key.
    DragButtonCell(Box<Key>),
}

impl Key {
    /// Creates a synthetic header-row key.
    #[inline]
    pub fn header_row(row: usize) -> Self {
        Self::Synthetic(SyntheticKey::HeaderRow(row))
    }

    /// Creates a synthetic placeholder key.
    #[inline]
    pub fn placeholder(row: usize, col: usize) -> Self {
        Self::Synthetic(SyntheticKey::Placeholder { row, col })
    }

    /// Returns `true` if this key was minted by the engine.
    #[inline]
    pub fn is_synthetic(&self) -> bool {
        matches!(self, Self::Synthetic(_))
    }

    /// Returns `true` if this key belongs to the reserved namespace.
    ///
    /// This covers synthetic keys as well as caller string keys that
    /// imitate them by starting with [`RESERVED_PREFIX`].
    pub fn is_reserved(&self) -> bool {
        match self {
            Self::Synthetic(_) => true,
            Self::Str(s) => s.starts_with(RESERVED_PREFIX),
            Self::Int(_) => false,
        }
    }

    /// Returns the string value for string keys.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric value for integer keys.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the synthetic kind for engine keys.
    pub fn as_synthetic(&self) -> Option<&SyntheticKey> {
        match self {
            Self::Synthetic(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
            Self::Synthetic(s) => write!(f, "{s}"),
        }
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "Key({n})"),
            Self::Str(s) => write!(f, "Key({s:?})"),
            Self::Synthetic(s) => write!(f, "Key({s})"),
        }
    }
}

impl fmt::Display for SyntheticKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(RESERVED_PREFIX)?;
        match self {
            Self::SelectionColumn => f.write_str("selection-column"),
            Self::DragButtonColumn => f.write_str("drag-button-column"),
            Self::HeaderRow(row) => write!(f, "headerrow-{row}"),
            Self::Placeholder { row, col } => write!(f, "placeholder-{row}-{col}"),
            Self::SelectionCell(row) => write!(f, "selection-cell[{row}]"),
            Self::DragButtonCell(row) => write!(f, "drag-button-cell[{row}]"),
        }
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self::Str(Arc::from(value))
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Self::Str(Arc::from(value))
    }
}

impl From<Arc<str>> for Key {
    fn from(value: Arc<str>) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for Key {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<SyntheticKey> for Key {
    fn from(value: SyntheticKey) -> Self {
        Self::Synthetic(value)
    }
}

static_assertions::assert_impl_all!(Key: Send, Sync);
