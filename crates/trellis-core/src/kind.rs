//! Node vocabulary shared by every component.
//!
//! [`NodeKind`] tags what a node is; [`ColumnRole`] replaces the loose
//! property flags a column or cell may carry.

use std::fmt;

use crate::error::{Error, Result};

/// The kind of a node in a table tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A column or column group.
    Column,
    /// A grouping of rows.
    Section,
    /// A leaf row. Its children are cells.
    Item,
    /// The container of all row-level nodes. One per tree.
    Body,
    /// A synthetic row of header cells.
    HeaderRow,
    /// A synthetic empty header cell.
    Placeholder,
    /// A body cell.
    Cell,
}

impl NodeKind {
    /// Returns `true` for nodes that occupy a row of their own.
    #[inline]
    pub fn is_row_level(self) -> bool {
        matches!(self, Self::Item | Self::Section | Self::HeaderRow)
    }

    /// Returns `true` for nodes that sit inside a header row.
    #[inline]
    pub fn is_header_cell(self) -> bool {
        matches!(self, Self::Column | Self::Placeholder)
    }

    /// Returns the lowercase name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Column => "column",
            Self::Section => "section",
            Self::Item => "item",
            Self::Body => "body",
            Self::HeaderRow => "headerrow",
            Self::Placeholder => "placeholder",
            Self::Cell => "cell",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a column (or a cell under it) is for.
///
/// A column is at most one of these, so conflicting flags cannot be
/// expressed once a role exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColumnRole {
    /// An ordinary data column.
    #[default]
    Data,
    /// The column whose value labels each row.
    RowHeader,
    /// The injected selection-checkbox column.
    SelectionCell,
    /// The injected drag-button column.
    DragButtonCell,
}

impl ColumnRole {
    /// Builds a role from the three independent flags a props bag carries.
    ///
    /// Returns [`Error::ConflictingFlags`] when more than one flag is set.
    ///
    /// # Example
    ///
    /// ```
    /// use trellis_core::ColumnRole;
    ///
    /// assert_eq!(ColumnRole::from_flags(true, false, false).unwrap(), ColumnRole::RowHeader);
    /// assert_eq!(ColumnRole::from_flags(false, false, false).unwrap(), ColumnRole::Data);
    /// assert!(ColumnRole::from_flags(false, true, true).is_err());
    /// ```
    pub fn from_flags(
        is_row_header: bool,
        is_selection_cell: bool,
        is_drag_button_cell: bool,
    ) -> Result<Self> {
        match (is_row_header, is_selection_cell, is_drag_button_cell) {
            (false, false, false) => Ok(Self::Data),
            (true, false, false) => Ok(Self::RowHeader),
            (false, true, false) => Ok(Self::SelectionCell),
            (false, false, true) => Ok(Self::DragButtonCell),
            _ => Err(Error::conflicting_flags(
                is_row_header,
                is_selection_cell,
                is_drag_button_cell,
            )),
        }
    }

    /// Returns `true` for the row-header role.
    #[inline]
    pub fn is_row_header(self) -> bool {
        self == Self::RowHeader
    }

    /// Returns `true` for the selection-checkbox role.
    #[inline]
    pub fn is_selection_cell(self) -> bool {
        self == Self::SelectionCell
    }

    /// Returns `true` for the drag-button role.
    #[inline]
    pub fn is_drag_button_cell(self) -> bool {
        self == Self::DragButtonCell
    }

    /// Returns `true` for roles of injected affordance columns.
    #[inline]
    pub fn is_synthetic(self) -> bool {
        matches!(self, Self::SelectionCell | Self::DragButtonCell)
    }
}
