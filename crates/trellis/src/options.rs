//! Build options for table collections.

use serde::{Deserialize, Serialize};

/// Options controlling which affordance columns a table collection adds.
///
/// Both affordances are off by default. Missing fields deserialize to
/// their defaults, so hosts can keep partial settings files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionOptions {
    /// Adds a leading column of selection checkboxes.
    pub show_selection_checkboxes: bool,
    /// Adds a leading column of drag handles, before the checkboxes.
    pub show_drag_buttons: bool,
}

impl CollectionOptions {
    /// Creates options with every affordance disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether selection checkboxes are shown.
    pub fn with_selection_checkboxes(mut self, show: bool) -> Self {
        self.show_selection_checkboxes = show;
        self
    }

    /// Sets whether drag buttons are shown.
    pub fn with_drag_buttons(mut self, show: bool) -> Self {
        self.show_drag_buttons = show;
        self
    }

    /// Returns the number of synthetic columns these options add.
    pub fn synthetic_column_count(&self) -> usize {
        usize::from(self.show_selection_checkboxes) + usize::from(self.show_drag_buttons)
    }
}
