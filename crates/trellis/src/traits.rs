//! The navigation contract shared by collections.

use trellis_core::Key;

use crate::arena::GridNode;

/// Read-only, key-addressed access to a built collection.
///
/// Keyboard navigation and selection layers work against this trait: they
/// walk keys, never positions, so they keep working when rows are
/// inserted or removed between builds.
///
/// # Implementation Requirements
///
/// Implementors provide:
/// - [`size`](Collection::size) - Number of navigable rows
/// - [`keys`](Collection::keys) - Every key, in collection order
/// - [`get_item`](Collection::get_item) - Key lookup
/// - [`get_first_key`](Collection::get_first_key) and
///   [`get_last_key`](Collection::get_last_key)
/// - [`get_children`](Collection::get_children) - Ordered children of a node
///
/// The remaining operations are derived from those. No operation panics on
/// an unknown key; they return `None` (or an empty iterator) instead.
pub trait Collection {
    /// The payload carried by nodes.
    type Value;

    /// Returns the number of navigable rows.
    fn size(&self) -> usize;

    /// Returns every key in collection order.
    fn keys(&self) -> Box<dyn Iterator<Item = &Key> + '_>;

    /// Looks up a node by key.
    fn get_item(&self, key: &Key) -> Option<&GridNode<Self::Value>>;

    /// Returns the first navigable key.
    fn get_first_key(&self) -> Option<&Key>;

    /// Returns the last navigable key.
    fn get_last_key(&self) -> Option<&Key>;

    /// Returns the children of the node at `key`, in order.
    fn get_children(&self, key: &Key) -> Box<dyn Iterator<Item = &GridNode<Self::Value>> + '_>;

    /// Returns the node at `index` in key order.
    ///
    /// This walks the key sequence, so it is linear in the index.
    fn at(&self, index: usize) -> Option<&GridNode<Self::Value>> {
        let key = self.keys().nth(index)?;
        self.get_item(key)
    }

    /// Returns the key of the sibling before `key`.
    fn get_key_before(&self, key: &Key) -> Option<&Key> {
        self.get_item(key)?.prev_key()
    }

    /// Returns the key of the sibling after `key`.
    fn get_key_after(&self, key: &Key) -> Option<&Key> {
        self.get_item(key)?.next_key()
    }
}
