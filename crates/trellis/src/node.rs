//! The caller-owned input tree.
//!
//! A [`Node`] describes one element of the table as the caller sees it:
//! columns (possibly nested into groups), a body, sections, rows and cells.
//! A collection build consumes the tree; nothing the caller keeps is
//! written to afterwards.

use trellis_core::{ColumnRole, Key, NodeKind, Result};

/// A node in the caller's table tree.
///
/// # Example
///
/// ```
/// use trellis::{Key, Node};
///
/// let columns = Node::<String>::column("contact")
///     .with_text("Contact")
///     .with_child(Node::column("name").with_text("Name").row_header())
///     .with_child(Node::column("email").with_text("Email"));
///
/// let body = Node::<String>::body("body").with_child(
///     Node::item("row-1")
///         .with_child(Node::cell("row-1-name").with_text("Ada"))
///         .with_child(Node::cell("row-1-email").with_text("ada@example.com")),
/// );
///
/// assert_eq!(columns.children().len(), 2);
/// assert_eq!(columns.children()[0].parent_key(), Some(&Key::from("contact")));
/// assert!(body.has_child_nodes());
/// ```
#[derive(Debug, Clone)]
pub struct Node<T> {
    kind: NodeKind,
    key: Key,
    parent_key: Option<Key>,
    value: Option<T>,
    rendered: Option<String>,
    text_value: String,
    role: ColumnRole,
    children: Vec<Node<T>>,
}

impl<T> Node<T> {
    /// Creates a node of the given kind.
    pub fn new(kind: NodeKind, key: impl Into<Key>) -> Self {
        Self {
            kind,
            key: key.into(),
            parent_key: None,
            value: None,
            rendered: None,
            text_value: String::new(),
            role: ColumnRole::Data,
            children: Vec::new(),
        }
    }

    /// Creates a column (or column group, once it has column children).
    pub fn column(key: impl Into<Key>) -> Self {
        Self::new(NodeKind::Column, key)
    }

    /// Creates the body node that contains the rows.
    pub fn body(key: impl Into<Key>) -> Self {
        Self::new(NodeKind::Body, key)
    }

    /// Creates a section of rows.
    pub fn section(key: impl Into<Key>) -> Self {
        Self::new(NodeKind::Section, key)
    }

    /// Creates a row.
    pub fn item(key: impl Into<Key>) -> Self {
        Self::new(NodeKind::Item, key)
    }

    /// Creates a body cell.
    pub fn cell(key: impl Into<Key>) -> Self {
        Self::new(NodeKind::Cell, key)
    }

    /// Sets the opaque payload.
    pub fn with_value(mut self, value: T) -> Self {
        self.value = Some(value);
        self
    }

    /// Sets the display label.
    pub fn with_rendered(mut self, rendered: impl Into<String>) -> Self {
        self.rendered = Some(rendered.into());
        self
    }

    /// Sets the plain-text value used for type-ahead and accessibility.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_value = text.into();
        self
    }

    /// Sets the column role.
    pub fn with_role(mut self, role: ColumnRole) -> Self {
        self.role = role;
        self
    }

    /// Sets the column role from loose capability flags.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConflictingFlags`](trellis_core::Error::ConflictingFlags)
    /// if more than one flag is set.
    pub fn with_flags(
        self,
        is_row_header: bool,
        is_selection_cell: bool,
        is_drag_button_cell: bool,
    ) -> Result<Self> {
        let role = ColumnRole::from_flags(is_row_header, is_selection_cell, is_drag_button_cell)?;
        Ok(self.with_role(role))
    }

    /// Marks this column as the row header.
    pub fn row_header(self) -> Self {
        self.with_role(ColumnRole::RowHeader)
    }

    /// Sets the parent key explicitly.
    pub fn with_parent_key(mut self, parent_key: impl Into<Key>) -> Self {
        self.parent_key = Some(parent_key.into());
        self
    }

    /// Appends a child.
    ///
    /// A child without a parent key is linked to this node's key.
    pub fn with_child(mut self, mut child: Node<T>) -> Self {
        if child.parent_key.is_none() {
            child.parent_key = Some(self.key.clone());
        }
        self.children.push(child);
        self
    }

    /// Appends several children, in order.
    pub fn with_children(self, children: impl IntoIterator<Item = Node<T>>) -> Self {
        children
            .into_iter()
            .fold(self, |node, child| node.with_child(child))
    }

    /// Returns the node kind.
    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Returns the key.
    #[inline]
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Returns the parent key, if any.
    #[inline]
    pub fn parent_key(&self) -> Option<&Key> {
        self.parent_key.as_ref()
    }

    /// Returns the payload, if any.
    #[inline]
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Returns the display label, if any.
    #[inline]
    pub fn rendered(&self) -> Option<&str> {
        self.rendered.as_deref()
    }

    /// Returns the plain-text value.
    #[inline]
    pub fn text_value(&self) -> &str {
        &self.text_value
    }

    /// Returns the column role.
    #[inline]
    pub fn role(&self) -> ColumnRole {
        self.role
    }

    /// Returns the children.
    #[inline]
    pub fn children(&self) -> &[Node<T>] {
        &self.children
    }

    /// Returns `true` if this node has children.
    #[inline]
    pub fn has_child_nodes(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns `true` for a column without children.
    ///
    /// Any child makes a column a group, even one that is not a column.
    pub fn is_leaf_column(&self) -> bool {
        self.kind == NodeKind::Column && self.children.is_empty()
    }

    /// Splits the node into its own fields and its children.
    pub(crate) fn into_parts(self) -> (NodeFields<T>, Vec<Node<T>>) {
        let fields = NodeFields {
            kind: self.kind,
            key: self.key,
            parent_key: self.parent_key,
            value: self.value,
            rendered: self.rendered,
            text_value: self.text_value,
            role: self.role,
        };
        (fields, self.children)
    }
}

/// The fields of a node without its children.
pub(crate) struct NodeFields<T> {
    pub kind: NodeKind,
    pub key: Key,
    pub parent_key: Option<Key>,
    pub value: Option<T>,
    pub rendered: Option<String>,
    pub text_value: String,
    pub role: ColumnRole,
}

#[cfg(test)]
mod tests {
    use trellis_core::Error;

    use super::*;

    #[test]
    fn test_builder_links_parent_keys() {
        let group = Node::<()>::column("group")
            .with_child(Node::column("a"))
            .with_child(Node::column("b").with_parent_key("elsewhere"));

        assert_eq!(group.children()[0].parent_key(), Some(&Key::from("group")));
        assert_eq!(group.children()[1].parent_key(), Some(&Key::from("elsewhere")));
        assert_eq!(group.parent_key(), None);
    }

    #[test]
    fn test_leaf_column_detection() {
        let leaf = Node::<()>::column("leaf");
        assert!(leaf.is_leaf_column());

        let group = Node::<()>::column("group").with_child(Node::column("leaf"));
        assert!(!group.is_leaf_column());
        assert!(group.children()[0].is_leaf_column());

        let item = Node::<()>::item("row");
        assert!(!item.is_leaf_column());

        let with_cell = Node::<()>::column("a").with_child(Node::cell("x"));
        assert!(!with_cell.is_leaf_column());
    }

    #[test]
    fn test_with_flags() {
        let column = Node::<()>::column("name")
            .with_flags(true, false, false)
            .unwrap();
        assert!(column.role().is_row_header());

        let plain = Node::<()>::column("plain").with_flags(false, false, false).unwrap();
        assert_eq!(plain.role(), ColumnRole::Data);

        let err = Node::<()>::column("both").with_flags(false, true, true).unwrap_err();
        assert!(matches!(err, Error::ConflictingFlags { .. }));
    }

    #[test]
    fn test_payload_and_labels() {
        let node = Node::column("price")
            .with_value(12u32)
            .with_rendered("Price")
            .with_text("price")
            .row_header();

        assert_eq!(node.kind(), NodeKind::Column);
        assert_eq!(node.value(), Some(&12));
        assert_eq!(node.rendered(), Some("Price"));
        assert_eq!(node.text_value(), "price");
        assert!(node.role().is_row_header());
        assert!(!node.has_child_nodes());
    }

    #[test]
    fn test_with_children_preserves_order() {
        let body = Node::<()>::body("body")
            .with_children((0..3).map(|i| Node::item(format!("row-{i}"))));
        let keys: Vec<_> = body.children().iter().map(|c| c.key().to_string()).collect();
        assert_eq!(keys, ["row-0", "row-1", "row-2"]);
    }
}
