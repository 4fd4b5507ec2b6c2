//! Derived nodes owned by a collection.
//!
//! Building a collection moves every input [`Node`](crate::Node) into an
//! arena of [`GridNode`]s. All computed layout (levels, spans, indices,
//! neighbour links) is written onto these derived nodes, never onto anything
//! the caller still holds. Nodes refer to their children by [`NodeId`] and to
//! their parents and neighbours by [`Key`].

use slotmap::{SlotMap, new_key_type};
use trellis_core::{ColumnRole, Key, NodeKind};

use crate::node::NodeFields;

new_key_type! {
    /// A stable handle to a node in a collection's arena.
    ///
    /// Ids are only meaningful for the collection that produced them.
    pub struct NodeId;
}

/// Arena storage for derived nodes.
pub type NodeArena<T> = SlotMap<NodeId, GridNode<T>>;

/// A node as it appears in a built collection.
#[derive(Debug, Clone)]
pub struct GridNode<T> {
    pub(crate) kind: NodeKind,
    pub(crate) key: Key,
    pub(crate) parent_key: Option<Key>,
    pub(crate) value: Option<T>,
    pub(crate) rendered: Option<String>,
    pub(crate) text_value: String,
    pub(crate) role: ColumnRole,
    pub(crate) child_ids: Vec<NodeId>,
    pub(crate) level: usize,
    pub(crate) index: Option<usize>,
    pub(crate) col_index: Option<usize>,
    pub(crate) colspan: usize,
    pub(crate) prev_key: Option<Key>,
    pub(crate) next_key: Option<Key>,
    pub(crate) column: Option<NodeId>,
}

impl<T> GridNode<T> {
    /// Creates a node with no payload and default layout.
    pub(crate) fn synthetic(kind: NodeKind, key: Key) -> Self {
        Self {
            kind,
            key,
            parent_key: None,
            value: None,
            rendered: None,
            text_value: String::new(),
            role: ColumnRole::Data,
            child_ids: Vec::new(),
            level: 0,
            index: None,
            col_index: None,
            colspan: 1,
            prev_key: None,
            next_key: None,
            column: None,
        }
    }

    pub(crate) fn from_fields(fields: NodeFields<T>) -> Self {
        Self {
            parent_key: fields.parent_key,
            value: fields.value,
            rendered: fields.rendered,
            text_value: fields.text_value,
            role: fields.role,
            ..Self::synthetic(fields.kind, fields.key)
        }
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

    /// Returns the ids of the children, in order.
    #[inline]
    pub fn child_ids(&self) -> &[NodeId] {
        &self.child_ids
    }

    /// Returns `true` if this node has children.
    #[inline]
    pub fn has_child_nodes(&self) -> bool {
        !self.child_ids.is_empty()
    }

    /// Returns the nesting level.
    ///
    /// For header cells this is the header row they sit in.
    #[inline]
    pub fn level(&self) -> usize {
        self.level
    }

    /// Returns the position assigned during indexing.
    ///
    /// Rows get their row position; cells their position within the row.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Returns the first leaf column this cell covers.
    #[inline]
    pub fn col_index(&self) -> Option<usize> {
        self.col_index
    }

    /// Returns the number of leaf columns this cell covers.
    #[inline]
    pub fn colspan(&self) -> usize {
        self.colspan
    }

    /// Returns the key of the previous sibling, if any.
    #[inline]
    pub fn prev_key(&self) -> Option<&Key> {
        self.prev_key.as_ref()
    }

    /// Returns the key of the next sibling, if any.
    #[inline]
    pub fn next_key(&self) -> Option<&Key> {
        self.next_key.as_ref()
    }

    /// Returns the leaf column a body cell sits under.
    #[inline]
    pub fn column(&self) -> Option<NodeId> {
        self.column
    }
}

/// Links two consecutive siblings.
pub(crate) fn link<T>(arena: &mut NodeArena<T>, prev: NodeId, next: NodeId) {
    let next_key = arena[next].key.clone();
    let prev_key = arena[prev].key.clone();
    arena[prev].next_key = Some(next_key);
    arena[next].prev_key = Some(prev_key);
}
