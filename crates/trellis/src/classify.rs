//! Tree classification.
//!
//! A single depth-first pass over the input tree that moves every node into
//! the arena and sorts the structural ones into buckets: the body, the leaf
//! columns in left-to-right order, a key index of every column (groups
//! included) and the row-level nodes.

use std::collections::HashMap;

use indexmap::IndexSet;
use trellis_core::logging::{span_names, targets};
use trellis_core::{Key, NodeKind, PerfSpan};

use crate::arena::{GridNode, NodeArena, NodeId};
use crate::node::Node;

/// The buckets produced by [`classify`].
#[derive(Debug, Default)]
pub struct Classification {
    /// The body node, if the tree had one.
    pub body: Option<NodeId>,
    /// Leaf columns in pre-order, left-to-right encounter order.
    pub leaf_columns: Vec<NodeId>,
    /// Every column by key, groups included.
    pub column_index: HashMap<Key, NodeId>,
    /// Items and sections in encounter order.
    pub row_nodes: Vec<NodeId>,
    /// Keys of leaf columns flagged as row headers.
    pub row_header_keys: IndexSet<Key>,
}

/// Moves `nodes` into `arena` and classifies them.
///
/// Items are rows whose children are cells: they are moved into the arena
/// as they are but never classified, so columns or rows nested inside an
/// item are not registered.
pub fn classify<T>(
    arena: &mut NodeArena<T>,
    nodes: impl IntoIterator<Item = Node<T>>,
) -> Classification {
    let _span = PerfSpan::new(span_names::CLASSIFY);
    let mut out = Classification::default();

    for node in nodes {
        visit(arena, node, &mut out);
    }

    tracing::debug!(
        target: targets::CLASSIFY,
        leaf_columns = out.leaf_columns.len(),
        columns = out.column_index.len(),
        rows = out.row_nodes.len(),
        has_body = out.body.is_some(),
        "classified tree"
    );
    out
}

fn visit<T>(arena: &mut NodeArena<T>, node: Node<T>, out: &mut Classification) -> NodeId {
    let is_leaf_column = node.is_leaf_column();
    let (fields, children) = node.into_parts();
    let kind = fields.kind;
    let key = fields.key.clone();
    let role = fields.role;
    let id = arena.insert(GridNode::from_fields(fields));

    match kind {
        NodeKind::Body => {
            if out.body.replace(id).is_some() {
                tracing::warn!(target: targets::CLASSIFY, %key, "multiple body nodes, keeping the last");
            }
        }
        NodeKind::Column => {
            if out.column_index.insert(key.clone(), id).is_some() {
                tracing::debug!(target: targets::CLASSIFY, %key, "duplicate column key, last one wins");
            }
            if is_leaf_column {
                tracing::trace!(target: targets::CLASSIFY, %key, "leaf column");
                out.leaf_columns.push(id);
                if role.is_row_header() {
                    out.row_header_keys.insert(key);
                }
            }
        }
        NodeKind::Section => out.row_nodes.push(id),
        NodeKind::Item => {
            out.row_nodes.push(id);
            let child_ids: Vec<_> = children.into_iter().map(|c| adopt(arena, c)).collect();
            arena[id].child_ids = child_ids;
            return id;
        }
        _ => {}
    }

    let child_ids: Vec<_> = children
        .into_iter()
        .map(|c| visit(arena, c, out))
        .collect();
    arena[id].child_ids = child_ids;
    id
}

/// Moves a subtree into the arena without classifying it.
fn adopt<T>(arena: &mut NodeArena<T>, node: Node<T>) -> NodeId {
    let (fields, children) = node.into_parts();
    let id = arena.insert(GridNode::from_fields(fields));
    let child_ids: Vec<_> = children.into_iter().map(|c| adopt(arena, c)).collect();
    arena[id].child_ids = child_ids;
    id
}
