//! Indexed grid collections.
//!
//! [`GridCollection`] is the generic base a table builds on: it takes an
//! ordered list of row nodes, assigns positions, links neighbours and
//! records every row and cell in an insertion-ordered key map.

use indexmap::IndexMap;
use trellis_core::logging::{span_names, targets};
use trellis_core::{Key, NodeKind, PerfSpan};

use crate::arena::{GridNode, NodeArena, NodeId, link};
use crate::traits::Collection;

/// An indexed, linked collection of rows and their cells.
///
/// Rows are linked into one chain in the order they were given. Each row's
/// direct cell children are linked into their own chain. Positions and
/// parent keys already assigned to header cells are kept. Nested row-level
/// children (items under a section) are left alone: they appear in the row
/// list in their own right.
#[derive(Debug, Clone)]
pub struct GridCollection<T> {
    arena: NodeArena<T>,
    key_map: IndexMap<Key, NodeId>,
    rows: Vec<NodeId>,
    column_count: usize,
}

impl<T> GridCollection<T> {
    /// Indexes `items` (row node ids in display order).
    ///
    /// `visit_node` is called once for every indexed row and cell after its
    /// position and links have been assigned.
    pub fn new(
        mut arena: NodeArena<T>,
        column_count: usize,
        items: Vec<NodeId>,
        mut visit_node: impl FnMut(&mut GridNode<T>),
    ) -> Self {
        let _span = PerfSpan::new(span_names::INDEX);
        let mut key_map = IndexMap::with_capacity(items.len());

        let mut prev_row: Option<NodeId> = None;
        for (index, &row) in items.iter().enumerate() {
            let node = &mut arena[row];
            node.index = Some(index);
            node.prev_key = None;
            node.next_key = None;
            if let Some(prev) = prev_row {
                link(&mut arena, prev, row);
            }
            prev_row = Some(row);

            visit_node(&mut arena[row]);
            insert_key(&mut key_map, &arena, row);
            index_cells(&mut arena, &mut key_map, row, &mut visit_node);
        }

        tracing::debug!(
            target: targets::GRID,
            rows = items.len(),
            keys = key_map.len(),
            column_count,
            "indexed grid"
        );

        Self {
            arena,
            key_map,
            rows: items,
            column_count,
        }
    }

    /// Returns the insertion-ordered key map.
    #[inline]
    pub fn key_map(&self) -> &IndexMap<Key, NodeId> {
        &self.key_map
    }

    /// Returns the row ids in display order.
    #[inline]
    pub fn rows(&self) -> &[NodeId] {
        &self.rows
    }

    /// Returns the number of leaf columns.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Returns the node with the given id.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&GridNode<T>> {
        self.arena.get(id)
    }

    /// Resolves a key to a node id.
    #[inline]
    pub fn id_of(&self, key: &Key) -> Option<NodeId> {
        self.key_map.get(key).copied()
    }

    /// Returns the arena holding every derived node.
    #[inline]
    pub fn arena(&self) -> &NodeArena<T> {
        &self.arena
    }

    fn row_key(&self, id: Option<&NodeId>) -> Option<&Key> {
        id.and_then(|&id| self.node(id)).map(GridNode::key)
    }
}

fn insert_key<T>(key_map: &mut IndexMap<Key, NodeId>, arena: &NodeArena<T>, id: NodeId) {
    let key = arena[id].key.clone();
    if key_map.insert(key, id).is_some() {
        tracing::debug!(target: targets::GRID, key = %arena[id].key, "duplicate key, last one wins");
    }
}

fn index_cells<T>(
    arena: &mut NodeArena<T>,
    key_map: &mut IndexMap<Key, NodeId>,
    row: NodeId,
    visit_node: &mut impl FnMut(&mut GridNode<T>),
) {
    let row_key = arena[row].key.clone();
    let cells: Vec<NodeId> = arena[row]
        .child_ids
        .iter()
        .copied()
        .filter(|&id| !arena[id].kind.is_row_level())
        .collect();

    let mut next_col = 0;
    for (position, &cell) in cells.iter().enumerate() {
        let node = &mut arena[cell];
        // Header cells arrive with layout positions; body cells are numbered here.
        node.index.get_or_insert(position);
        node.prev_key = None;
        node.next_key = None;
        if node.kind == NodeKind::Cell && node.parent_key.is_none() {
            node.parent_key = Some(row_key.clone());
        }
        let col_index = *node.col_index.get_or_insert(next_col);
        next_col = col_index + node.colspan;

        if position > 0 {
            link(arena, cells[position - 1], cell);
        }
        tracing::trace!(target: targets::GRID, row = %row_key, key = %arena[cell].key, col_index, "cell");

        visit_node(&mut arena[cell]);
        insert_key(key_map, arena, cell);
    }
}

impl<T> Collection for GridCollection<T> {
    type Value = T;

    fn size(&self) -> usize {
        self.rows.len()
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &Key> + '_> {
        Box::new(self.key_map.keys())
    }

    fn get_item(&self, key: &Key) -> Option<&GridNode<T>> {
        self.id_of(key).and_then(|id| self.node(id))
    }

    fn get_first_key(&self) -> Option<&Key> {
        self.row_key(self.rows.first())
    }

    fn get_last_key(&self) -> Option<&Key> {
        self.row_key(self.rows.last())
    }

    fn get_children(&self, key: &Key) -> Box<dyn Iterator<Item = &GridNode<T>> + '_> {
        let children = self
            .get_item(key)
            .map(GridNode::child_ids)
            .unwrap_or_default();
        Box::new(children.iter().filter_map(|&id| self.node(id)))
    }
}
