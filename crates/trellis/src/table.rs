//! Table collections.
//!
//! [`TableCollection`] is the entry point of the crate. It consumes a tree
//! of [`Node`]s, classifies it, lays out grouped column headers, adds
//! selection and drag affordance columns on request and indexes the result
//! into a key-addressed collection.
//!
//! # Example
//!
//! ```
//! use trellis::{Collection, CollectionOptions, Key, Node, TableCollection};
//!
//! let tree = vec![
//!     Node::column("contact")
//!         .with_child(Node::column("name"))
//!         .with_child(Node::column("email")),
//!     Node::column("age"),
//!     Node::body("body").with_children((0..3).map(|i| {
//!         Node::item(format!("row-{i}"))
//!             .with_child(Node::cell(format!("row-{i}-name")))
//!             .with_child(Node::cell(format!("row-{i}-email")))
//!             .with_child(Node::cell(format!("row-{i}-age")))
//!     })),
//! ];
//!
//! let table = TableCollection::<()>::new(tree, None, CollectionOptions::default());
//!
//! assert_eq!(table.header_rows().len(), 2);
//! assert_eq!(table.column_count(), 3);
//! assert_eq!(table.size(), 3);
//! assert_eq!(table.get_first_key(), Some(&Key::from("row-0")));
//! assert_eq!(table.get_key_after(&Key::from("row-0")), Some(&Key::from("row-1")));
//! ```

use std::collections::{HashMap, HashSet};

use indexmap::IndexSet;
use trellis_core::logging::{span_names, targets};
use trellis_core::{ColumnRole, Error, Key, NodeKind, PerfSpan, Result, SyntheticKey};

use crate::arena::{GridNode, NodeArena, NodeId};
use crate::classify::classify;
use crate::grid::GridCollection;
use crate::header::build_header_rows;
use crate::node::Node;
use crate::options::CollectionOptions;
use crate::traits::Collection;

/// A built table: header rows, leaf columns and indexed body rows.
///
/// A collection is immutable once built. When the tree or the options
/// change, build a new one and pass the old one as `previous`.
#[derive(Debug, Clone)]
pub struct TableCollection<T> {
    grid: GridCollection<T>,
    header_rows: Vec<NodeId>,
    columns: Vec<NodeId>,
    row_header_column_keys: IndexSet<Key>,
    body: Option<NodeId>,
    size: usize,
    generation: u64,
    options: CollectionOptions,
}

impl<T> TableCollection<T> {
    /// Builds a collection from `nodes`.
    ///
    /// This never fails. Malformed input is handled leniently: unresolved
    /// parent keys shorten header chains, duplicate keys resolve to the
    /// last node, and a tree without a body yields an empty collection.
    #[tracing::instrument(skip_all, target = "trellis::table", level = "debug")]
    pub fn new(
        nodes: impl IntoIterator<Item = Node<T>>,
        previous: Option<&Self>,
        options: CollectionOptions,
    ) -> Self {
        let _span = PerfSpan::new(span_names::BUILD);
        let generation = previous.map_or(0, |previous| previous.generation + 1);

        let mut arena = NodeArena::with_key();
        let mut columns = synthetic_columns(&mut arena, options);
        let classification = classify(&mut arena, nodes);
        columns.extend_from_slice(&classification.leaf_columns);

        if options.synthetic_column_count() > 0 {
            add_affordance_cells(&mut arena, &classification.row_nodes, options);
        }
        if classification.body.is_none() {
            tracing::warn!(target: targets::TABLE, "tree has no body node");
        }

        let mut row_header_column_keys = classification.row_header_keys;
        if row_header_column_keys.is_empty() {
            match classification.leaf_columns.first() {
                Some(&first) => {
                    row_header_column_keys.insert(arena[first].key.clone());
                }
                None => tracing::debug!(target: targets::TABLE, "no data columns, no row header"),
            }
        }

        let header_rows = build_header_rows(&mut arena, &classification.column_index, &columns);

        let mut items = header_rows.clone();
        items.extend_from_slice(&classification.row_nodes);

        let grid = GridCollection::new(arena, columns.len(), items, |node| {
            if node.kind == NodeKind::Cell {
                node.column = node.col_index.and_then(|col| columns.get(col).copied());
            }
        });
        let size = grid.rows().len() - header_rows.len();

        tracing::debug!(
            target: targets::TABLE,
            generation,
            size,
            columns = columns.len(),
            header_rows = header_rows.len(),
            "built table collection"
        );

        Self {
            grid,
            header_rows,
            columns,
            row_header_column_keys,
            body: classification.body,
            size,
            generation,
            options,
        }
    }

    /// Builds a collection after validating `nodes`.
    ///
    /// # Errors
    ///
    /// - [`Error::ReservedKey`] if a node uses a synthetic key or a string
    ///   key in the reserved namespace
    /// - [`Error::DuplicateKey`] if two nodes share a key
    /// - [`Error::BodyCount`] unless the tree has exactly one body
    /// - [`Error::CyclicParent`] if column parent keys form a cycle
    pub fn try_new(
        nodes: impl IntoIterator<Item = Node<T>>,
        previous: Option<&Self>,
        options: CollectionOptions,
    ) -> Result<Self> {
        let nodes: Vec<Node<T>> = nodes.into_iter().collect();
        validate(&nodes)?;
        Ok(Self::new(nodes, previous, options))
    }

    /// Returns the header rows, top row first.
    pub fn header_rows(&self) -> impl ExactSizeIterator<Item = &GridNode<T>> + '_ {
        self.header_rows.iter().map(|&id| &self.grid.arena()[id])
    }

    /// Returns the leaf columns, synthetic affordance columns first.
    pub fn columns(&self) -> impl ExactSizeIterator<Item = &GridNode<T>> + '_ {
        self.columns.iter().map(|&id| &self.grid.arena()[id])
    }

    /// Returns the keys of the row-header columns.
    ///
    /// When no column was flagged, this is the first non-synthetic leaf
    /// column. It is empty only when the table has no data columns.
    #[inline]
    pub fn row_header_column_keys(&self) -> &IndexSet<Key> {
        &self.row_header_column_keys
    }

    /// Returns the body node.
    pub fn body(&self) -> Option<&GridNode<T>> {
        self.body.and_then(|id| self.grid.node(id))
    }

    /// Returns the number of leaf columns, synthetic ones included.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.grid.column_count()
    }

    /// Returns every indexed row (header rows first) in display order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &GridNode<T>> + '_ {
        self.grid.rows().iter().map(|&id| &self.grid.arena()[id])
    }

    /// Returns how many builds preceded this one.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the options the collection was built with.
    #[inline]
    pub fn options(&self) -> CollectionOptions {
        self.options
    }

    /// Returns the node with the given id.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&GridNode<T>> {
        self.grid.node(id)
    }

    /// Returns the children of `node`, in order.
    pub fn children_of<'a>(&'a self, node: &'a GridNode<T>) -> impl Iterator<Item = &'a GridNode<T>> + 'a {
        node.child_ids().iter().filter_map(|&id| self.grid.node(id))
    }

    /// Iterates over the body's rows and sections.
    ///
    /// Header rows are never yielded. Each call starts from the first row.
    pub fn iter(&self) -> Rows<'_, T> {
        let ids = self.body().map(GridNode::child_ids).unwrap_or_default();
        Rows {
            collection: self,
            ids: ids.iter(),
        }
    }

    fn first_item_of<'a>(&'a self, section: &'a GridNode<T>) -> Option<&'a GridNode<T>> {
        self.children_of(section).find(|child| child.kind() == NodeKind::Item)
    }

    fn last_item_of<'a>(&'a self, section: &'a GridNode<T>) -> Option<&'a GridNode<T>> {
        self.children_of(section)
            .filter(|child| child.kind() == NodeKind::Item)
            .last()
    }
}

impl<T> Collection for TableCollection<T> {
    type Value = T;

    fn size(&self) -> usize {
        self.size
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &Key> + '_> {
        self.grid.keys()
    }

    fn get_item(&self, key: &Key) -> Option<&GridNode<T>> {
        self.grid.get_item(key)
    }

    fn get_first_key(&self) -> Option<&Key> {
        let first = self.iter().next()?;
        match first.kind() {
            NodeKind::Section => self.first_item_of(first).map(GridNode::key),
            _ => Some(first.key()),
        }
    }

    fn get_last_key(&self) -> Option<&Key> {
        let last = self.iter().last()?;
        match last.kind() {
            NodeKind::Section => self.last_item_of(last).map(GridNode::key),
            _ => Some(last.key()),
        }
    }

    fn get_children(&self, key: &Key) -> Box<dyn Iterator<Item = &GridNode<T>> + '_> {
        self.grid.get_children(key)
    }
}

/// Iterator over a table's body rows, created by [`TableCollection::iter`].
#[derive(Debug, Clone)]
pub struct Rows<'a, T> {
    collection: &'a TableCollection<T>,
    ids: std::slice::Iter<'a, NodeId>,
}

impl<'a, T> Iterator for Rows<'a, T> {
    type Item = &'a GridNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let collection = self.collection;
        self.ids.by_ref().find_map(|&id| collection.grid.node(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.ids.size_hint().1)
    }
}

impl<'a, T> IntoIterator for &'a TableCollection<T> {
    type Item = &'a GridNode<T>;
    type IntoIter = Rows<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

static_assertions::assert_impl_all!(TableCollection<String>: Send, Sync);

/// Inserts the affordance columns, drag handles first.
fn synthetic_columns<T>(arena: &mut NodeArena<T>, options: CollectionOptions) -> Vec<NodeId> {
    let mut columns = Vec::with_capacity(options.synthetic_column_count());
    if options.show_drag_buttons {
        let mut column = GridNode::synthetic(NodeKind::Column, SyntheticKey::DragButtonColumn.into());
        column.role = ColumnRole::DragButtonCell;
        columns.push(arena.insert(column));
    }
    if options.show_selection_checkboxes {
        let mut column = GridNode::synthetic(NodeKind::Column, SyntheticKey::SelectionColumn.into());
        column.role = ColumnRole::SelectionCell;
        columns.push(arena.insert(column));
    }
    columns
}

/// Gives every item leading cells for the affordance columns.
///
/// Rows that already carry a cell with the matching role are left alone.
fn add_affordance_cells<T>(arena: &mut NodeArena<T>, rows: &[NodeId], options: CollectionOptions) {
    let wanted = [
        (options.show_drag_buttons, ColumnRole::DragButtonCell),
        (options.show_selection_checkboxes, ColumnRole::SelectionCell),
    ];

    for &row in rows {
        if arena[row].kind != NodeKind::Item {
            continue;
        }
        let row_key = arena[row].key.clone();
        let mut leading = Vec::with_capacity(wanted.len());

        for (enabled, role) in wanted {
            let present = arena[row].child_ids.iter().any(|&id| arena[id].role == role);
            if !enabled || present {
                continue;
            }
            let boxed = Box::new(row_key.clone());
            let key = match role {
                ColumnRole::DragButtonCell => SyntheticKey::DragButtonCell(boxed),
                _ => SyntheticKey::SelectionCell(boxed),
            };
            let mut cell = GridNode::synthetic(NodeKind::Cell, key.into());
            cell.role = role;
            cell.parent_key = Some(row_key.clone());
            leading.push(arena.insert(cell));
        }

        if !leading.is_empty() {
            tracing::trace!(target: targets::TABLE, row = %row_key, cells = leading.len(), "affordance cells");
            leading.append(&mut arena[row].child_ids);
            arena[row].child_ids = leading;
        }
    }
}

/// Checks the invariants `try_new` promises.
fn validate<T>(nodes: &[Node<T>]) -> Result<()> {
    let mut keys: HashSet<&Key> = HashSet::new();
    let mut parents: HashMap<&Key, Option<&Key>> = HashMap::new();
    let mut columns: Vec<&Key> = Vec::new();
    let mut bodies = 0;

    let mut stack: Vec<&Node<T>> = nodes.iter().rev().collect();
    while let Some(node) = stack.pop() {
        let key = node.key();
        if key.is_reserved() {
            return Err(Error::reserved_key(key.clone()));
        }
        if !keys.insert(key) {
            return Err(Error::duplicate_key(key.clone()));
        }
        match node.kind() {
            NodeKind::Body => bodies += 1,
            NodeKind::Column => {
                parents.insert(key, node.parent_key());
                columns.push(key);
            }
            _ => {}
        }
        stack.extend(node.children().iter().rev());
    }

    if bodies != 1 {
        return Err(Error::BodyCount { count: bodies });
    }

    for start in columns {
        let mut path = HashSet::from([start]);
        let mut current = parents.get(start).copied().flatten();
        while let Some(key) = current {
            if !path.insert(key) {
                return Err(Error::cyclic_parent(key.clone()));
            }
            current = parents.get(key).copied().flatten();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys<'a, T: 'a>(nodes: impl Iterator<Item = &'a GridNode<T>>) -> Vec<String> {
        nodes.map(|node| node.key().to_string()).collect()
    }

    fn body_with_rows(count: usize) -> Node<()> {
        Node::body("body").with_children((0..count).map(|i| {
            Node::item(format!("row-{i}")).with_child(Node::cell(format!("row-{i}-a")))
        }))
    }

    #[test]
    fn test_synthetic_column_order() {
        let options = CollectionOptions::new()
            .with_selection_checkboxes(true)
            .with_drag_buttons(true);
        let table = TableCollection::new(
            vec![Node::column("a"), body_with_rows(1)],
            None,
            options,
        );

        let roles: Vec<_> = table.columns().map(GridNode::role).collect();
        assert_eq!(
            roles,
            [ColumnRole::DragButtonCell, ColumnRole::SelectionCell, ColumnRole::Data]
        );
        assert_eq!(table.column_count(), 3);
    }

    #[test]
    fn test_affordance_cells_are_added() {
        let options = CollectionOptions::new().with_selection_checkboxes(true);
        let table = TableCollection::new(
            vec![Node::column("a"), body_with_rows(1)],
            None,
            options,
        );

        let row = table.get_item(&Key::from("row-0")).unwrap();
        let cells: Vec<_> = table.children_of(row).collect();
        assert_eq!(cells.len(), 2);
        assert_eq!(
            cells[0].key(),
            &Key::from(SyntheticKey::SelectionCell(Box::new(Key::from("row-0"))))
        );
        assert_eq!(cells[0].role(), ColumnRole::SelectionCell);
        assert_eq!(cells[1].col_index(), Some(1));

        // Cells point at the column they sit under.
        let selection_column = table.columns().next().unwrap();
        let column = cells[0].column().and_then(|id| table.node(id)).unwrap();
        assert_eq!(column.key(), selection_column.key());
    }

    #[test]
    fn test_existing_affordance_cells_are_kept() {
        let body = Node::<()>::body("body").with_child(
            Node::item("row")
                .with_child(Node::cell("check").with_role(ColumnRole::SelectionCell))
                .with_child(Node::cell("value")),
        );
        let table = TableCollection::new(
            vec![Node::column("a"), body],
            None,
            CollectionOptions::new().with_selection_checkboxes(true),
        );

        let row = table.get_item(&Key::from("row")).unwrap();
        assert_eq!(keys(table.children_of(row)), ["check", "value"]);
    }

    #[test]
    fn test_validate_reserved_key() {
        let tree = vec![Node::<()>::column("__trellis:sneaky"), body_with_rows(0)];
        assert_eq!(
            validate(&tree),
            Err(Error::reserved_key("__trellis:sneaky"))
        );

        let tree = vec![
            Node::<()>::column(SyntheticKey::SelectionColumn),
            body_with_rows(0),
        ];
        assert!(matches!(validate(&tree), Err(Error::ReservedKey { .. })));
    }

    #[test]
    fn test_validate_duplicate_key() {
        let tree = vec![Node::<()>::column("a"), Node::column("a"), body_with_rows(0)];
        assert_eq!(validate(&tree), Err(Error::duplicate_key("a")));
    }

    #[test]
    fn test_validate_body_count() {
        assert_eq!(
            validate::<()>(&[Node::column("a")]),
            Err(Error::BodyCount { count: 0 })
        );
        assert_eq!(
            validate::<()>(&[Node::body("one"), Node::body("two")]),
            Err(Error::BodyCount { count: 2 })
        );
    }

    #[test]
    fn test_validate_cycle() {
        let tree = vec![
            Node::<()>::column("x").with_parent_key("y"),
            Node::column("y").with_parent_key("x"),
            body_with_rows(0),
        ];
        assert_eq!(validate(&tree), Err(Error::cyclic_parent("x")));
    }

    #[test]
    fn test_validate_accepts_well_formed_tree() {
        let tree = vec![
            Node::<()>::column("group").with_child(Node::column("a")),
            Node::column("b").with_parent_key("missing"),
            body_with_rows(2),
        ];
        assert_eq!(validate(&tree), Ok(()));
    }
}
