//! Header row layout.
//!
//! Turns a list of leaf columns, each linked to its column groups through
//! `parent_key`, into a rectangular grid of header rows. A group spanning
//! N leaf columns appears once with `colspan` N; gaps are filled with
//! placeholder cells so every row covers exactly the leaf-column count.
//!
//! # Algorithm
//!
//! Each leaf column gets a *chain*: a bottom-up list of slots where slot 0
//! is the leaf and slot `d` is the header level `d` rows above the bottom.
//! Walking up a leaf's ancestors:
//!
//! - an ancestor seen for the first time is pushed onto the current chain;
//! - an ancestor already placed by an earlier leaf gets its `colspan`
//!   bumped, and if it sits lower than the current leaf's path requires, the
//!   chain holding it is padded with empty slots so it (and the groups above
//!   it) move up.
//!
//! Every group therefore ends up strictly above all of its descendants.
//! Chains are then transposed into rows, leaf columns in the bottom row,
//! with placeholders inserted wherever a row falls behind.
//!
//! ```text
//!   leaf chains             header rows
//!
//!   [a, group]              | group (2)   | _ (1) |
//!   [b]                     | a | b       | c     |
//!   [c]
//! ```

use std::collections::{HashMap, HashSet};

use trellis_core::logging::{span_names, targets};
use trellis_core::{Key, NodeKind, PerfSpan};

use crate::arena::{GridNode, NodeArena, NodeId, link};

/// Bottom-up header slots for one leaf column. Empty slots are `None`.
type Chain = Vec<Option<NodeId>>;

/// Where an ancestor was first placed.
#[derive(Debug, Clone, Copy)]
struct Seen {
    chain: usize,
    level: usize,
}

/// Builds the header rows for `leaf_columns`.
///
/// `column_index` resolves parent keys to column groups. Computed spans,
/// levels, column indices and sibling links are written onto the arena's
/// nodes; placeholder and header-row nodes are inserted into it. Returns
/// the header rows, top row first. No leaf columns means no header rows.
pub fn build_header_rows<T>(
    arena: &mut NodeArena<T>,
    column_index: &HashMap<Key, NodeId>,
    leaf_columns: &[NodeId],
) -> Vec<NodeId> {
    if leaf_columns.is_empty() {
        return Vec::new();
    }

    let _span = PerfSpan::new(span_names::HEADER_LAYOUT);
    let chains = build_chains(arena, column_index, leaf_columns);
    let rows = place_chains(arena, &chains, leaf_columns.len());

    tracing::debug!(
        target: targets::HEADER,
        leaf_columns = leaf_columns.len(),
        header_rows = rows.len(),
        "built header rows"
    );

    rows.into_iter()
        .enumerate()
        .map(|(index, cells)| {
            let mut row = GridNode::synthetic(NodeKind::HeaderRow, Key::header_row(index));
            row.index = Some(index);
            row.child_ids = cells;
            arena.insert(row)
        })
        .collect()
}

fn build_chains<T>(
    arena: &mut NodeArena<T>,
    column_index: &HashMap<Key, NodeId>,
    leaf_columns: &[NodeId],
) -> Vec<Chain> {
    let leaves: HashSet<NodeId> = leaf_columns.iter().copied().collect();
    let mut chains: Vec<Chain> = Vec::with_capacity(leaf_columns.len());
    let mut seen: HashMap<NodeId, Seen> = HashMap::new();

    for (position, &leaf) in leaf_columns.iter().enumerate() {
        let current = chains.len();
        let mut chain: Chain = vec![Some(leaf)];
        let mut path = HashSet::from([leaf]);
        // Lowest level the next ancestor on this path may occupy.
        let mut required = 1;

        arena[leaf].index = Some(position);
        let mut parent_key = arena[leaf].parent_key.clone();

        while let Some(key) = parent_key.take() {
            let Some(&parent) = column_index.get(&key) else {
                tracing::trace!(target: targets::HEADER, %key, "unresolved parent key, chain stops");
                break;
            };
            if leaves.contains(&parent) {
                tracing::warn!(target: targets::HEADER, %key, "parent key names a leaf column, chain stops");
                break;
            }
            if !path.insert(parent) {
                tracing::warn!(target: targets::HEADER, %key, "cyclic parent keys, chain stops");
                break;
            }

            match seen.get(&parent).copied() {
                Some(Seen { chain: other, level }) => {
                    arena[parent].colspan += 1;
                    if level < required {
                        lift(&mut chains[other], &mut seen, level, required);
                    }
                    required = level.max(required) + 1;
                }
                None => {
                    chain.resize(required.max(chain.len()), None);
                    let level = chain.len();
                    chain.push(Some(parent));
                    seen.insert(parent, Seen { chain: current, level });
                    arena[parent].colspan = 1;
                    required = level + 1;
                }
            }

            parent_key = arena[parent].parent_key.clone();
        }

        chains.push(chain);
    }

    chains
}

/// Pads `chain` with empty slots so the entry at `level` moves to `required`.
///
/// Everything above the entry moves up by the same amount and has its
/// recorded level updated.
fn lift(chain: &mut Chain, seen: &mut HashMap<NodeId, Seen>, level: usize, required: usize) {
    chain.splice(level..level, std::iter::repeat_n(None, required - level));
    for (slot, entry) in chain.iter().enumerate().skip(required) {
        if let Some(record) = entry.and_then(|id| seen.get_mut(&id)) {
            record.level = slot;
        }
    }
}

/// Transposes chains into rows of cells, top row first.
fn place_chains<T>(arena: &mut NodeArena<T>, chains: &[Chain], width: usize) -> Vec<Vec<NodeId>> {
    let height = chains.iter().map(Vec::len).max().unwrap_or(0);
    let mut rows: Vec<Vec<NodeId>> = vec![Vec::new(); height];
    let mut widths = vec![0usize; height];

    for (col_index, chain) in chains.iter().enumerate() {
        for (level, entry) in chain.iter().enumerate() {
            let Some(id) = *entry else { continue };
            let row = height - 1 - level;

            if widths[row] < col_index {
                let gap = col_index - widths[row];
                push_placeholder(arena, &mut rows[row], row, widths[row], gap);
                widths[row] = col_index;
            } else if widths[row] > col_index {
                tracing::warn!(
                    target: targets::HEADER,
                    key = %arena[id].key,
                    row,
                    col_index,
                    "header cell overlaps a wider group; parent keys contradict column order"
                );
            }

            if let Some(&last) = rows[row].last() {
                link(arena, last, id);
            }
            let node = &mut arena[id];
            node.level = row;
            node.col_index = Some(col_index);
            widths[row] += node.colspan;
            rows[row].push(id);
        }
    }

    for (row, cells) in rows.iter_mut().enumerate() {
        if widths[row] < width {
            push_placeholder(arena, cells, row, widths[row], width - widths[row]);
        }
    }

    rows
}

fn push_placeholder<T>(
    arena: &mut NodeArena<T>,
    cells: &mut Vec<NodeId>,
    row: usize,
    col: usize,
    colspan: usize,
) {
    let mut node = GridNode::synthetic(NodeKind::Placeholder, Key::placeholder(row, col));
    node.colspan = colspan;
    node.index = Some(col);
    node.col_index = Some(col);
    node.level = row;
    let id = arena.insert(node);

    tracing::trace!(target: targets::HEADER, row, col, colspan, "placeholder");
    if let Some(&last) = cells.last() {
        link(arena, last, id);
    }
    cells.push(id);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds columns from `(key, parent)` pairs and lays out `leaves`.
    fn layout(columns: &[(&str, Option<&str>)], leaves: &[&str]) -> (NodeArena<()>, Vec<NodeId>) {
        let mut arena = NodeArena::with_key();
        let mut index = HashMap::new();
        for &(key, parent) in columns {
            let mut node = GridNode::synthetic(NodeKind::Column, Key::from(key));
            node.parent_key = parent.map(Key::from);
            index.insert(Key::from(key), arena.insert(node));
        }
        let leaf_ids: Vec<_> = leaves.iter().map(|k| index[&Key::from(*k)]).collect();
        let rows = build_header_rows(&mut arena, &index, &leaf_ids);
        (arena, rows)
    }

    /// Renders rows as `(label, colspan)`, placeholders as `_`.
    fn describe(arena: &NodeArena<()>, rows: &[NodeId]) -> Vec<Vec<(String, usize)>> {
        rows.iter()
            .map(|&row| {
                arena[row]
                    .child_ids()
                    .iter()
                    .map(|&id| {
                        let node = &arena[id];
                        let label = match node.kind() {
                            NodeKind::Placeholder => "_".to_string(),
                            _ => node.key().to_string(),
                        };
                        (label, node.colspan())
                    })
                    .collect()
            })
            .collect()
    }

    fn row(cells: &[(&str, usize)]) -> Vec<(String, usize)> {
        cells.iter().map(|&(k, s)| (k.to_string(), s)).collect()
    }

    #[test]
    fn test_empty_input() {
        let (arena, rows) = layout(&[], &[]);
        assert!(rows.is_empty());
        assert!(arena.is_empty());
    }

    #[test]
    fn test_flat_columns() {
        let (arena, rows) = layout(&[("a", None), ("b", None)], &["a", "b"]);
        assert_eq!(describe(&arena, &rows), vec![row(&[("a", 1), ("b", 1)])]);

        let header = &arena[rows[0]];
        assert_eq!(header.kind(), NodeKind::HeaderRow);
        assert_eq!(header.key(), &Key::header_row(0));
        assert_eq!(header.index(), Some(0));
        assert_eq!(header.level(), 0);
    }

    #[test]
    fn test_shared_parent() {
        let (arena, rows) = layout(
            &[("group", None), ("a", Some("group")), ("b", Some("group"))],
            &["a", "b"],
        );
        assert_eq!(
            describe(&arena, &rows),
            vec![row(&[("group", 2)]), row(&[("a", 1), ("b", 1)])]
        );
    }

    #[test]
    fn test_trailing_placeholder() {
        let (arena, rows) = layout(
            &[
                ("group", None),
                ("a", Some("group")),
                ("b", Some("group")),
                ("c", None),
            ],
            &["a", "b", "c"],
        );
        assert_eq!(
            describe(&arena, &rows),
            vec![
                row(&[("group", 2), ("_", 1)]),
                row(&[("a", 1), ("b", 1), ("c", 1)]),
            ]
        );

        let placeholder = &arena[arena[rows[0]].child_ids()[1]];
        assert_eq!(placeholder.key(), &Key::placeholder(0, 2));
        assert_eq!(placeholder.index(), Some(2));
        assert_eq!(placeholder.prev_key(), Some(&Key::from("group")));
        assert_eq!(arena[arena[rows[0]].child_ids()[0]].next_key(), Some(placeholder.key()));
    }

    #[test]
    fn test_leading_placeholder() {
        let (arena, rows) = layout(
            &[
                ("a", None),
                ("group", None),
                ("b", Some("group")),
                ("c", Some("group")),
            ],
            &["a", "b", "c"],
        );
        assert_eq!(
            describe(&arena, &rows),
            vec![
                row(&[("_", 1), ("group", 2)]),
                row(&[("a", 1), ("b", 1), ("c", 1)]),
            ]
        );
        let group = &arena[arena[rows[0]].child_ids()[1]];
        assert_eq!(group.col_index(), Some(1));
        assert_eq!(group.level(), 0);
    }

    #[test]
    fn test_placeholder_on_both_sides_has_distinct_keys() {
        let (arena, rows) = layout(
            &[("a", None), ("group", None), ("b", Some("group")), ("c", None)],
            &["a", "b", "c"],
        );
        assert_eq!(
            describe(&arena, &rows)[0],
            row(&[("_", 1), ("group", 1), ("_", 1)])
        );
        let cells = arena[rows[0]].child_ids();
        assert_ne!(arena[cells[0]].key(), arena[cells[2]].key());
    }

    #[test]
    fn test_shorter_chain_under_taller_group() {
        // group -> inner -> a, and b directly under group.
        let (arena, rows) = layout(
            &[
                ("group", None),
                ("inner", Some("group")),
                ("a", Some("inner")),
                ("b", Some("group")),
            ],
            &["a", "b"],
        );
        assert_eq!(
            describe(&arena, &rows),
            vec![
                row(&[("group", 2)]),
                row(&[("inner", 1), ("_", 1)]),
                row(&[("a", 1), ("b", 1)]),
            ]
        );
    }

    #[test]
    fn test_taller_chain_lifts_shared_group() {
        // a directly under group, b under inner under group.
        let (arena, rows) = layout(
            &[
                ("group", None),
                ("a", Some("group")),
                ("inner", Some("group")),
                ("b", Some("inner")),
            ],
            &["a", "b"],
        );
        assert_eq!(
            describe(&arena, &rows),
            vec![
                row(&[("group", 2)]),
                row(&[("_", 1), ("inner", 1)]),
                row(&[("a", 1), ("b", 1)]),
            ]
        );
    }

    #[test]
    fn test_deep_uneven_groups_stay_rectangular() {
        // g: [l0, s: [l1, t: [u: [l2]]]]
        let (arena, rows) = layout(
            &[
                ("g", None),
                ("l0", Some("g")),
                ("s", Some("g")),
                ("l1", Some("s")),
                ("t", Some("s")),
                ("u", Some("t")),
                ("l2", Some("u")),
            ],
            &["l0", "l1", "l2"],
        );
        assert_eq!(
            describe(&arena, &rows),
            vec![
                row(&[("g", 3)]),
                row(&[("_", 1), ("s", 2)]),
                row(&[("_", 2), ("t", 1)]),
                row(&[("_", 2), ("u", 1)]),
                row(&[("l0", 1), ("l1", 1), ("l2", 1)]),
            ]
        );
    }

    #[test]
    fn test_every_ancestor_counts_every_leaf() {
        // outer: [g: [a, h: [b, c]]]
        let (arena, rows) = layout(
            &[
                ("outer", None),
                ("g", Some("outer")),
                ("a", Some("g")),
                ("h", Some("g")),
                ("b", Some("h")),
                ("c", Some("h")),
            ],
            &["a", "b", "c"],
        );
        assert_eq!(
            describe(&arena, &rows),
            vec![
                row(&[("outer", 3)]),
                row(&[("g", 3)]),
                row(&[("_", 1), ("h", 2)]),
                row(&[("a", 1), ("b", 1), ("c", 1)]),
            ]
        );
    }

    #[test]
    fn test_unresolved_parent_truncates_chain() {
        let (arena, rows) = layout(
            &[("group", None), ("a", Some("missing")), ("b", Some("group"))],
            &["a", "b"],
        );
        assert_eq!(
            describe(&arena, &rows),
            vec![row(&[("_", 1), ("group", 1)]), row(&[("a", 1), ("b", 1)])]
        );
    }

    #[test]
    fn test_cyclic_parents_terminate() {
        let (arena, rows) = layout(
            &[("x", Some("y")), ("y", Some("x")), ("a", Some("x"))],
            &["a"],
        );
        assert_eq!(
            describe(&arena, &rows),
            vec![row(&[("y", 1)]), row(&[("x", 1)]), row(&[("a", 1)])]
        );
    }

    #[test]
    fn test_parent_naming_a_leaf_is_ignored() {
        let (arena, rows) = layout(&[("a", None), ("b", Some("a"))], &["a", "b"]);
        assert_eq!(describe(&arena, &rows), vec![row(&[("a", 1), ("b", 1)])]);
    }

    #[test]
    fn test_leaf_positions_and_levels() {
        let (arena, rows) = layout(
            &[("group", None), ("a", Some("group")), ("b", None)],
            &["a", "b"],
        );
        let bottom = arena[rows[1]].child_ids();
        for (position, &id) in bottom.iter().enumerate() {
            assert_eq!(arena[id].index(), Some(position));
            assert_eq!(arena[id].col_index(), Some(position));
            assert_eq!(arena[id].level(), 1);
        }
    }
}
