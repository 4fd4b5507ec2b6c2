//! Trellis - headless table collections.
//!
//! Trellis turns a tree of typed nodes (columns, column groups, a body,
//! sections, rows and cells) into a flat, indexed and linked collection a
//! renderer and a keyboard/selection layer can consume directly.
//!
//! # Core Types
//!
//! - `Node`: The caller's input tree, built with a fluent API
//! - `TableCollection`: The built table; header rows, leaf columns, body rows
//! - `GridCollection`: The indexed row/cell base a table builds on
//! - `Collection`: The key-based navigation contract
//! - `CollectionOptions`: Selection checkbox and drag handle columns
//! - `GridNode`: A node as it appears in a built collection
//!
//! # Example
//!
//! ```
//! use trellis::{Collection, CollectionOptions, Key, Node, TableCollection};
//!
//! let tree = vec![
//!     Node::column("name").with_text("Name"),
//!     Node::column("email").with_text("Email"),
//!     Node::body("body").with_child(
//!         Node::item("ada")
//!             .with_child(Node::cell("ada-name").with_text("Ada"))
//!             .with_child(Node::cell("ada-email").with_text("ada@example.com")),
//!     ),
//! ];
//!
//! let options = CollectionOptions::new().with_selection_checkboxes(true);
//! let table = TableCollection::<()>::try_new(tree, None, options)?;
//!
//! // The checkbox column comes first; the first data column labels rows.
//! assert_eq!(table.column_count(), 3);
//! assert!(table.row_header_column_keys().contains(&Key::from("name")));
//! assert_eq!(table.get_first_key(), Some(&Key::from("ada")));
//! # Ok::<(), trellis::Error>(())
//! ```
//!
//! # Architecture Overview
//!
//! ```text
//! Node tree ──> classify ──> leaf columns ──> header layout ──> header rows
//!                  │                                               │
//!                  └──────> body rows ──────────────┬──────────────┘
//!                                                   v
//!                                            GridCollection
//!                                                   │
//!                                            TableCollection
//! ```

mod arena;
mod classify;
pub mod debug;
mod grid;
mod header;
mod node;
mod options;
mod table;
mod traits;

pub use arena::{GridNode, NodeArena, NodeId};
pub use classify::{Classification, classify};
pub use grid::GridCollection;
pub use header::build_header_rows;
pub use node::Node;
pub use options::CollectionOptions;
pub use table::{Rows, TableCollection};
pub use traits::Collection;
pub use trellis_core::{
    ColumnRole, Error, Key, NodeKind, PerfSpan, RESERVED_PREFIX, Result, SyntheticKey, logging,
};
