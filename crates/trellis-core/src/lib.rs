//! Core vocabulary for Trellis.
//!
//! This crate holds the pieces every other part of Trellis agrees on:
//!
//! - **Keys**: [`Key`] addresses nodes; [`SyntheticKey`] is the reserved
//!   namespace for nodes the engine creates
//! - **Node kinds**: [`NodeKind`] tags columns, sections, items, cells,
//!   header rows and placeholders
//! - **Column roles**: [`ColumnRole`] marks row-header and affordance columns
//! - **Errors**: [`Error`] and [`Result`] for strict construction
//! - **Logging**: tracing targets and the [`PerfSpan`] guard
//!
//! # Example
//!
//! ```
//! use trellis_core::{ColumnRole, Key, NodeKind};
//!
//! let key = Key::from("name");
//! assert!(!key.is_reserved());
//! assert!(NodeKind::Item.is_row_level());
//! assert!(ColumnRole::from_flags(true, false, false).unwrap().is_row_header());
//! ```

mod error;
mod key;
mod kind;
pub mod logging;

pub use error::{Error, Result};
pub use key::{Key, RESERVED_PREFIX, SyntheticKey};
pub use kind::{ColumnRole, NodeKind};
pub use logging::PerfSpan;
