//! Text rendering of built tables.
//!
//! [`GridDebug`] draws a [`TableCollection`]'s header grid and body rows as
//! plain text. It is meant for logs, test failure messages and quick
//! inspection of how a column tree was laid out.
//!
//! ```
//! use trellis::debug::{GridDebug, GridFormatOptions, GridStyle};
//! use trellis::{CollectionOptions, Node, TableCollection};
//!
//! let table = TableCollection::<()>::new(
//!     vec![
//!         Node::column("group")
//!             .with_child(Node::column("a"))
//!             .with_child(Node::column("b")),
//!         Node::column("c"),
//!         Node::body("body"),
//!     ],
//!     None,
//!     CollectionOptions::default(),
//! );
//!
//! let debug = GridDebug::with_options(GridFormatOptions::new().with_style(GridStyle::Compact));
//! assert_eq!(debug.format_header(&table), "group*2 _\na b c\n");
//! ```

use trellis_core::{ColumnRole, NodeKind};

use crate::arena::GridNode;
use crate::table::TableCollection;

/// Drawing style for [`GridDebug`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridStyle {
    /// Fixed-width cells framed with `|`, spans merged.
    #[default]
    Ascii,
    /// Space separated labels; spans shown as `*N`, placeholders as `_`.
    Compact,
}

/// Options for [`GridDebug`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridFormatOptions {
    /// Drawing style.
    pub style: GridStyle,
    /// Width of a single leaf column in [`GridStyle::Ascii`].
    pub cell_width: usize,
    /// Maximum number of body rows to render.
    pub max_rows: Option<usize>,
}

impl Default for GridFormatOptions {
    fn default() -> Self {
        Self {
            style: GridStyle::default(),
            cell_width: 8,
            max_rows: None,
        }
    }
}

impl GridFormatOptions {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the drawing style.
    pub fn with_style(mut self, style: GridStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the leaf column width. Clamped to at least one character.
    pub fn with_cell_width(mut self, width: usize) -> Self {
        self.cell_width = width.max(1);
        self
    }

    /// Limits how many body rows are rendered.
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }
}

/// Renders tables as text.
#[derive(Debug, Clone, Default)]
pub struct GridDebug {
    options: GridFormatOptions,
}

impl GridDebug {
    /// Creates a renderer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a renderer with custom options.
    pub fn with_options(options: GridFormatOptions) -> Self {
        Self { options }
    }

    /// Renders the header grid followed by the body rows.
    pub fn format<T>(&self, table: &TableCollection<T>) -> String {
        let mut output = self.format_header(table);
        if self.options.style == GridStyle::Ascii && table.header_rows().len() > 0 {
            output.push_str(&self.rule(table.column_count()));
        }
        output.push_str(&self.format_body(table));
        output
    }

    /// Renders only the header rows, one line per row.
    pub fn format_header<T>(&self, table: &TableCollection<T>) -> String {
        let mut output = String::new();
        for row in table.header_rows() {
            let cells = table
                .children_of(row)
                .filter(|cell| cell.kind().is_header_cell())
                .map(|cell| (header_label(cell), cell.colspan()));
            output.push_str(&self.line(cells));
        }
        output
    }

    /// Renders only the body rows.
    ///
    /// Sections print their label on a line of their own, with their rows
    /// indented beneath.
    pub fn format_body<T>(&self, table: &TableCollection<T>) -> String {
        let mut output = String::new();
        let mut remaining = self.options.max_rows.unwrap_or(usize::MAX);

        for node in table {
            if remaining == 0 {
                break;
            }
            match node.kind() {
                NodeKind::Section => {
                    output.push_str(&format!("{}:\n", body_label(node)));
                    for item in table.children_of(node).filter(|n| n.kind() == NodeKind::Item) {
                        if remaining == 0 {
                            break;
                        }
                        output.push_str("  ");
                        output.push_str(&self.body_row(table, item));
                        remaining -= 1;
                    }
                }
                _ => {
                    output.push_str(&self.body_row(table, node));
                    remaining -= 1;
                }
            }
        }

        if self.options.max_rows.is_some() && remaining == 0 && output.lines().count() < table_line_count(table) {
            output.push_str("...\n");
        }
        output
    }

    fn body_row<T>(&self, table: &TableCollection<T>, row: &GridNode<T>) -> String {
        let cells = table
            .children_of(row)
            .filter(|cell| cell.kind() == NodeKind::Cell)
            .map(|cell| (body_label(cell), cell.colspan()));
        self.line(cells)
    }

    fn line(&self, cells: impl Iterator<Item = (String, usize)>) -> String {
        let mut line = String::new();
        match self.options.style {
            GridStyle::Ascii => {
                line.push('|');
                for (label, colspan) in cells {
                    // Merged cells swallow the separators between their columns.
                    let width = self.options.cell_width * colspan + 3 * (colspan - 1);
                    let label: String = label.chars().take(width).collect();
                    line.push_str(&format!(" {label:<width$} |"));
                }
            }
            GridStyle::Compact => {
                let parts: Vec<String> = cells
                    .map(|(label, colspan)| {
                        let label = if label.is_empty() { "_".to_string() } else { label };
                        match colspan {
                            1 => label,
                            n => format!("{label}*{n}"),
                        }
                    })
                    .collect();
                line.push_str(&parts.join(" "));
            }
        }
        line.push('\n');
        line
    }

    fn rule(&self, column_count: usize) -> String {
        let mut rule = String::from("|");
        for _ in 0..column_count {
            rule.push_str(&"-".repeat(self.options.cell_width + 2));
            rule.push('|');
        }
        rule.push('\n');
        rule
    }
}

/// Number of lines a full body rendering takes.
fn table_line_count<T>(table: &TableCollection<T>) -> usize {
    table
        .iter()
        .map(|node| match node.kind() {
            NodeKind::Section => {
                1 + table
                    .children_of(node)
                    .filter(|n| n.kind() == NodeKind::Item)
                    .count()
            }
            _ => 1,
        })
        .sum()
}

fn header_label<T>(node: &GridNode<T>) -> String {
    match node.kind() {
        NodeKind::Placeholder => String::new(),
        _ => match node.role() {
            ColumnRole::SelectionCell => "[ ]".to_string(),
            ColumnRole::DragButtonCell => "::".to_string(),
            _ => text_of(node),
        },
    }
}

fn body_label<T>(node: &GridNode<T>) -> String {
    match node.role() {
        ColumnRole::SelectionCell => "[ ]".to_string(),
        ColumnRole::DragButtonCell => "::".to_string(),
        _ => text_of(node),
    }
}

/// Rendered label, then text value, then the key.
fn text_of<T>(node: &GridNode<T>) -> String {
    if let Some(rendered) = node.rendered() {
        return rendered.to_string();
    }
    if !node.text_value().is_empty() {
        return node.text_value().to_string();
    }
    node.key().to_string()
}
