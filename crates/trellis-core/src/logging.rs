//! Logging facilities for Trellis.
//!
//! Trellis uses the `tracing` crate for instrumentation. The library never
//! installs a subscriber; install one in your application to see output:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("trellis=debug")
//!     .init();
//! ```
//!
//! Each subsystem logs under its own target from [`targets`], so a filter
//! such as `trellis::header=trace` isolates the header layout engine.

/// Span names used throughout Trellis for tracing.
pub mod span_names {
    /// A full table collection build.
    pub const BUILD: &str = "trellis::build";
    /// Tree classification.
    pub const CLASSIFY: &str = "trellis::classify";
    /// Header row layout.
    pub const HEADER_LAYOUT: &str = "trellis::header_layout";
    /// Row indexing and key map construction.
    pub const INDEX: &str = "trellis::index";
}

/// Target names for log filtering.
pub mod targets {
    /// Tree classifier target.
    pub const CLASSIFY: &str = "trellis::classify";
    /// Header layout engine target.
    pub const HEADER: &str = "trellis::header";
    /// Base indexed collection target.
    pub const GRID: &str = "trellis::grid";
    /// Table collection target.
    pub const TABLE: &str = "trellis::table";
    /// Performance span target.
    pub const PERF: &str = "trellis::perf";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for measuring how long a build phase takes.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a performance span for `name`.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "trellis::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
