//! Main application modules.
//!
//! This module provides query input reading, result panel rendering, and
//! statistics printing used by the CLI run loop.

pub mod input;
pub mod panel;
pub mod statistics;

// Re-export public API
pub use input::read_queries;
pub use panel::{render_panel, render_panel_plain};
pub use statistics::{lookup_statistics_lines, print_lookup_statistics, summary_line};
