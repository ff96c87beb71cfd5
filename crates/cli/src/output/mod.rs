//! Output formatting utilities
//!
//! This module provides the formatter for CLI output in both human-readable
//! and JSON formats, and the rendering of probe outcomes.

mod formatter;
mod report;

pub use formatter::Formatter;
pub use report::{ErrorOutput, FoundOutput, failure_lines, success_lines};

/// Output configuration derived from CLI flags
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Use JSON output format
    pub json: bool,
    /// Disable colored output
    pub no_color: bool,
    /// Suppress non-error output
    pub quiet: bool,
}
