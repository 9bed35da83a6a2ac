//! User interface module - progress reporting and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - The console [`Reporter`] used by the binary

use std::path::PathBuf;

use crate::planner::{Reporter, StepReport};
use crate::warning::RunWarning;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_run_header, display_status, display_step, display_success,
    display_summary, display_warning,
};

/// Prints warnings and per-file results as soon as each step finishes.
pub struct ConsoleReporter {
    root: PathBuf,
}

impl ConsoleReporter {
    /// Paths in the report are shown relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ConsoleReporter { root: root.into() }
    }
}

impl Reporter for ConsoleReporter {
    fn warning(&mut self, warning: &RunWarning) {
        display_warning(warning);
    }

    fn step(&mut self, step: &StepReport) {
        display_step(step, &self.root);
    }
}
