//! Pure formatting functions for UI output.
//!
//! `format_*` functions build plain text and are unit tested; `display_*`
//! functions add styling and print.

use console::style;
use std::path::Path;

use crate::domain::Version;
use crate::planner::{RunReport, StepReport};
use crate::replacer::FileOutcome;
use crate::warning::RunWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Format and print a non-fatal warning.
pub fn display_warning(warning: &RunWarning) {
    eprintln!("{} {}", style("WARNING:").yellow().bold(), warning);
}

/// Describe the bump about to be applied.
pub fn format_run_header(old: &Version, new: &Version, old_year: &str, new_year: &str) -> String {
    if old_year == new_year {
        format!("Updating version {} -> {}", old, new)
    } else {
        format!(
            "Updating version {} -> {}, copyright {} -> {}",
            old, new, old_year, new_year
        )
    }
}

pub fn display_run_header(old: &Version, new: &Version, old_year: &str, new_year: &str) {
    println!(
        "\n{}",
        style(format_run_header(old, new, old_year, new_year)).bold()
    );
}

/// One report line for one file.
///
/// Paths under `root` are shown relative to it.
pub fn format_file_outcome(outcome: &FileOutcome, root: &Path) -> String {
    let path = outcome.path.strip_prefix(root).unwrap_or(&outcome.path);
    let plural = if outcome.count == 1 { "" } else { "s" };

    if outcome.is_skip() {
        format!("No matches found in \"{}\", skipping...", path.display())
    } else if outcome.written {
        format!(
            "Wrote \"{}\" ({} replacement{}).",
            path.display(),
            outcome.count,
            plural
        )
    } else {
        format!(
            "Would write \"{}\" ({} replacement{}).",
            path.display(),
            outcome.count,
            plural
        )
    }
}

/// Print the heading and per-file lines of a finished step.
pub fn display_step(step: &StepReport, root: &Path) {
    println!(
        "\n{} {}",
        style(format!("[{}]", step.class)).cyan(),
        style(&step.glob).underlined()
    );
    for outcome in &step.outcomes {
        let line = format_file_outcome(outcome, root);
        if outcome.is_skip() {
            println!("  {}", style(line).dim());
        } else {
            println!("  {}", line);
        }
    }
}

/// Closing line with totals.
pub fn format_summary(report: &RunReport, dry_run: bool) -> String {
    let verb = if dry_run { "Would update" } else { "Updated" };
    let mut summary = format!(
        "{} {} file(s) with {} replacement(s)",
        verb,
        report.files_changed(),
        report.replacements()
    );
    if !report.warnings.is_empty() {
        summary.push_str(&format!(", {} warning(s)", report.warnings.len()));
    }
    summary
}

pub fn display_summary(report: &RunReport, dry_run: bool) {
    println!();
    display_success(&format_summary(report, dry_run));
}
