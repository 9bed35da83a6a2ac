//! Main workflow orchestration logic
//!
//! Runs a complete version bump from resolved [`Settings`]. Kept apart from
//! `main.rs` so the workflow can be driven programmatically without clap.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::load_config;
use crate::error::{Result, UpversionError};
use crate::planner::{self, Reporter, RunReport};
use crate::replacer::ReplaceMode;
use crate::settings::Settings;
use crate::warning::RunWarning;
use crate::worktree::WorkingTree;

/// Main upversion workflow
///
/// 1. Load the configuration file
/// 2. Plan every substitution (encodings and patterns, no I/O on targets)
/// 3. Report pre-flight warnings
/// 4. Execute the plan against the repository root
///
/// # Returns
///
/// The report of every step, with pre-flight warnings ahead of those raised
/// while executing.
pub fn run_upversion(settings: &Settings, reporter: &mut dyn Reporter) -> Result<RunReport> {
    info!(
        old = %settings.old_version,
        new = %settings.new_version,
        root = %settings.root.display(),
        config = %settings.config_path.display(),
        "starting run"
    );

    let config = load_config(&settings.config_path)?;
    let steps = planner::plan(&config, settings)?;
    debug!(steps = steps.len(), "plan ready");

    let mut warnings = preflight(settings);
    for warning in &warnings {
        reporter.warning(warning);
    }

    let mut report = planner::execute(&steps, &settings.root, settings.mode, reporter)?;
    warnings.append(&mut report.warnings);
    report.warnings = warnings;

    Ok(report)
}

/// Checks that are worth a warning before files are rewritten.
///
/// The working tree is only inspected when files will actually be written.
/// Git failures are reported as warnings and never stop the run.
pub fn preflight(settings: &Settings) -> Vec<RunWarning> {
    let mut warnings = Vec::new();

    if settings.new_version <= settings.old_version {
        warnings.push(RunWarning::VersionNotNewer {
            old: settings.old_version,
            new: settings.new_version,
        });
    }

    if settings.mode == ReplaceMode::Write {
        warnings.extend(working_tree_warning(&settings.root));
    }

    warnings
}

fn working_tree_warning(root: &Path) -> Option<RunWarning> {
    let unreadable = |e: UpversionError| {
        warn!(root = %root.display(), error = %e, "working tree check failed");
        RunWarning::RepositoryUnreadable {
            root: root.to_path_buf(),
            reason: e.to_string(),
        }
    };

    let tree = match WorkingTree::discover(root) {
        Ok(Some(tree)) => tree,
        Ok(None) => {
            return Some(RunWarning::NotInRepository {
                root: root.to_path_buf(),
            })
        }
        Err(e) => return Some(unreadable(e)),
    };

    match tree.dirty_paths() {
        Ok(paths) if paths.is_empty() => None,
        Ok(paths) => Some(RunWarning::DirtyWorkingTree { paths }),
        Err(e) => Some(unreadable(e)),
    }
}
