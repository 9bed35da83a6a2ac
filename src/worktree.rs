//! Read-only view of the git working tree around the repository root.
//!
//! Rewrites are not backed up, so the driver uses this to locate the
//! repository root and to warn when uncommitted changes would be mixed with
//! the version bump.

use crate::error::Result;
use git2::{ErrorCode, Repository, StatusOptions};
use std::path::{Path, PathBuf};

/// Wrapper around a discovered git2 repository
pub struct WorkingTree {
    repo: Repository,
}

impl WorkingTree {
    /// Discover the repository enclosing `path`.
    ///
    /// # Returns
    /// * `Ok(Some(tree))` - `path` lies inside a non-bare repository
    /// * `Ok(None)` - No repository encloses `path`, or it is bare
    /// * `Err` - Discovery failed for another reason
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        match Repository::discover(path) {
            Ok(repo) if repo.workdir().is_some() => Ok(Some(WorkingTree { repo })),
            Ok(_) => Ok(None),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Top-level directory of the working tree
    pub fn root(&self) -> PathBuf {
        // discover() only keeps repositories that have a workdir
        self.repo
            .workdir()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    /// Tracked paths with uncommitted changes, relative to the root.
    ///
    /// Untracked and ignored files are not reported.
    pub fn dirty_paths(&self) -> Result<Vec<PathBuf>> {
        let mut options = StatusOptions::new();
        options.include_untracked(false).include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut options))?;
        let mut paths: Vec<PathBuf> = statuses
            .iter()
            .filter(|entry| !entry.status().is_empty())
            .filter_map(|entry| entry.path().map(PathBuf::from))
            .collect();
        paths.sort();

        Ok(paths)
    }
}

/// Repository root for `start`: the enclosing working tree if any.
pub fn discover_root(start: &Path) -> Result<Option<PathBuf>> {
    Ok(WorkingTree::discover(start)?.map(|tree| tree.root()))
}
