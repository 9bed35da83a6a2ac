use crate::domain::Version;
use std::fmt;
use std::path::PathBuf;

/// Conditions worth reporting that do not stop a run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunWarning {
    /// A configured glob resolved to no files at all
    NoFilesMatched { class: &'static str, glob: String },
    /// The new version does not sort after the old one
    VersionNotNewer { old: Version, new: Version },
    /// The repository has uncommitted changes and no backups are kept
    DirtyWorkingTree { paths: Vec<PathBuf> },
    /// The root is not inside a git working tree
    NotInRepository { root: PathBuf },
    /// A repository was found but could not be inspected
    RepositoryUnreadable { root: PathBuf, reason: String },
}

const DIRTY_PATHS_SHOWN: usize = 5;

impl fmt::Display for RunWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunWarning::NoFilesMatched { class, glob } => {
                write!(f, "Pattern '{}' ({}) matched no files", glob, class)
            }
            RunWarning::VersionNotNewer { old, new } => {
                if old == new {
                    write!(f, "Old and new version are both {}; nothing to bump", old)
                } else {
                    write!(f, "New version {} is older than {}", new, old)
                }
            }
            RunWarning::DirtyWorkingTree { paths } => {
                write!(
                    f,
                    "Working tree has {} uncommitted change(s); rewritten files cannot be restored from git",
                    paths.len()
                )?;
                let shown: Vec<String> = paths
                    .iter()
                    .take(DIRTY_PATHS_SHOWN)
                    .map(|p| p.display().to_string())
                    .collect();
                write!(f, " ({}", shown.join(", "))?;
                if paths.len() > DIRTY_PATHS_SHOWN {
                    write!(f, ", ... and {} more", paths.len() - DIRTY_PATHS_SHOWN)?;
                }
                write!(f, ")")
            }
            RunWarning::NotInRepository { root } => {
                write!(
                    f,
                    "'{}' is not inside a git working tree; no backups are kept",
                    root.display()
                )
            }
            RunWarning::RepositoryUnreadable { root, reason } => {
                write!(
                    f,
                    "Could not check the git working tree at '{}' ({}); no backups are kept",
                    root.display(),
                    reason
                )
            }
        }
    }
}
