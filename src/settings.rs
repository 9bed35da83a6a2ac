use crate::config;
use crate::domain::Version;
use crate::error::{Result, UpversionError};
use crate::replacer::ReplaceMode;
use crate::worktree;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const OLD_VERSION_VAR: &str = "OLD_VERSION";
pub const NEW_VERSION_VAR: &str = "NEW_VERSION";
pub const OLD_YEAR_VAR: &str = "OLD_YEAR";
pub const NEW_YEAR_VAR: &str = "NEW_YEAR";
pub const ROOT_VAR: &str = "UPVERSION_ROOT";
pub const CONFIG_VAR: &str = "UPVERSION_CONFIG";

pub const DEFAULT_OLD_VERSION: &str = "1.0.0";
pub const DEFAULT_NEW_VERSION: &str = "2.0.0";
pub const DEFAULT_OLD_YEAR: &str = "2006-2024";
pub const DEFAULT_NEW_YEAR: &str = "2006-2024";

/// Values given on the command line, taking precedence over the environment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub dry_run: bool,
}

/// Everything a run needs, resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub old_version: Version,
    pub new_version: Version,
    pub old_year: String,
    pub new_year: String,
    pub config_path: PathBuf,
    pub root: PathBuf,
    pub mode: ReplaceMode,
}

impl Settings {
    /// Resolves settings from the process environment.
    pub fn from_env(overrides: &Overrides) -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| UpversionError::filesystem(".", e))?;
        Self::from_lookup(|key| std::env::var(key).ok(), overrides, &cwd)
    }

    /// Resolves settings from an arbitrary variable lookup.
    ///
    /// Empty variables count as unset. Relative paths are taken relative to
    /// `cwd`. The repository root is, in order: the override, `UPVERSION_ROOT`,
    /// the git working tree enclosing `cwd`, `cwd` itself. A repository that
    /// git refuses to open is treated like no repository.
    pub fn from_lookup<F>(lookup: F, overrides: &Overrides, cwd: &Path) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let var_or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        let old_version = Version::parse(&var_or(OLD_VERSION_VAR, DEFAULT_OLD_VERSION))?;
        let new_version = Version::parse(&var_or(NEW_VERSION_VAR, DEFAULT_NEW_VERSION))?;

        let root = match overrides
            .root
            .clone()
            .or_else(|| var(ROOT_VAR).map(PathBuf::from))
        {
            Some(root) => cwd.join(root),
            None => match worktree::discover_root(cwd) {
                Ok(found) => found.unwrap_or_else(|| cwd.to_path_buf()),
                Err(e) => {
                    warn!(cwd = %cwd.display(), error = %e, "git discovery failed, using cwd");
                    cwd.to_path_buf()
                }
            },
        };
        if !root.is_dir() {
            return Err(UpversionError::filesystem(
                root,
                io::Error::new(io::ErrorKind::NotFound, "repository root is not a directory"),
            ));
        }

        let config_path = match overrides
            .config
            .clone()
            .or_else(|| var(CONFIG_VAR).map(PathBuf::from))
        {
            Some(path) => cwd.join(path),
            None => config::find_config(&root).ok_or_else(|| {
                UpversionError::config(format!(
                    "no {} found under '{}'; pass --config or set {}",
                    config::CONFIG_FILE_NAME,
                    root.display(),
                    CONFIG_VAR
                ))
            })?,
        };

        Ok(Settings {
            old_version,
            new_version,
            old_year: var_or(OLD_YEAR_VAR, DEFAULT_OLD_YEAR),
            new_year: var_or(NEW_YEAR_VAR, DEFAULT_NEW_YEAR),
            config_path,
            root,
            mode: if overrides.dry_run {
                ReplaceMode::DryRun
            } else {
                ReplaceMode::Write
            },
        })
    }
}
