//! Glob-driven, counted regex substitution over files.
//!
//! Files are handled as raw bytes with [`regex::bytes::Regex`], so content
//! that is not valid UTF-8 is carried through a substitution untouched.
//! A file with no match is never rewritten.

use crate::error::{Result, UpversionError};
use globset::GlobBuilder;
use ignore::WalkBuilder;
use regex::bytes::Regex;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Whether matched files are rewritten or only counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplaceMode {
    #[default]
    Write,
    DryRun,
}

/// Result of applying one substitution to one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// Number of replacements; 0 means the file was skipped
    pub count: usize,
    /// Whether new contents were written to disk
    pub written: bool,
}

impl FileOutcome {
    pub fn is_skip(&self) -> bool {
        self.count == 0
    }
}

/// Applies `search` -> `replacement` to every file under `root` matching
/// `glob`.
///
/// `replacement` is a regex replacement template: `$1`/`${1}` expand to
/// capture groups and `$$` is a literal dollar sign.
///
/// # Returns
/// * `Ok(outcomes)` - One entry per matched file, in path order. Empty when
///   the glob matched nothing.
/// * `Err` - If `root` is missing, the glob is invalid, or any file cannot be
///   read or written. Files handled before the failure keep their changes.
pub fn replace(
    root: &Path,
    glob: &str,
    search: &Regex,
    replacement: &str,
    mode: ReplaceMode,
) -> Result<Vec<FileOutcome>> {
    let files = resolve_glob(root, glob)?;
    debug!(glob, matched = files.len(), "resolved glob");

    files
        .into_iter()
        .map(|path| replace_in_file(&path, search, replacement, mode))
        .collect()
}

/// Applies a substitution to a single file.
pub fn replace_in_file(
    path: &Path,
    search: &Regex,
    replacement: &str,
    mode: ReplaceMode,
) -> Result<FileOutcome> {
    let contents = fs::read(path).map_err(|e| UpversionError::filesystem(path, e))?;
    let (updated, count) = replace_bytes(&contents, search, replacement);

    let written = count > 0 && mode == ReplaceMode::Write;
    if written {
        fs::write(path, &updated).map_err(|e| UpversionError::filesystem(path, e))?;
    }
    debug!(path = %path.display(), count, written, "substitution applied");

    Ok(FileOutcome {
        path: path.to_path_buf(),
        count,
        written,
    })
}

/// Replaces every non-overlapping match of `search` in `contents`.
///
/// Returns the new contents together with the number of replacements made.
/// When nothing matches the input is returned borrowed.
pub fn replace_bytes<'a>(
    contents: &'a [u8],
    search: &Regex,
    replacement: &str,
) -> (Cow<'a, [u8]>, usize) {
    let count = search.find_iter(contents).count();
    if count == 0 {
        return (Cow::Borrowed(contents), 0);
    }
    (search.replace_all(contents, replacement.as_bytes()), count)
}

/// Resolves a glob relative to `root` into a sorted list of regular files.
///
/// `*`, `?`, `[..]` and `{a,b}` stay within one path component while `**`
/// spans directories. Ignore files are not consulted and hidden files are
/// included, as with a plain filesystem glob.
pub fn resolve_glob(root: &Path, glob: &str) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(UpversionError::filesystem(
            root,
            io::Error::new(io::ErrorKind::NotFound, "repository root is not a directory"),
        ));
    }

    let glob = glob.trim_start_matches("./");
    if Path::new(glob)
        .components()
        .any(|c| matches!(c, Component::RootDir | Component::Prefix(_)))
    {
        return Err(UpversionError::config(format!(
            "glob '{}' must be relative to the repository root",
            glob
        )));
    }

    let matcher = GlobBuilder::new(glob)
        .literal_separator(true)
        .build()?
        .compile_matcher();

    let (prefix, has_wildcard) = literal_prefix(glob);
    let base = root.join(&prefix);

    if !has_wildcard {
        return Ok(if base.is_file() { vec![base] } else { Vec::new() });
    }
    if !base.is_dir() {
        return Ok(Vec::new());
    }

    let walker = WalkBuilder::new(&base)
        .standard_filters(false)
        .hidden(false)
        .follow_links(false)
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            UpversionError::filesystem(&base, io::Error::new(io::ErrorKind::Other, e.to_string()))
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        if matcher.is_match(relative) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

/// Splits off the leading path components that contain no glob syntax.
///
/// Returns the literal directory prefix and whether any wildcard component
/// follows it. A fully literal glob returns the whole path.
fn literal_prefix(glob: &str) -> (PathBuf, bool) {
    let mut prefix = PathBuf::new();
    for component in glob.split('/') {
        if component.contains(['*', '?', '[', '{']) {
            return (prefix, true);
        }
        if !component.is_empty() {
            prefix.push(component);
        }
    }
    (prefix, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_prefix() {
        assert_eq!(
            literal_prefix("client/src/*.h"),
            (PathBuf::from("client/src"), true)
        );
        assert_eq!(literal_prefix("**/*.rc"), (PathBuf::new(), true));
        assert_eq!(
            literal_prefix("CMakeLists.txt"),
            (PathBuf::from("CMakeLists.txt"), false)
        );
        assert_eq!(
            literal_prefix("a/{b,c}/d.txt"),
            (PathBuf::from("a"), true)
        );
    }

    #[test]
    fn test_replace_bytes_counts_all_occurrences() {
        let re = Regex::new(r"1\.0\.0").unwrap();
        let (out, count) = replace_bytes(b"v1.0.0 and 1.0.0!", &re, "2.0.0");
        assert_eq!(count, 2);
        assert_eq!(&*out, b"v2.0.0 and 2.0.0!");
    }

    #[test]
    fn test_replace_bytes_no_match_borrows() {
        let re = Regex::new("absent").unwrap();
        let (out, count) = replace_bytes(b"content", &re, "x");
        assert_eq!(count, 0);
        assert!(matches!(out, Cow::Borrowed(_)));
    }

    #[test]
    fn test_replace_bytes_preserves_invalid_utf8() {
        let re = Regex::new(r"1\.0\.0").unwrap();
        let input = b"\xff\xfe 1.0.0 \xc3\x28 end";
        let (out, count) = replace_bytes(input, &re, "2.0.0");
        assert_eq!(count, 1);
        assert_eq!(&*out, b"\xff\xfe 2.0.0 \xc3\x28 end");
    }

    #[test]
    fn test_replace_bytes_expands_captures() {
        let re = Regex::new(r"([^ ])x([^ ])").unwrap();
        let (out, count) = replace_bytes(b"(x) x", &re, "${1}y${2}");
        assert_eq!(count, 1);
        assert_eq!(&*out, b"(y) x");
    }

    #[test]
    fn test_file_outcome_skip() {
        let outcome = FileOutcome {
            path: PathBuf::from("a"),
            count: 0,
            written: false,
        };
        assert!(outcome.is_skip());
    }
}
