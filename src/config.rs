use crate::domain::SubstitutionClass;
use crate::error::{Result, UpversionError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File name searched for when no explicit configuration path is given.
pub const CONFIG_FILE_NAME: &str = "upversion.toml";

/// Represents the complete configuration for upversion.
///
/// Maps each glob-driven substitution class to the file patterns it applies
/// to, plus the two fixed values used by the manifest and copyright rules.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Build manifest targeted by the cmake-rc and cmake-copyright rules,
    /// relative to the repository root.
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Copyright holder appearing in plain and fancy copyright notices.
    #[serde(default = "default_copyright_holder")]
    pub copyright_holder: String,

    pub files: FilesConfig,
}

fn default_manifest() -> String {
    "CMakeLists.txt".to_string()
}

fn default_copyright_holder() -> String {
    "The Odamex Team".to_string()
}

/// The `[files]` table: one glob list per substitution class.
///
/// Every key is required so a typo in the table is caught instead of
/// silently skipping a whole class.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FilesConfig {
    pub dotted: GlobList,
    pub comma: GlobList,
    pub savestr: GlobList,
    pub configstr: GlobList,
    pub plainyear: GlobList,
    pub fancyyear: GlobList,
}

impl FilesConfig {
    /// Glob patterns configured for a class.
    ///
    /// Returns `None` for the manifest classes, which are not configurable.
    pub fn globs(&self, class: SubstitutionClass) -> Option<&[String]> {
        let list = match class {
            SubstitutionClass::Dotted => &self.dotted,
            SubstitutionClass::Comma => &self.comma,
            SubstitutionClass::Savestr => &self.savestr,
            SubstitutionClass::Configstr => &self.configstr,
            SubstitutionClass::PlainYear => &self.plainyear,
            SubstitutionClass::FancyYear => &self.fancyyear,
            SubstitutionClass::CmakeRc | SubstitutionClass::CmakeCopyright => return None,
        };
        Some(list.patterns())
    }
}

/// Ordered list of glob patterns.
///
/// Accepts either a TOML array of strings or a multi-line string with one
/// pattern per line. Lines are trimmed and blank lines dropped.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(from = "RawGlobList")]
pub struct GlobList(Vec<String>);

impl GlobList {
    pub fn patterns(&self) -> &[String] {
        &self.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawGlobList {
    Lines(String),
    List(Vec<String>),
}

impl From<RawGlobList> for GlobList {
    fn from(raw: RawGlobList) -> Self {
        let clean = |s: &str| {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };
        let patterns = match raw {
            RawGlobList::Lines(text) => text.lines().filter_map(clean).collect(),
            RawGlobList::List(items) => {
                items.iter().map(String::as_str).filter_map(clean).collect()
            }
        };
        GlobList(patterns)
    }
}

/// Parses configuration from TOML text.
///
/// Syntax errors surface as [`UpversionError::Toml`]; a missing `[files]`
/// table or class key is a [`UpversionError::Config`] error.
pub fn parse_config(text: &str) -> Result<Config> {
    let config: Config = toml::from_str(text).map_err(|e| {
        if e.message().starts_with("missing field") {
            UpversionError::config(format!("incomplete configuration: {}", e.message()))
        } else {
            UpversionError::Toml(e)
        }
    })?;

    if config.manifest.trim().is_empty() {
        return Err(UpversionError::config("'manifest' must not be empty"));
    }

    Ok(config)
}

/// Loads configuration from a file.
///
/// # Returns
/// * `Ok(Config)` - Parsed configuration
/// * `Err(Config)` - If the file does not exist
/// * `Err(Filesystem)` - If the file exists but cannot be read
/// * `Err(Toml)` - If the file is not valid TOML
/// * `Err(Config)` - If a required table or key is missing
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.is_file() {
        return Err(UpversionError::config(format!(
            "configuration file not found: {}",
            path.display()
        )));
    }

    let text = fs::read_to_string(path).map_err(|e| UpversionError::filesystem(path, e))?;
    parse_config(&text)
}

/// Locates a configuration file when none was given explicitly.
///
/// Searched in order:
/// 1. `<root>/upversion.toml`
/// 2. `<root>/tools/upversion/upversion.toml`
/// 3. `<config dir>/upversion/upversion.toml` in the user config directory
pub fn find_config(root: &Path) -> Option<PathBuf> {
    let mut candidates = vec![
        root.join(CONFIG_FILE_NAME),
        root.join("tools").join("upversion").join(CONFIG_FILE_NAME),
    ];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("upversion").join(CONFIG_FILE_NAME));
    }

    candidates.into_iter().find(|p| p.is_file())
}
