use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for upversion operations
#[derive(Error, Debug)]
pub enum UpversionError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version format error: '{input}' {reason}")]
    VersionFormat { input: String, reason: String },

    #[error("Encoding range error: cannot encode {version} as {codec}: {reason}")]
    EncodingRange {
        codec: &'static str,
        version: String,
        reason: String,
    },

    #[error("Filesystem error on '{}': {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] globset::Error),

    #[error("Configuration parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Substitution '{class}' failed for glob '{glob}': {source}")]
    Substitution {
        class: &'static str,
        glob: String,
        #[source]
        source: Box<UpversionError>,
    },
}

/// Convenience type alias for Results in upversion
pub type Result<T> = std::result::Result<T, UpversionError>;

impl UpversionError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        UpversionError::Config(msg.into())
    }

    /// Create a version format error echoing the offending input
    pub fn version_format(input: impl Into<String>, reason: impl Into<String>) -> Self {
        UpversionError::VersionFormat {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create an encoding range error for the named codec
    pub fn encoding_range(
        codec: &'static str,
        version: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        UpversionError::EncodingRange {
            codec,
            version: version.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a filesystem error bound to the path it happened on
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        UpversionError::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Attribute an error to the substitution that raised it
    pub fn in_substitution(self, class: &'static str, glob: impl Into<String>) -> Self {
        UpversionError::Substitution {
            class,
            glob: glob.into(),
            source: Box::new(self),
        }
    }
}
