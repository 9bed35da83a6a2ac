use crate::error::{Result, UpversionError};
use std::fmt;
use std::str::FromStr;

/// Semantic version triple, ordered by (major, minor, patch)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Create a new version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a dotted "X.Y.Z" string.
    ///
    /// Whitespace around the whole string is ignored. Each of the three
    /// components must be plain ASCII digits: signs, inner whitespace and
    /// empty components are rejected.
    pub fn parse(input: &str) -> Result<Self> {
        let parts: Vec<&str> = input.trim().split('.').collect();
        if parts.len() != 3 {
            return Err(UpversionError::version_format(
                input,
                format!(
                    "must have exactly three components (X.Y.Z), found {}",
                    parts.len()
                ),
            ));
        }

        let invalid = |name: &str, raw: &str| {
            UpversionError::version_format(
                input,
                format!("has an invalid {} component '{}'", name, raw),
            )
        };
        let component = |name: &str, raw: &str| -> Result<u32> {
            // u32::from_str would also take a leading '+'
            if !raw.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid(name, raw));
            }
            raw.parse::<u32>().map_err(|_| invalid(name, raw))
        };

        Ok(Version {
            major: component("major", parts[0])?,
            minor: component("minor", parts[1])?,
            patch: component("patch", parts[2])?,
        })
    }
}

impl FromStr for Version {
    type Err = UpversionError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
