//! Textual encodings of a [`Version`].
//!
//! Every function here is pure. The fixed-width encodings (savestr and the
//! padded configstr) reject versions whose fields do not fit their digit
//! budget instead of widening or truncating the field.

use crate::domain::Version;
use crate::error::{Result, UpversionError};

/// Magic prefix of the save-file header.
pub const SAVESTR_MAGIC: &str = "ODAMEXSAVE";

/// Exact width of a save-file header.
pub const SAVESTR_LEN: usize = 16;

const MAJOR_MAX: u32 = 999;
const MINOR_MAX: u32 = 99;
const PATCH_MAX: u32 = 9;

/// `"{major}.{minor}.{patch}"`
pub fn encode_dotted(v: &Version) -> String {
    format!("{}.{}.{}", v.major, v.minor, v.patch)
}

/// `"{major}, {minor}, {patch}"`
pub fn encode_comma(v: &Version) -> String {
    format!("{}, {}, {}", v.major, v.minor, v.patch)
}

/// Quoted 4-tuple used as the resource version in the build manifest.
pub fn encode_cmake_rc(v: &Version) -> String {
    format!("\"{},{},{},0\"", v.major, v.minor, v.patch)
}

/// 16-character save-file header.
///
/// Single-digit versions use one character per field followed by three
/// spaces; anything larger switches to fixed 3/2/1 digit fields so the two
/// shapes never collide.
///
/// # Example
/// ```
/// # use upversion::domain::{codec::encode_savestr, Version};
/// assert_eq!(encode_savestr(&Version::new(1, 2, 3)).unwrap(), "ODAMEXSAVE123   ");
/// assert_eq!(encode_savestr(&Version::new(1, 12, 3)).unwrap(), "ODAMEXSAVE001123");
/// ```
pub fn encode_savestr(v: &Version) -> Result<String> {
    let buffer = if v.major <= 9 && v.minor <= 9 && v.patch <= 9 {
        format!("{}{}{}{}   ", SAVESTR_MAGIC, v.major, v.minor, v.patch)
    } else {
        format!("{}{}", SAVESTR_MAGIC, padded_fields("savestr", v)?)
    };

    if buffer.len() != SAVESTR_LEN {
        return Err(UpversionError::encoding_range(
            "savestr",
            v,
            format!(
                "header is {} characters, expected {}",
                buffer.len(),
                SAVESTR_LEN
            ),
        ));
    }

    Ok(buffer)
}

/// Numeric config string that compares in version order when read as an
/// integer.
///
/// Only `0.x.y` versions with single-digit minor and patch use the short
/// two-digit form. Everything else is padded to 3/2/1 digits, which keeps
/// e.g. `0.10.0` (100) above `0.9.9` (99) and `10.0.0` above `9.9.9`.
pub fn encode_configstr(v: &Version) -> Result<String> {
    if v.major == 0 && v.minor <= 9 && v.patch <= 9 {
        Ok(format!("{}{}", v.minor, v.patch))
    } else {
        padded_fields("configstr", v)
    }
}

fn padded_fields(codec: &'static str, v: &Version) -> Result<String> {
    let checks = [
        ("major", v.major, MAJOR_MAX, 3),
        ("minor", v.minor, MINOR_MAX, 2),
        ("patch", v.patch, PATCH_MAX, 1),
    ];
    for (name, value, max, digits) in checks {
        if value > max {
            return Err(UpversionError::encoding_range(
                codec,
                v,
                format!("{} {} does not fit in {} digit(s)", name, value, digits),
            ));
        }
    }

    Ok(format!("{:03}{:02}{:01}", v.major, v.minor, v.patch))
}
