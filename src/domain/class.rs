use crate::domain::{codec, Version};
use crate::error::Result;
use std::fmt;

/// A category of version or copyright occurrence sharing one encoding rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubstitutionClass {
    Dotted,
    Comma,
    Savestr,
    Configstr,
    CmakeRc,
    CmakeCopyright,
    PlainYear,
    FancyYear,
}

impl SubstitutionClass {
    /// Every class, in the order a run applies them.
    pub const ALL: [SubstitutionClass; 8] = [
        SubstitutionClass::Dotted,
        SubstitutionClass::Comma,
        SubstitutionClass::Savestr,
        SubstitutionClass::Configstr,
        SubstitutionClass::CmakeRc,
        SubstitutionClass::CmakeCopyright,
        SubstitutionClass::PlainYear,
        SubstitutionClass::FancyYear,
    ];

    /// Name used in the `[files]` table and in reports
    pub fn name(&self) -> &'static str {
        match self {
            SubstitutionClass::Dotted => "dotted",
            SubstitutionClass::Comma => "comma",
            SubstitutionClass::Savestr => "savestr",
            SubstitutionClass::Configstr => "configstr",
            SubstitutionClass::CmakeRc => "cmake-rc",
            SubstitutionClass::CmakeCopyright => "cmake-copyright",
            SubstitutionClass::PlainYear => "plainyear",
            SubstitutionClass::FancyYear => "fancyyear",
        }
    }

    /// Whether the class always targets the build manifest instead of
    /// configured globs.
    pub fn targets_manifest(&self) -> bool {
        matches!(
            self,
            SubstitutionClass::CmakeRc | SubstitutionClass::CmakeCopyright
        )
    }

    /// Encode a version with this class's codec.
    ///
    /// Returns `Ok(None)` for year classes, which have no codec.
    pub fn encode(&self, v: &Version) -> Result<Option<String>> {
        let encoded = match self {
            SubstitutionClass::Dotted => codec::encode_dotted(v),
            SubstitutionClass::Comma => codec::encode_comma(v),
            SubstitutionClass::Savestr => codec::encode_savestr(v)?,
            SubstitutionClass::Configstr => codec::encode_configstr(v)?,
            SubstitutionClass::CmakeRc => codec::encode_cmake_rc(v),
            SubstitutionClass::CmakeCopyright
            | SubstitutionClass::PlainYear
            | SubstitutionClass::FancyYear => return Ok(None),
        };
        Ok(Some(encoded))
    }
}

impl fmt::Display for SubstitutionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_names() {
        let names: Vec<&str> = SubstitutionClass::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec![
                "dotted",
                "comma",
                "savestr",
                "configstr",
                "cmake-rc",
                "cmake-copyright",
                "plainyear",
                "fancyyear"
            ]
        );
    }

    #[test]
    fn test_manifest_classes() {
        assert!(SubstitutionClass::CmakeRc.targets_manifest());
        assert!(SubstitutionClass::CmakeCopyright.targets_manifest());
        assert!(!SubstitutionClass::Dotted.targets_manifest());
        assert!(!SubstitutionClass::PlainYear.targets_manifest());
    }

    #[test]
    fn test_year_classes_have_no_codec() {
        let v = Version::new(1, 2, 3);
        for class in SubstitutionClass::ALL {
            let is_year = matches!(
                class,
                SubstitutionClass::CmakeCopyright
                    | SubstitutionClass::PlainYear
                    | SubstitutionClass::FancyYear
            );
            let encoded = class.encode(&v).unwrap();
            assert_eq!(encoded.is_none(), is_year, "class {}", class);
        }
    }

    #[test]
    fn test_encode_dispatch() {
        let v = Version::new(1, 12, 3);
        assert_eq!(
            SubstitutionClass::Savestr.encode(&v).unwrap().as_deref(),
            Some("ODAMEXSAVE001123")
        );
        assert_eq!(
            SubstitutionClass::Comma.encode(&v).unwrap().as_deref(),
            Some("1, 12, 3")
        );
    }

    #[test]
    fn test_encode_propagates_range_error() {
        let v = Version::new(1, 0, 12);
        assert!(SubstitutionClass::Configstr.encode(&v).is_err());
        assert!(SubstitutionClass::Dotted.encode(&v).is_ok());
    }
}
