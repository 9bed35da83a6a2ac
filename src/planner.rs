//! Turns configuration and settings into substitutions, then applies them.
//!
//! Planning computes every encoding and compiles every pattern up front, so
//! malformed input aborts before any file is touched. Execution then walks
//! the plan in order and attributes any failure to its class and glob.

use crate::config::Config;
use crate::domain::SubstitutionClass;
use crate::error::{Result, UpversionError};
use crate::replacer::{self, FileOutcome, ReplaceMode};
use crate::settings::Settings;
use crate::warning::RunWarning;
use regex::bytes::Regex;
use std::path::Path;
use tracing::{debug, info};

/// One (class, glob) pair with its compiled search and replacement.
#[derive(Debug, Clone)]
pub struct PlannedSubstitution {
    pub class: SubstitutionClass,
    pub glob: String,
    pub search: Regex,
    /// Replacement template; `${n}` refers to capture groups
    pub replacement: String,
}

/// Outcome of one planned substitution
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub class: SubstitutionClass,
    pub glob: String,
    pub outcomes: Vec<FileOutcome>,
}

/// Everything a run did, in execution order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub steps: Vec<StepReport>,
    pub warnings: Vec<RunWarning>,
}

impl RunReport {
    /// Files that had at least one replacement, counted once per step
    pub fn files_changed(&self) -> usize {
        self.outcomes().filter(|o| !o.is_skip()).count()
    }

    /// Total replacements across all steps
    pub fn replacements(&self) -> usize {
        self.outcomes().map(|o| o.count).sum()
    }

    fn outcomes(&self) -> impl Iterator<Item = &FileOutcome> {
        self.steps.iter().flat_map(|s| s.outcomes.iter())
    }
}

/// Receives progress while a plan executes.
pub trait Reporter {
    fn warning(&mut self, _warning: &RunWarning) {}
    fn step(&mut self, _step: &StepReport) {}
}

/// Discards all progress.
impl Reporter for () {}

/// Builds the ordered list of substitutions for a run.
///
/// Classes are applied in [`SubstitutionClass::ALL`] order. Codec classes
/// search for the literal old encoding; year classes use the copyright
/// rules. Both manifest classes target `config.manifest` only.
pub fn plan(config: &Config, settings: &Settings) -> Result<Vec<PlannedSubstitution>> {
    let mut steps = Vec::new();

    for class in SubstitutionClass::ALL {
        let (search, replacement) = patterns_for(class, config, settings)?;
        let search = Regex::new(&search)?;

        let globs: Vec<String> = if class.targets_manifest() {
            vec![config.manifest.clone()]
        } else {
            config.files.globs(class).unwrap_or_default().to_vec()
        };

        debug!(
            %class,
            search = search.as_str(),
            replacement = replacement.as_str(),
            globs = globs.len(),
            "planned"
        );
        steps.extend(globs.into_iter().map(|glob| PlannedSubstitution {
            class,
            glob,
            search: search.clone(),
            replacement: replacement.clone(),
        }));
    }

    Ok(steps)
}

/// Search regex source and replacement template for a class.
fn patterns_for(
    class: SubstitutionClass,
    config: &Config,
    settings: &Settings,
) -> Result<(String, String)> {
    let holder = &config.copyright_holder;
    let old_year = regex::escape(&settings.old_year);
    let new_year = literal_replacement(&settings.new_year);

    let patterns = match class {
        SubstitutionClass::CmakeCopyright => {
            (format!("\"{}\"", old_year), format!("\"{}\"", new_year))
        }
        // Both neighbours must be non-space; banner lines such as
        // " * Copyright (C) ... Team" are left alone.
        SubstitutionClass::PlainYear => (
            format!(
                r"((?-u:[^ ]))Copyright \(C\) {} {}((?-u:[^ ]))",
                old_year,
                regex::escape(holder)
            ),
            format!(
                "${{1}}Copyright (C) {} {}${{2}}",
                new_year,
                literal_replacement(holder)
            ),
        ),
        SubstitutionClass::FancyYear => (
            format!("Copyright © {} {}", old_year, regex::escape(holder)),
            format!("Copyright © {} {}", new_year, literal_replacement(holder)),
        ),
        SubstitutionClass::Dotted
        | SubstitutionClass::Comma
        | SubstitutionClass::Savestr
        | SubstitutionClass::Configstr
        | SubstitutionClass::CmakeRc => {
            let old = class.encode(&settings.old_version)?;
            let new = class.encode(&settings.new_version)?;
            let (old, new) = old.zip(new).ok_or_else(|| {
                UpversionError::config(format!("class '{}' has no version codec", class))
            })?;
            (regex::escape(&old), literal_replacement(&new))
        }
    };

    Ok(patterns)
}

/// Escapes `$` so text is inserted verbatim by a replacement template.
fn literal_replacement(text: &str) -> String {
    text.replace('$', "$$")
}

/// Applies planned substitutions in order.
///
/// A glob that matches no files produces a [`RunWarning::NoFilesMatched`].
/// The first error stops the run and is wrapped with the class and glob it
/// occurred in.
pub fn execute(
    steps: &[PlannedSubstitution],
    root: &Path,
    mode: ReplaceMode,
    reporter: &mut dyn Reporter,
) -> Result<RunReport> {
    let mut report = RunReport::default();

    for planned in steps {
        let outcomes = replacer::replace(
            root,
            &planned.glob,
            &planned.search,
            &planned.replacement,
            mode,
        )
        .map_err(|e| e.in_substitution(planned.class.name(), planned.glob.clone()))?;

        if outcomes.is_empty() {
            let warning = RunWarning::NoFilesMatched {
                class: planned.class.name(),
                glob: planned.glob.clone(),
            };
            reporter.warning(&warning);
            report.warnings.push(warning);
        }

        let step = StepReport {
            class: planned.class,
            glob: planned.glob.clone(),
            outcomes,
        };
        reporter.step(&step);
        report.steps.push(step);
    }

    info!(
        steps = report.steps.len(),
        files = report.files_changed(),
        replacements = report.replacements(),
        "run finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::domain::Version;
    use std::path::PathBuf;

    const CONFIG: &str = r#"
[files]
dotted = ["a.txt", "b/*.txt"]
comma = []
savestr = ["save.h"]
configstr = []
plainyear = ["**/*.cpp"]
fancyyear = []
"#;

    fn settings(old: Version, new: Version) -> Settings {
        Settings {
            old_version: old,
            new_version: new,
            old_year: "2006-2024".to_string(),
            new_year: "2006-2025".to_string(),
            config_path: PathBuf::from("upversion.toml"),
            root: PathBuf::from("."),
            mode: ReplaceMode::Write,
        }
    }

    #[test]
    fn test_plan_order_and_globs() {
        let config = parse_config(CONFIG).unwrap();
        let steps = plan(
            &config,
            &settings(Version::new(1, 0, 0), Version::new(2, 0, 0)),
        )
        .unwrap();

        let pairs: Vec<(&str, &str)> = steps
            .iter()
            .map(|s| (s.class.name(), s.glob.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("dotted", "a.txt"),
                ("dotted", "b/*.txt"),
                ("savestr", "save.h"),
                ("cmake-rc", "CMakeLists.txt"),
                ("cmake-copyright", "CMakeLists.txt"),
                ("plainyear", "**/*.cpp"),
            ]
        );
    }

    #[test]
    fn test_dotted_pattern_is_literal() {
        let config = parse_config(CONFIG).unwrap();
        let steps = plan(
            &config,
            &settings(Version::new(1, 0, 0), Version::new(2, 0, 0)),
        )
        .unwrap();
        let dotted = &steps[0];
        assert!(dotted.search.is_match(b"1.0.0"));
        assert!(!dotted.search.is_match(b"1x0x0"));
        assert_eq!(dotted.replacement, "2.0.0");
    }

    #[test]
    fn test_cmake_patterns() {
        let config = parse_config(CONFIG).unwrap();
        let steps = plan(
            &config,
            &settings(Version::new(10, 4, 0), Version::new(10, 5, 0)),
        )
        .unwrap();

        let rc = steps
            .iter()
            .find(|s| s.class == SubstitutionClass::CmakeRc)
            .unwrap();
        assert!(rc.search.is_match(br#"set(PROJECT_RC_VERSION "10,4,0,0")"#));
        assert_eq!(rc.replacement, "\"10,5,0,0\"");

        let copyright = steps
            .iter()
            .find(|s| s.class == SubstitutionClass::CmakeCopyright)
            .unwrap();
        assert!(copyright.search.is_match(br#"set(PROJECT_COPYRIGHT "2006-2024")"#));
        assert_eq!(copyright.replacement, "\"2006-2025\"");
    }

    #[test]
    fn test_plain_year_requires_non_space_neighbours() {
        let config = parse_config(CONFIG).unwrap();
        let steps = plan(
            &config,
            &settings(Version::new(1, 0, 0), Version::new(2, 0, 0)),
        )
        .unwrap();
        let plain = steps
            .iter()
            .find(|s| s.class == SubstitutionClass::PlainYear)
            .unwrap();

        assert!(plain
            .search
            .is_match(br#""Copyright (C) 2006-2024 The Odamex Team.""#));
        assert!(!plain
            .search
            .is_match(b"// Copyright (C) 2006-2024 The Odamex Team\n"));
        assert!(!plain
            .search
            .is_match(b"\"Copyright (C) 2006-2024 The Odamex Team "));
    }

    #[test]
    fn test_year_is_escaped() {
        let config = parse_config(CONFIG).unwrap();
        let mut s = settings(Version::new(1, 0, 0), Version::new(2, 0, 0));
        s.old_year = "2006.2024".to_string();
        s.new_year = "$2025".to_string();
        let steps = plan(&config, &s).unwrap();
        let copyright = steps
            .iter()
            .find(|s| s.class == SubstitutionClass::CmakeCopyright)
            .unwrap();
        assert!(!copyright.search.is_match(b"\"2006-2024\""));
        assert_eq!(copyright.replacement, "\"$$2025\"");
    }

    #[test]
    fn test_plan_fails_on_encoding_range() {
        let config = parse_config(CONFIG).unwrap();
        let err = plan(
            &config,
            &settings(Version::new(1, 0, 0), Version::new(1, 0, 10)),
        )
        .unwrap_err();
        assert!(err.to_string().contains("savestr"));
    }

    #[test]
    fn test_report_totals() {
        let outcome = |count| FileOutcome {
            path: PathBuf::from("f"),
            count,
            written: count > 0,
        };
        let report = RunReport {
            steps: vec![
                StepReport {
                    class: SubstitutionClass::Dotted,
                    glob: "*".to_string(),
                    outcomes: vec![outcome(2), outcome(0)],
                },
                StepReport {
                    class: SubstitutionClass::Comma,
                    glob: "*".to_string(),
                    outcomes: vec![outcome(1)],
                },
            ],
            warnings: Vec::new(),
        };
        assert_eq!(report.files_changed(), 2);
        assert_eq!(report.replacements(), 3);
    }
}
