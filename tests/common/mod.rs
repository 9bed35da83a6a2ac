// Shared fixtures for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use upversion::domain::Version;
use upversion::replacer::ReplaceMode;
use upversion::settings::Settings;

pub const CONFIG: &str = r#"
[files]
dotted = """
CMakeLists.txt
common/version.h
client/res/*.rc
"""
comma = """
common/version.h
client/res/*.rc
server/res/*.rc
"""
savestr = ["common/version.h"]
configstr = ["common/version.h"]
plainyear = """
client/res/*.rc
**/*.cpp
"""
fancyyear = ["README.md"]
"#;

pub const CMAKELISTS: &str = r#"project(Odamex VERSION 10.4.0)
set(PROJECT_RC_VERSION "10,4,0,0")
set(PROJECT_COPYRIGHT "2006-2024")
"#;

pub const VERSION_H: &str = r#"#define DOTVERSIONSTR "10.4.0"
#define RCVERSION 10, 4, 0
#define SAVESIG "ODAMEXSAVE010040"
#define CONFIGVER "010040"
"#;

pub const ODAMEX_RC: &str = r#" FILEVERSION 10, 4, 0
 VALUE "ProductVersion", "10.4.0"
 VALUE "LegalCopyright", "Copyright (C) 2006-2024 The Odamex Team."
"#;

pub const ABOUT_CPP: &str = r#"// Copyright (C) 2006-2024 The Odamex Team
const char* about = "Copyright (C) 2006-2024 The Odamex Team.";
"#;

pub const README: &str = "Copyright © 2006-2024 The Odamex Team\n";

/// Writes `files` under `root`, creating parent directories.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full = root.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }
}

/// A small repository layout with every substitution class represented.
pub fn sample_repo(root: &Path) {
    write_tree(
        root,
        &[
            ("upversion.toml", CONFIG),
            ("CMakeLists.txt", CMAKELISTS),
            ("common/version.h", VERSION_H),
            ("client/res/odamex.rc", ODAMEX_RC),
            ("client/src/about.cpp", ABOUT_CPP),
            ("README.md", README),
        ],
    );
}

/// Reads every regular file under `root` except the config, sorted by path.
pub fn snapshot(root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
    let mut files = Vec::new();
    collect(root, root, &mut files);
    files.sort();
    files
}

fn collect(root: &Path, dir: &Path, out: &mut Vec<(PathBuf, Vec<u8>)>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect(root, &path, out);
        } else if !path.ends_with("upversion.toml") {
            let relative = path.strip_prefix(root).unwrap().to_path_buf();
            out.push((relative, fs::read(&path).unwrap()));
        }
    }
}

pub fn settings(root: &Path, old: &str, new: &str, old_year: &str, new_year: &str) -> Settings {
    Settings {
        old_version: Version::parse(old).unwrap(),
        new_version: Version::parse(new).unwrap(),
        old_year: old_year.to_string(),
        new_year: new_year.to_string(),
        config_path: root.join("upversion.toml"),
        root: root.to_path_buf(),
        mode: ReplaceMode::Write,
    }
}

pub fn read(root: &Path, path: &str) -> String {
    fs::read_to_string(root.join(path)).unwrap()
}
