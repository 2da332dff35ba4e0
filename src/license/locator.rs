use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ScanError;
use crate::models::PackageInfo;

static LICENSE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:",
        r"((?:un)?licen[sc]e)|",
        r"((?:un)?licen[sc]e\.(?:md|markdown|txt))|",
        r"(copy(?:ing|right)(?:\.[^.]+)?)|",
        r"(licen[sc]e\.[^.]+)",
        r")$",
    ))
    .expect("license name regex must compile")
});

/// How likely `name` is a license file, between 0 (not one) and 1.
pub fn score_license_name(name: &str) -> f64 {
    let Some(caps) = LICENSE_NAME.captures(name) else {
        return 0.0;
    };
    if caps.get(1).is_some() {
        1.0
    } else if caps.get(2).is_some() {
        0.9
    } else if caps.get(3).is_some() {
        0.8
    } else if caps.get(4).is_some() {
        0.7
    } else {
        0.0
    }
}

/// Parent of a slash-separated import path; `.` once no component is left.
fn parent_import_path(path: &str) -> &str {
    match path.trim_end_matches('/').rsplit_once('/') {
        Some((parent, _)) if !parent.is_empty() => parent,
        _ => ".",
    }
}

/// Best-scoring regular file in `dir`, if any scores above zero.
///
/// Entries are visited in name order, so the first name wins a tie. Names
/// are kept as found on disk; only scoring sees a lossy UTF-8 rendition.
fn best_license_in(dir: &Path) -> Result<Option<OsString>, ScanError> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| ScanError::io(dir, e))? {
        let entry = entry.map_err(|e| ScanError::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| ScanError::io(entry.path(), e))?;
        if file_type.is_file() {
            names.push(entry.file_name());
        }
    }
    names.sort();

    let mut best_score = 0.0;
    let mut best_name = None;
    for name in names {
        let score = score_license_name(&name.to_string_lossy());
        if score > best_score {
            best_score = score;
            best_name = Some(name);
        }
    }
    Ok(best_name)
}

/// Look for a license file in the package directory, then in each parent
/// directory, stopping at the first one holding a candidate.
///
/// Returns the path relative to `<root>/src`, or `None` when no directory
/// up the import path has one. A directory that cannot be listed is an
/// error, not a miss.
pub fn find_license(info: &PackageInfo) -> Result<Option<PathBuf>, ScanError> {
    let src = info.root.join("src");
    let mut path = info.import_path.as_str();
    while !path.is_empty() && path != "." {
        if let Some(name) = best_license_in(&src.join(path))? {
            return Ok(Some(Path::new(path).join(name)));
        }
        path = parent_import_path(path);
    }
    Ok(None)
}
