use std::path::PathBuf;
use std::rc::Rc;

use serde::Deserialize;

use crate::license::matcher::MatchResult;

/// Error reported by the package enumerator for a single package.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PkgError {
    #[serde(rename = "Err")]
    pub err: String,
}

/// Metadata for one package, as supplied by a [`PackageEnumerator`](crate::enumerator::PackageEnumerator).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PackageInfo {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "ImportPath")]
    pub import_path: String,
    /// Source root; the package lives under `<root>/src/<import_path>`.
    #[serde(rename = "Root", default)]
    pub root: PathBuf,
    #[serde(rename = "Error", default)]
    pub error: Option<PkgError>,
}

/// What the matching pass concluded about a package.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The enumerator could not resolve the package; matching was skipped.
    Unresolved(String),
    /// No license file in the package directory or any ancestor.
    Missing,
    Matched(Rc<MatchResult>),
    /// License declared by the product configuration rather than detected.
    Declared(String),
}

#[derive(Debug, Clone)]
pub struct LicenseRecord {
    pub package: String,
    /// License file path relative to `<root>/src`; empty when none was found.
    pub path: String,
    /// Explicit display path, overriding the rewritten `path`.
    pub manual_path: Option<String>,
    pub outcome: Outcome,
}

impl LicenseRecord {
    pub fn unresolved(package: impl Into<String>, err: impl Into<String>) -> Self {
        LicenseRecord {
            package: package.into(),
            path: String::new(),
            manual_path: None,
            outcome: Outcome::Unresolved(err.into()),
        }
    }

    pub fn missing(package: impl Into<String>) -> Self {
        LicenseRecord {
            package: package.into(),
            path: String::new(),
            manual_path: None,
            outcome: Outcome::Missing,
        }
    }

    pub fn matched(
        package: impl Into<String>,
        path: impl Into<String>,
        result: Rc<MatchResult>,
    ) -> Self {
        LicenseRecord {
            package: package.into(),
            path: path.into(),
            manual_path: None,
            outcome: Outcome::Matched(result),
        }
    }

    pub fn match_result(&self) -> Option<&MatchResult> {
        match &self.outcome {
            Outcome::Matched(m) => Some(m),
            _ => None,
        }
    }
}
