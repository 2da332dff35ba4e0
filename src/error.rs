use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a license scan.
///
/// A dependency that merely fails to resolve is not an error here; it is
/// carried on its record as [`Outcome::Unresolved`](crate::models::Outcome).
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("package not found:\n{output}")]
    PackageNotFound { output: String },

    #[error("'{command}' failed with:\n{output}")]
    Enumeration { command: String, output: String },

    #[error("could not retrieve package information for {package}")]
    PackageInfoMissing { package: String },

    #[error("package information mismatch: asked for {asked}, got {got}")]
    PackageInfoMismatch { asked: String, got: String },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse license template {name}: {source}")]
    Template {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("packages share the same license file {path} but no common prefix: {}", packages.join(", "))]
    GroupingConflict { path: String, packages: Vec<String> },
}

impl ScanError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScanError::Io {
            path: path.into(),
            source,
        }
    }
}
