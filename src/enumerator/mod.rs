use std::collections::HashSet;

use crate::error::ScanError;
use crate::models::PackageInfo;

pub mod go;

/// Source of the packages whose licenses are listed.
pub trait PackageEnumerator {
    /// Flattened transitive dependencies of `specs`, the requested packages included.
    fn packages(&self, specs: &[String]) -> Result<Vec<PackageInfo>, ScanError>;

    /// Identifiers of standard library packages, excluded from the report.
    fn standard_packages(&self) -> Result<HashSet<String>, ScanError>;
}
