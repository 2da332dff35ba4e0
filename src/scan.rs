use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

use crate::enumerator::PackageEnumerator;
use crate::error::ScanError;
use crate::license::locator::find_license;
use crate::license::matcher::{match_templates, MatchResult};
use crate::license::template::Template;
use crate::models::LicenseRecord;

/// Locate and match the license of every dependency of `specs`.
///
/// Standard packages are dropped. Packages the enumerator failed to resolve
/// are kept as unresolved records. Each license file is read and scored once,
/// however many packages share it.
pub fn list_licenses(
    enumerator: &dyn PackageEnumerator,
    templates: &[Rc<Template>],
    specs: &[String],
) -> Result<Vec<LicenseRecord>, ScanError> {
    let infos = enumerator.packages(specs)?;
    let standard = enumerator.standard_packages()?;

    // Keyed by absolute path; packages with many subpackages hit it often.
    let mut matched: HashMap<PathBuf, Rc<MatchResult>> = HashMap::new();

    let mut records = Vec::new();
    for info in &infos {
        if let Some(err) = &info.error {
            records.push(LicenseRecord::unresolved(&info.name, &err.err));
            continue;
        }
        if standard.contains(&info.import_path) {
            continue;
        }

        let Some(path) = find_license(info)? else {
            records.push(LicenseRecord::missing(&info.import_path));
            continue;
        };

        let file = info.root.join("src").join(&path);
        let result = match matched.get(&file).cloned() {
            Some(m) => m,
            None => {
                let data = std::fs::read(&file).map_err(|e| ScanError::io(&file, e))?;
                let m = Rc::new(match_templates(&data, templates));
                matched.insert(file, Rc::clone(&m));
                m
            }
        };
        records.push(LicenseRecord::matched(
            &info.import_path,
            path.to_string_lossy(),
            result,
        ));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use crate::license::grouping::group_licenses;
    use crate::license::template::load_templates;
    use crate::models::{Outcome, PackageInfo, PkgError};

    const MIT_TEXT: &str = "MIT License\n\nCopyright (c) 2018 Foo Authors\n\n\
Permission is hereby granted, free of charge, to any person obtaining a copy\n\
of this software and associated documentation files (the \"Software\"), to deal\n\
in the Software without restriction, including without limitation the rights\n\
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell\n\
copies of the Software, and to permit persons to whom the Software is\n\
furnished to do so, subject to the following conditions:\n\n\
The above copyright notice and this permission notice shall be included in all\n\
copies or substantial portions of the Software.\n\n\
THE SOFTWARE IS PROVIDED \"AS IS\", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR\n\
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,\n\
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE\n\
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER\n\
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,\n\
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE\n\
SOFTWARE.\n";

    /// Serves a fixed package list.
    struct StaticEnumerator {
        infos: Vec<PackageInfo>,
        standard: HashSet<String>,
    }

    impl PackageEnumerator for StaticEnumerator {
        fn packages(&self, _specs: &[String]) -> Result<Vec<PackageInfo>, ScanError> {
            Ok(self.infos.clone())
        }

        fn standard_packages(&self) -> Result<HashSet<String>, ScanError> {
            Ok(self.standard.clone())
        }
    }

    fn info(root: &Path, import_path: &str) -> PackageInfo {
        PackageInfo {
            name: import_path.rsplit('/').next().unwrap_or_default().to_string(),
            import_path: import_path.to_string(),
            root: root.to_path_buf(),
            error: None,
        }
    }

    fn source_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(src.join("foo/bar")).unwrap();
        fs::create_dir_all(src.join("foo/baz")).unwrap();
        fs::create_dir_all(src.join("plain/pkg")).unwrap();
        fs::create_dir_all(src.join("fmt")).unwrap();
        fs::write(src.join("foo/LICENSE"), MIT_TEXT).unwrap();
        dir
    }

    #[test]
    fn test_shared_license_is_matched_once_and_grouped() {
        let dir = source_tree();
        let enumerator = StaticEnumerator {
            infos: vec![info(dir.path(), "foo/bar"), info(dir.path(), "foo/baz")],
            standard: HashSet::new(),
        };
        let templates = load_templates().unwrap();

        let records = list_licenses(&enumerator, &templates, &["foo/...".to_string()]).unwrap();
        assert_eq!(records.len(), 2);
        let (a, b) = match (&records[0].outcome, &records[1].outcome) {
            (Outcome::Matched(a), Outcome::Matched(b)) => (a, b),
            other => panic!("expected two matches, got {other:?}"),
        };
        assert!(Rc::ptr_eq(a, b), "shared file should be scored once");
        assert_eq!(a.score, 1.0);
        assert_eq!(a.template.as_ref().unwrap().spdx_id, "MIT");

        let grouped = group_licenses(records).unwrap();
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].package, "foo");
        assert_eq!(grouped[0].path, "foo/LICENSE");
    }

    #[test]
    fn test_unresolved_standard_and_missing() {
        let dir = source_tree();
        let mut broken = info(dir.path(), "gone/pkg");
        broken.name = "gone/pkg".to_string();
        broken.error = Some(PkgError {
            err: "cannot find package".to_string(),
        });
        let enumerator = StaticEnumerator {
            infos: vec![
                info(dir.path(), "fmt"),
                broken,
                info(dir.path(), "plain/pkg"),
            ],
            standard: HashSet::from(["fmt".to_string()]),
        };
        let templates = load_templates().unwrap();

        let records = list_licenses(&enumerator, &templates, &[]).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].package, "gone/pkg");
        assert!(matches!(records[0].outcome, Outcome::Unresolved(ref e) if e == "cannot find package"));
        assert_eq!(records[1].package, "plain/pkg");
        assert!(records[1].path.is_empty());
        assert!(matches!(records[1].outcome, Outcome::Missing));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_license_name_is_read() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let pkg = dir.path().join("src/odd/pkg");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(pkg.join(OsStr::from_bytes(b"LICENSE.\xff")), MIT_TEXT).unwrap();
        let enumerator = StaticEnumerator {
            infos: vec![info(dir.path(), "odd/pkg")],
            standard: HashSet::new(),
        };
        let templates = load_templates().unwrap();

        let records = list_licenses(&enumerator, &templates, &[]).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].path, "odd/pkg/LICENSE.\u{FFFD}");
        assert_eq!(records[0].match_result().unwrap().score, 1.0);
    }

    #[test]
    fn test_broken_source_tree_aborts() {
        let dir = TempDir::new().unwrap();
        let enumerator = StaticEnumerator {
            infos: vec![info(dir.path(), "not/there")],
            standard: HashSet::new(),
        };
        let err = list_licenses(&enumerator, &[], &[]).unwrap_err();
        assert!(matches!(err, ScanError::Io { .. }));
    }
}
