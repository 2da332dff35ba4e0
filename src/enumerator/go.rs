use std::collections::HashSet;
use std::path::PathBuf;
use std::process::Command;

use serde_json::Deserializer;

use crate::error::ScanError;
use crate::models::PackageInfo;

/// Enumerates packages by querying the `go` tool.
///
/// Steps:
/// 1. `go list <specs>` expands patterns such as `./...`.
/// 2. `go list -f {{range .Deps}}...` collects transitive dependencies.
/// 3. `go list -e -json <deps>` describes every package, errors included.
pub struct GoEnumerator {
    /// Replaces any inherited `GOPATH` when set.
    gopath: Option<PathBuf>,
}

impl GoEnumerator {
    pub fn new(gopath: Option<PathBuf>) -> Self {
        Self { gopath }
    }

    fn go(&self, args: &[String]) -> Result<Vec<u8>, ScanError> {
        let command = format!("go {}", args.join(" "));
        let mut cmd = Command::new("go");
        cmd.args(args);
        if let Some(gopath) = &self.gopath {
            cmd.env("GOPATH", gopath);
        }

        let output = cmd.output().map_err(|e| ScanError::Enumeration {
            command: command.clone(),
            output: e.to_string(),
        })?;
        if !output.status.success() {
            let mut text = String::from_utf8_lossy(&output.stderr).into_owned();
            text.push_str(&String::from_utf8_lossy(&output.stdout));
            return Err(failure(command, text));
        }
        Ok(output.stdout)
    }

    fn expand_packages(&self, specs: &[String]) -> Result<Vec<String>, ScanError> {
        let mut args = vec!["list".to_string()];
        args.extend(specs.iter().cloned());
        let out = self.go(&args)?;
        Ok(String::from_utf8_lossy(&out)
            .lines()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn list_packages_and_deps(&self, specs: &[String]) -> Result<Vec<String>, ScanError> {
        let pkgs = self.expand_packages(specs)?;
        let mut args = vec![
            "list".to_string(),
            "-f".to_string(),
            "{{range .Deps}}{{.}}|{{end}}".to_string(),
        ];
        args.extend(pkgs.iter().cloned());
        let out = self.go(&args)?;
        Ok(merge_deps(&String::from_utf8_lossy(&out), &pkgs))
    }
}

impl super::PackageEnumerator for GoEnumerator {
    fn packages(&self, specs: &[String]) -> Result<Vec<PackageInfo>, ScanError> {
        let deps = self.list_packages_and_deps(specs)?;
        if deps.is_empty() {
            return Ok(Vec::new());
        }
        let mut args = vec!["list".to_string(), "-e".to_string(), "-json".to_string()];
        args.extend(deps.iter().cloned());
        let out = self.go(&args)?;
        decode_package_infos(&deps, &out)
    }

    fn standard_packages(&self) -> Result<HashSet<String>, ScanError> {
        let std = self.expand_packages(&["std".to_string(), "cmd".to_string()])?;
        Ok(std.into_iter().collect())
    }
}

/// Missing packages are reported apart from other `go` failures.
fn failure(command: String, output: String) -> ScanError {
    if output.contains("cannot find package") || output.contains("no buildable Go source files") {
        ScanError::PackageNotFound { output }
    } else {
        ScanError::Enumeration { command, output }
    }
}

/// Deduplicate the `|`-separated dependency listing, add the requested
/// packages themselves, and sort.
fn merge_deps(listing: &str, requested: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut deps = Vec::new();
    for dep in listing.split('|').map(str::trim).filter(|s| !s.is_empty()) {
        if seen.insert(dep.to_string()) {
            deps.push(dep.to_string());
        }
    }
    for pkg in requested {
        if seen.insert(pkg.clone()) {
            deps.push(pkg.clone());
        }
    }
    deps.sort();
    deps
}

/// Decode the stream of JSON objects printed by `go list -json`, one per
/// asked package, in order.
fn decode_package_infos(asked: &[String], out: &[u8]) -> Result<Vec<PackageInfo>, ScanError> {
    let mut stream = Deserializer::from_slice(out).into_iter::<PackageInfo>();
    let mut infos = Vec::with_capacity(asked.len());
    for pkg in asked {
        let mut info = match stream.next() {
            Some(Ok(info)) => info,
            _ => {
                return Err(ScanError::PackageInfoMissing {
                    package: pkg.clone(),
                })
            }
        };
        if info.import_path != *pkg {
            return Err(ScanError::PackageInfoMismatch {
                asked: pkg.clone(),
                got: info.import_path,
            });
        }
        if info.error.is_some() && info.name.is_empty() {
            info.name = info.import_path.clone();
        }
        infos.push(info);
    }
    Ok(infos)
}
