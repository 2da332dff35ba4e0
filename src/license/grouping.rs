use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::ScanError;
use crate::models::LicenseRecord;

/// Prefix tree over `/`-separated path segments.
#[derive(Debug, Default)]
struct Node {
    children: BTreeMap<String, Node>,
}

impl Node {
    fn insert(&mut self, package: &str) {
        let mut node = self;
        for part in package.split('/') {
            node = node.children.entry(part.to_string()).or_default();
        }
    }

    fn only_child(&self) -> Option<(&str, &Node)> {
        let mut children = self.children.iter();
        match (children.next(), children.next()) {
            (Some((name, child)), None) => Some((name.as_str(), child)),
            _ => None,
        }
    }
}

/// Longest common prefix of the packages, counted in whole path segments.
///
/// Descends while the current node has a single child, stopping at the
/// first branch or leaf. A package that is a prefix of another does not
/// stop the walk, so `a/b` and `a/b/c` give `a/b/c`.
pub fn longest_common_prefix<'a>(packages: impl IntoIterator<Item = &'a str>) -> String {
    let mut root = Node::default();
    for package in packages {
        root.insert(package);
    }

    let mut prefix = Vec::new();
    let mut node = &root;
    while let Some((name, child)) = node.only_child() {
        prefix.push(name);
        node = child;
    }
    prefix.join("/")
}

/// Collapse records sharing a license file into one record named after
/// their longest common package prefix.
///
/// Order of first appearance is preserved. Records without a license path
/// pass through untouched. Fails when records share a file but no prefix.
pub fn group_licenses(records: Vec<LicenseRecord>) -> Result<Vec<LicenseRecord>, ScanError> {
    let mut order: Vec<&str> = Vec::new();
    let mut buckets: HashMap<&str, Vec<&str>> = HashMap::new();
    for record in records.iter().filter(|r| !r.path.is_empty()) {
        let bucket = buckets.entry(record.path.as_str()).or_default();
        if bucket.is_empty() {
            order.push(&record.path);
        }
        bucket.push(&record.package);
    }

    let mut names: HashMap<String, String> = HashMap::new();
    for path in order {
        let packages = &buckets[path];
        if packages.len() <= 1 {
            continue;
        }
        let prefix = longest_common_prefix(packages.iter().copied());
        if prefix.is_empty() {
            return Err(ScanError::GroupingConflict {
                path: path.to_string(),
                packages: packages.iter().map(|p| p.to_string()).collect(),
            });
        }
        names.insert(path.to_string(), prefix);
    }

    let mut emitted = HashSet::new();
    let mut kept = Vec::new();
    for mut record in records {
        if record.path.is_empty() {
            kept.push(record);
            continue;
        }
        if !emitted.insert(record.path.clone()) {
            continue;
        }
        if let Some(prefix) = names.remove(&record.path) {
            record.package = prefix;
        }
        kept.push(record);
    }
    Ok(kept)
}
