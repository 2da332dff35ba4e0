//! Report rendering for license scan results.
//!
//! Records are first classified against the confidence floor and turned into
//! display [`Row`]s, then handed to a renderer:
//!
//! - [`terminal`] — colored table.
//! - [`csv`] — `package,path,license` lines.
//! - [`markdown`] — pipe table.
//! - [`consolidated`] — concatenation of every accepted license text.

pub mod consolidated;
pub mod csv;
pub mod markdown;
pub mod paths;
pub mod terminal;

use serde::Serialize;

use crate::config::Product;
use crate::models::{LicenseRecord, Outcome};

/// Scores at or above this are reported as the template itself.
pub const EXACT_MATCH: f64 = 0.99;

/// How a record is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Matches a template word for word.
    Exact,
    /// Close enough to a template to be accepted.
    Accepted,
    /// Best template scored below the confidence floor.
    Unknown,
    /// No license file anywhere up the package path.
    Missing,
    /// The package itself could not be resolved.
    Unresolved,
    /// Declared by the product configuration.
    Declared,
}

impl Verdict {
    pub fn is_accepted(self) -> bool {
        matches!(self, Verdict::Exact | Verdict::Accepted)
    }
}

/// Classify a match score against the confidence floor.
pub fn classify(score: f64, confidence: f64) -> Verdict {
    if score >= EXACT_MATCH {
        Verdict::Exact
    } else if score >= confidence {
        Verdict::Accepted
    } else {
        Verdict::Unknown
    }
}

#[derive(Debug, Clone)]
pub struct RenderOptions<'a> {
    pub confidence: f64,
    pub print_confidence: bool,
    /// List words differing from the template for accepted matches.
    pub words: bool,
    pub prune_path: Option<&'a str>,
}

/// One line of the report.
#[derive(Debug, Clone, Serialize)]
pub struct Row {
    pub package: String,
    pub path: String,
    pub license: String,
    pub verdict: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Nickname or SPDX identifier of the best template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_words: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_words: Vec<String>,
}

impl Row {
    /// License label followed by the `+words`/`-words` lists, joined by `sep`.
    pub fn license_text(&self, sep: &str) -> String {
        let mut text = self.license.clone();
        if !self.extra_words.is_empty() {
            text.push_str(&format!("{sep}+words: {}", self.extra_words.join(", ")));
        }
        if !self.missing_words.is_empty() {
            text.push_str(&format!("{sep}-words: {}", self.missing_words.join(", ")));
        }
        text
    }
}

fn percent(score: f64) -> i64 {
    (100.0 * score) as i64
}

fn row_for(record: &LicenseRecord, opts: &RenderOptions, product: &dyn Product) -> Row {
    let mut row = Row {
        package: record.package.clone(),
        path: String::new(),
        license: "?".to_string(),
        verdict: Verdict::Missing,
        score: None,
        short_name: None,
        extra_words: Vec::new(),
        missing_words: Vec::new(),
    };

    match &record.outcome {
        Outcome::Unresolved(err) => {
            row.license = err.replace('\n', " ");
            row.verdict = Verdict::Unresolved;
        }
        Outcome::Missing => {}
        Outcome::Declared(license) => {
            row.license = license.clone();
            row.verdict = Verdict::Declared;
        }
        Outcome::Matched(m) => {
            row.score = Some(m.score);
            row.verdict = Verdict::Unknown;
            if let Some(t) = &m.template {
                row.short_name = Some(t.short_name().to_string()).filter(|n| !n.is_empty());
                row.verdict = classify(m.score, opts.confidence);
                row.license = match row.verdict {
                    Verdict::Exact => t.title.clone(),
                    Verdict::Accepted => {
                        if opts.words {
                            row.extra_words = m.extra_words.clone();
                            row.missing_words = m.missing_words.clone();
                        }
                        if opts.print_confidence {
                            format!("{} ({:2}%)", t.title, percent(m.score))
                        } else {
                            t.title.clone()
                        }
                    }
                    _ if opts.print_confidence => {
                        format!("? ({}, {:2}%)", t.title, percent(m.score))
                    }
                    _ => "UNKNOWN".to_string(),
                };
            }
        }
    }

    if let Some(prune) = opts.prune_path.filter(|p| !p.is_empty()) {
        if let Some(rest) = row.package.strip_prefix(prune) {
            row.package = rest.to_string();
        }
    }
    row.path = match &record.manual_path {
        Some(path) => path.clone(),
        None => paths::display_path(&record.path, opts.prune_path, product.replacement_list()),
    };
    row.license = product.override_license(&row.package, row.license);
    row
}

/// Build the report rows, in record order.
pub fn build_rows(records: &[LicenseRecord], opts: &RenderOptions, product: &dyn Product) -> Vec<Row> {
    records.iter().map(|r| row_for(r, opts, product)).collect()
}

/// Records whose license text belongs in the consolidated file.
pub fn accepted_records(records: &[LicenseRecord], confidence: f64) -> Vec<&LicenseRecord> {
    records
        .iter()
        .filter(|r| {
            r.match_result().is_some_and(|m| {
                m.template.is_some() && classify(m.score, confidence).is_accepted()
            })
        })
        .collect()
}

/// Drop skipped packages and append the product's declared licenses.
pub fn apply_product(records: Vec<LicenseRecord>, product: &dyn Product) -> Vec<LicenseRecord> {
    let mut kept: Vec<LicenseRecord> = records
        .into_iter()
        .filter(|r| !product.skip_license(&r.package))
        .collect();
    kept.extend(product.extra_licenses().iter().map(|extra| LicenseRecord {
        package: extra.package.clone(),
        path: String::new(),
        manual_path: extra.path.clone(),
        outcome: Outcome::Declared(extra.license.clone()),
    }));
    kept
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::rc::Rc;

    use crate::config::{ExtraLicense, ProductConfig};
    use crate::license::matcher::MatchResult;
    use crate::license::template::Template;

    pub(crate) fn matched(package: &str, path: &str, title: &str, score: f64) -> LicenseRecord {
        let template = Template {
            title: title.to_string(),
            spdx_id: "MIT".to_string(),
            ..Template::default()
        };
        let result = MatchResult {
            template: Some(Rc::new(template)),
            score,
            extra_words: vec!["acme".to_string()],
            missing_words: vec!["software".to_string(), "permission".to_string()],
            file_content: format!("{title} text\n").into_bytes(),
        };
        LicenseRecord::matched(package, path, Rc::new(result))
    }

    pub(crate) fn options() -> RenderOptions<'static> {
        RenderOptions {
            confidence: 0.9,
            print_confidence: false,
            words: false,
            prune_path: None,
        }
    }

    #[test]
    fn test_classify_thresholds() {
        assert_eq!(classify(1.0, 0.9), Verdict::Exact);
        assert_eq!(classify(0.99, 0.9), Verdict::Exact);
        assert_eq!(classify(0.95, 0.9), Verdict::Accepted);
        assert_eq!(classify(0.9, 0.9), Verdict::Accepted);
        assert_eq!(classify(0.8, 0.9), Verdict::Unknown);
        assert_eq!(classify(0.8, 0.7), Verdict::Accepted);
    }

    #[test]
    fn test_labels() {
        let product = ProductConfig::default();
        let records = vec![
            matched("a/exact", "a/exact/LICENSE", "MIT License", 1.0),
            matched("a/close", "a/close/LICENSE", "MIT License", 0.955),
            matched("a/far", "a/far/LICENSE", "MIT License", 0.5),
            LicenseRecord::unresolved("a/broken", "cannot find\npackage"),
            LicenseRecord::missing("a/none"),
        ];

        let rows = build_rows(&records, &options(), &product);
        let labels: Vec<&str> = rows.iter().map(|r| r.license.as_str()).collect();
        assert_eq!(
            labels,
            vec!["MIT License", "MIT License", "UNKNOWN", "cannot find package", "?"]
        );
        assert!(rows[1].extra_words.is_empty());
        assert_eq!(rows[0].short_name.as_deref(), Some("MIT"));
        assert_eq!(rows[4].verdict, Verdict::Missing);

        let opts = RenderOptions {
            print_confidence: true,
            words: true,
            ..options()
        };
        let rows = build_rows(&records, &opts, &product);
        assert_eq!(rows[0].license, "MIT License");
        assert_eq!(rows[1].license, "MIT License (95%)");
        assert_eq!(rows[2].license, "? (MIT License, 50%)");
        assert_eq!(
            rows[1].license_text("\n"),
            "MIT License (95%)\n+words: acme\n-words: software, permission"
        );
        assert!(rows[2].extra_words.is_empty());
    }

    #[test]
    fn test_prune_and_override() {
        let product = ProductConfig::default();
        let records = vec![matched(
            "vendor/sigs.k8s.io/yaml",
            "vendor/sigs.k8s.io/yaml/LICENSE",
            "BSD 3-Clause",
            0.2,
        )];
        let opts = RenderOptions {
            prune_path: Some("vendor/"),
            ..options()
        };
        let rows = build_rows(&records, &opts, &product);
        assert_eq!(rows[0].package, "sigs.k8s.io/yaml");
        assert_eq!(rows[0].license, "MIT License");
        assert_eq!(
            rows[0].path,
            "github.com/kubernetes-sigs/yaml/blob/master/LICENSE"
        );
    }

    #[test]
    fn test_apply_product_and_accepted() {
        let product = ProductConfig {
            skip: vec!["mac/only".to_string()],
            extra: vec![ExtraLicense {
                package: "github.com/envoyproxy/envoy".to_string(),
                path: Some("https://github.com/envoyproxy/envoy/blob/main/LICENSE".to_string()),
                license: "Apache License 2.0".to_string(),
            }],
            ..ProductConfig::default()
        };
        let records = vec![
            matched("x/y", "x/y/LICENSE", "MIT License", 0.93),
            matched("mac/only", "mac/only/LICENSE", "MIT License", 1.0),
            matched("z/w", "z/w/LICENSE", "MIT License", 0.4),
        ];

        let records = apply_product(records, &product);
        let packages: Vec<&str> = records.iter().map(|r| r.package.as_str()).collect();
        assert_eq!(packages, vec!["x/y", "z/w", "github.com/envoyproxy/envoy"]);

        let accepted = accepted_records(&records, 0.9);
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].package, "x/y");

        let rows = build_rows(&records, &options(), &product);
        assert_eq!(rows[2].verdict, Verdict::Declared);
        assert_eq!(rows[2].license, "Apache License 2.0");
        assert_eq!(
            rows[2].path,
            "https://github.com/envoyproxy/envoy/blob/main/LICENSE"
        );
    }
}
