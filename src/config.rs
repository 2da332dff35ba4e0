use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Root configuration structure, deserialized from `.dep-licenses/config.toml`.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Minimum score for a match to be accepted. Defaults to `0.9`.
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    /// Prefix removed from displayed packages and license paths.
    #[serde(default)]
    pub prune_path: Option<String>,
    #[serde(default)]
    pub product: ProductConfig,
}

fn default_confidence() -> f64 {
    0.9
}

/// Product-specific adjustments to the report.
#[derive(Debug, Deserialize)]
pub struct ProductConfig {
    /// Shown in status output to tell which customisation is in effect.
    #[serde(default = "default_product_name")]
    pub name: String,
    /// Ordered `[old, new]` substitutions applied to displayed license paths.
    #[serde(default = "common_replacements")]
    pub replacements: Vec<(String, String)>,
    /// Forced license label per package, for files the matcher gets wrong.
    #[serde(default = "common_overrides")]
    pub overrides: HashMap<String, String>,
    /// Packages dropped from the report.
    #[serde(default)]
    pub skip: Vec<String>,
    /// Dependencies invisible to the enumerator, e.g. linked C++ proxies.
    #[serde(default)]
    pub extra: Vec<ExtraLicense>,
}

/// A license declared by hand.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtraLicense {
    pub package: String,
    /// Displayed as-is, typically a URL to the license file.
    #[serde(default)]
    pub path: Option<String>,
    pub license: String,
}

fn default_product_name() -> String {
    "generic".to_string()
}

const MIT_FORM: &str = "MIT License";
const APACHE_2_0_FORM: &str = "Apache License 2.0";

fn common_replacements() -> Vec<(String, String)> {
    [
        ("k8s.io", "github.com/kubernetes"),
        ("golang.org/x", "github.com/golang"),
        ("go.uber.org", "github.com/uber-go"),
        ("cloud.google.com/go", "github.com/googleapis/google-cloud-go"),
        ("google.golang.org/grpc", "github.com/grpc/grpc-go"),
        ("istio.io", "github.com/istio"),
        (
            "contrib.go.opencensus.io/exporter/prometheus",
            "github.com/census-ecosystem/opencensus-go-exporter-prometheus",
        ),
        ("google.golang.org/genproto", "github.com/googleapis/go-genproto"),
        ("sigs.k8s.io", "github.com/kubernetes-sigs"),
        ("knative.dev", "github.com/knative"),
    ]
    .into_iter()
    .map(|(old, new)| (old.to_string(), new.to_string()))
    .collect()
}

fn common_overrides() -> HashMap<String, String> {
    [
        ("github.com/ghodss/yaml", MIT_FORM),
        ("github.com/jmespath/go-jmespath", APACHE_2_0_FORM),
        ("sigs.k8s.io/yaml", MIT_FORM),
    ]
    .into_iter()
    .map(|(pkg, license)| (pkg.to_string(), license.to_string()))
    .collect()
}

impl Default for ProductConfig {
    fn default() -> Self {
        ProductConfig {
            name: default_product_name(),
            replacements: common_replacements(),
            overrides: common_overrides(),
            skip: Vec::new(),
            extra: Vec::new(),
        }
    }
}

impl Default for Config {
    /// Built-in configuration used when no config file is found.
    fn default() -> Self {
        Config {
            confidence: default_confidence(),
            prune_path: None,
            product: ProductConfig::default(),
        }
    }
}

/// Customisation hooks for the product whose dependencies are listed.
pub trait Product {
    fn product_name(&self) -> &str;

    /// Whether a package's license should be left out of the report.
    fn skip_license(&self, package: &str) -> bool;

    /// Licenses of dependencies the enumerator cannot see.
    fn extra_licenses(&self) -> &[ExtraLicense];

    /// Ordered `(old, new)` path substitutions.
    fn replacement_list(&self) -> &[(String, String)];

    /// Final license label for a package, given the detected one.
    fn override_license(&self, package: &str, license: String) -> String;
}

impl Product for ProductConfig {
    fn product_name(&self) -> &str {
        &self.name
    }

    fn skip_license(&self, package: &str) -> bool {
        self.skip.iter().any(|p| p == package)
    }

    fn extra_licenses(&self) -> &[ExtraLicense] {
        &self.extra
    }

    fn replacement_list(&self) -> &[(String, String)] {
        &self.replacements
    }

    fn override_license(&self, package: &str, license: String) -> String {
        self.overrides.get(package).cloned().unwrap_or(license)
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `./.dep-licenses/config.toml`
/// 3. `~/.config/dep-licenses/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".dep-licenses").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("dep-licenses").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

impl Config {
    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.confidence) {
            bail!("confidence {} is not between 0 and 1", self.confidence);
        }
        Ok(())
    }
}
