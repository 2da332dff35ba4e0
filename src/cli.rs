use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "dep-licenses",
    about = "List dependencies of Go packages and match their license files against known licenses",
    long_about = "Lists all dependencies of the given packages or commands, excluding standard \
library packages, and prints their licenses. Licenses are detected by looking for files named \
like LICENSE, COPYING or COPYRIGHT in the package directory and its parents until one is found. \
The file content is matched against well-known licenses and the best match is reported.",
    version
)]
pub struct Cli {
    /// Import paths or patterns to analyze
    #[arg(required = true, value_name = "PACKAGE")]
    pub packages: Vec<String>,

    /// Display all individual packages instead of grouping them by license file
    #[arg(short, long)]
    pub all: bool,

    /// Display words of the license file not matching the template, and the reverse
    #[arg(short, long)]
    pub words: bool,

    /// Display the confidence level of each match
    #[arg(long)]
    pub print_confidence: bool,

    /// Output format
    #[arg(long, default_value = "table", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Prefix removed from packages and license paths, e.g. 'github.com/acme/app/vendor/'
    #[arg(long, value_name = "PREFIX")]
    pub prune_path: Option<String>,

    /// Write the text of every accepted license to this file
    #[arg(long, value_name = "FILE")]
    pub consolidated_license_file: Option<PathBuf>,

    /// Config file [default: ./.dep-licenses/config.toml, fallback ~/.config/dep-licenses/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Minimum match score to accept a license [default: 0.9]
    #[arg(long, value_name = "SCORE", value_parser = parse_confidence)]
    pub confidence: Option<f64>,

    /// GOPATH passed to the go tool
    #[arg(long, value_name = "DIR")]
    pub gopath: Option<PathBuf>,

    /// Only print the report
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Markdown,
    Json,
}

fn parse_confidence(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not between 0 and 1"))
    }
}
