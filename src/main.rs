//! `dep-licenses` — list the dependencies of Go packages and identify their licenses.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config and product customisation ([`config::load_config`]).
//! 3. Parse the embedded license catalog ([`license::template`]).
//! 4. Enumerate dependencies with the go tool ([`enumerator`]).
//! 5. Locate and match every license file, once per file ([`scan`]).
//! 6. Group packages sharing a license file unless `--all` ([`license::grouping`]).
//! 7. Render the report and the consolidated license file ([`report`]).

mod cli;
mod config;
mod enumerator;
mod error;
mod license;
mod models;
mod report;
mod scan;

use std::io;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use cli::{Cli, OutputFormat};
use config::{load_config, Product};
use enumerator::go::GoEnumerator;
use error::ScanError;
use license::grouping::group_licenses;
use license::template::load_templates;
use report::{accepted_records, apply_product, build_rows, RenderOptions};

fn main() {
    if let Err(err) = run() {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        if let Some(ScanError::PackageNotFound { .. }) = err.downcast_ref::<ScanError>() {
            eprintln!(
                "  {} check the import paths and that GOPATH points at their sources (--gopath)",
                "hint:".yellow()
            );
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(Path::new("."), cli.config.as_deref())?;
    let confidence = cli.confidence.unwrap_or(config.confidence);
    let prune_path = cli.prune_path.clone().or_else(|| config.prune_path.clone());
    let product = &config.product;

    let templates = load_templates()?;

    let spinner = if !cli.quiet {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        pb.set_message(format!("Listing dependencies of {}", cli.packages.join(" ")));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let enumerator = GoEnumerator::new(cli.gopath.clone());
    let scanned = scan::list_licenses(&enumerator, &templates, &cli.packages);
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let mut records = scanned?;

    if !cli.quiet {
        eprintln!(
            "  {} {} packages matched against {} licenses (product: {})",
            "→".cyan(),
            records.len(),
            templates.len(),
            product.product_name()
        );
    }

    if !cli.all {
        records = group_licenses(records)?;
        if !cli.quiet {
            eprintln!("  {} {} license entries after grouping", "→".cyan(), records.len());
        }
    }
    let records = apply_product(records, product);

    let opts = RenderOptions {
        confidence,
        print_confidence: cli.print_confidence,
        words: cli.words,
        prune_path: prune_path.as_deref(),
    };
    let rows = build_rows(&records, &opts, product);

    match cli.format {
        OutputFormat::Table => report::terminal::render(&rows, cli.quiet),
        OutputFormat::Csv => report::csv::render(&rows, &mut io::stdout().lock())?,
        OutputFormat::Markdown => report::markdown::render(&rows, &mut io::stdout().lock())?,
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
    }

    if let Some(path) = &cli.consolidated_license_file {
        let accepted = accepted_records(&records, confidence);
        report::consolidated::write_file(path, &accepted)?;
        if !cli.quiet {
            eprintln!(
                "  {} {} license texts written to {}",
                "→".cyan(),
                accepted.len(),
                path.display()
            );
        }
    }

    Ok(())
}
