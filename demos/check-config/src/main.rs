//! Check Config
//!
//! Loads configuration files through every built-in strategy and reports keys
//! whose value is empty.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package check-config -- application.properties application.yml
//! cargo run --package check-config -- --deny-empty --dotted config/*.yml
//! ```
//!
//! Without file arguments the locations come from `propcheck.toml` /
//! `propcheck.yaml` or `PROPCHECK_CHECK__LOCATIONS`. The exit status is
//! non-zero when a file cannot be loaded, or when `--deny-empty` is given and
//! an empty value was found.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use propcheck::core::{MatchMode, MergePolicy};
use propcheck::runtime::config::ConfigLoader;
use propcheck::runtime::{CheckPolicy, CheckReport, FileStatus, StartupCheck, logging};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "check-config")]
#[command(about = "Report empty values in configuration files")]
struct Args {
    /// Configuration files to check, in load order
    files: Vec<PathBuf>,

    /// Fail when any empty value is found
    #[arg(long)]
    deny_empty: bool,

    /// Only match extensions that follow a dot
    #[arg(long)]
    dotted: bool,

    /// Skip files that do not exist
    #[arg(long)]
    ignore_missing: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Print the merged key/value view after the findings
    #[arg(long)]
    merged: bool,

    /// Checker configuration file (TOML or YAML)
    #[arg(long, short)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.file(path);
    }
    if !args.files.is_empty() {
        loader = loader.set("check.locations", &args.files);
    }
    if args.deny_empty {
        loader = loader.set("check.policy", CheckPolicy::Deny);
    }
    if args.dotted {
        loader = loader.set("check.match_mode", MatchMode::Dotted);
    }
    if args.ignore_missing {
        loader = loader.set("check.ignore_missing", true);
    }
    let config = loader.load().context("invalid checker configuration")?;

    logging::init_from_config(&config.logging);
    debug!(?config, "Starting check");

    if config.check.locations.is_empty() {
        anyhow::bail!("no configuration files given");
    }

    // Run leniently so findings are printed before the policy is applied.
    let report = StartupCheck::from_config(&config.check)?
        .policy(CheckPolicy::Warn)
        .run()?;

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print_report(&report);
        if args.merged {
            print_merged(&report, config.check.merge_policy);
        }
    }

    report.enforce(config.check.policy)?;
    Ok(())
}

fn print_report(report: &CheckReport) {
    for file in &report.files {
        let status = match file.status {
            FileStatus::Loaded => "loaded",
            FileStatus::Empty => "no entries",
            FileStatus::Missing => "missing, skipped",
        };
        println!(
            "{}: {status} ({} set(s), {} empty)",
            file.path.display(),
            file.property_sets,
            file.findings
        );
    }

    for finding in &report.findings {
        println!("  {}: {finding}", finding.source_name);
    }

    if report.is_clean() {
        println!("No empty values found.");
    } else {
        println!("{} empty value(s) found.", report.findings.len());
    }
}

fn print_merged(report: &CheckReport, policy: MergePolicy) {
    println!();
    for (key, merged) in report.merged(policy).iter() {
        println!("{key} = {} [{}]", merged.value, merged.origin);
    }
}
