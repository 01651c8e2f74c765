//! `abiprobe classify` — run the classifier on given tokens.

use anyhow::{bail, Result};

use abiprobe_core::{assemble_supported, classify_abi, classify_os, ModuleSpec};

use crate::config::DEFAULT_MODULE_NAME;

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Human,
    Json,
}

impl ReportFormat {
    pub fn parse(format: Option<&str>) -> Result<Self> {
        match format.unwrap_or("human") {
            "human" => Ok(ReportFormat::Human),
            "json" => Ok(ReportFormat::Json),
            other => bail!("unknown format '{other}' (expected human or json)"),
        }
    }
}

/// Classify `os` and `abi` and print the per-version view.
pub fn run(os: &str, abi: &str, format: Option<&str>) -> Result<()> {
    let format = ReportFormat::parse(format)?;
    let spec = build_spec(os, abi);
    print_spec(&spec, format)
}

fn build_spec(os: &str, abi: &str) -> ModuleSpec {
    assemble_supported(DEFAULT_MODULE_NAME, &classify_os(os), &classify_abi(abi))
}

/// Print every bundle of `spec`.
pub fn print_spec(spec: &ModuleSpec, format: ReportFormat) -> Result<()> {
    match format {
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(spec)?);
        }
        ReportFormat::Human => {
            for bundle in &spec.bundles {
                println!("--- API version {} ---", bundle.version);
                print_result("OS", &bundle.os);
                print_result("ABI", &bundle.abi);
                print_result("ABI name", &bundle.abi_name);
            }
        }
    }
    Ok(())
}

fn print_result<T: std::fmt::Display, E: std::fmt::Display>(label: &str, result: &Result<T, E>) {
    match result {
        Ok(value) => println!("  {label:<9} {value}"),
        Err(e) => println!("  {label:<9} error: {e}"),
    }
}
