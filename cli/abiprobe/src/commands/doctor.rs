//! `abiprobe doctor` — toolchain diagnostics.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use abiprobe_core::{classify_abi, classify_os, Abi, ApiVersion, Classified, Os};
use abiprobe_probe::{probe, Compiler, ProbeConfig, RawProbe};

use crate::commands::classify::ReportFormat;
use crate::config::{AbiprobeConfig, CONFIG_FILE_NAME};

/// Everything `doctor` found out, printable as text or JSON.
#[derive(Debug, Serialize)]
struct DoctorReport<'a> {
    abiprobe_version: &'static str,
    api_versions: Vec<u32>,
    config_dir: Option<&'a Path>,
    compiler: Compiler,
    compiler_version: Option<String>,
    probe: ProbeReport,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
enum ProbeReport {
    Ok {
        tokens: RawProbe,
        os: std::result::Result<Os, String>,
        abi: std::result::Result<Abi, String>,
        abi_name: Option<&'static str>,
        /// `None` when either side is unclassified or `Unknown`.
        consistent: Option<bool>,
    },
    Failed {
        error: String,
    },
}

/// Print which compiler would be used and what it reports.
pub fn run(
    config_dir: Option<&Path>,
    config: Option<&AbiprobeConfig>,
    compiler: Option<&str>,
    format: Option<&str>,
) -> Result<()> {
    let format = ReportFormat::parse(format)?;
    let report = collect(config_dir, config, compiler);
    match format {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        ReportFormat::Human => print_human(&report),
    }
    Ok(())
}

fn collect<'a>(
    config_dir: Option<&'a Path>,
    config: Option<&AbiprobeConfig>,
    compiler: Option<&str>,
) -> DoctorReport<'a> {
    let default = AbiprobeConfig::default();
    let config = config.unwrap_or(&default);
    let compiler = Compiler::detect(compiler.or(config.probe.compiler.as_deref()))
        .with_flags(config.probe.flags.iter().cloned());
    let compiler_version = compiler.version();

    let mut probe_config = ProbeConfig::new(compiler.clone());
    if let Some(dir) = &config.probe.scratch_dir {
        probe_config = probe_config.with_scratch_location(dir);
    }
    let probe = match probe(&probe_config) {
        Ok(tokens) => probe_report(tokens),
        Err(e) => ProbeReport::Failed {
            error: e.to_string(),
        },
    };

    DoctorReport {
        abiprobe_version: env!("CARGO_PKG_VERSION"),
        api_versions: ApiVersion::SUPPORTED.iter().map(|v| v.number()).collect(),
        config_dir,
        compiler,
        compiler_version,
        probe,
    }
}

fn probe_report(tokens: RawProbe) -> ProbeReport {
    let os = classify_os(&tokens.os).map(|r| r.value);
    let abi = classify_abi(&tokens.abi);
    let abi_name = abi.as_ref().ok().map(|r| r.raw_name);
    let abi = abi.map(|r| r.value);
    let consistent = match (&os, &abi) {
        (Ok(os), Ok(abi)) => os_matches_abi(*os, *abi),
        _ => None,
    };
    ProbeReport::Ok {
        tokens,
        os: os.map_err(|e| e.to_string()),
        abi: abi.map_err(|e| e.to_string()),
        abi_name,
        consistent,
    }
}

/// Whether the ABI belongs to the reported OS. iOS shares the Darwin ABIs.
fn os_matches_abi(os: Os, abi: Abi) -> Option<bool> {
    match (os, abi.os()) {
        (Os::Unknown, _) | (_, Os::Unknown) => None,
        (Os::IOS, Os::OSX) => Some(true),
        (os, abi_os) => Some(os == abi_os),
    }
}

fn print_human(report: &DoctorReport<'_>) {
    println!("=== abiprobe doctor ===");
    println!();
    println!("abiprobe version: {}", report.abiprobe_version);
    println!("API versions:     {}", join_versions(ApiVersion::SUPPORTED));
    println!();

    println!("--- Configuration ---");
    match report.config_dir {
        Some(dir) => println!("  {CONFIG_FILE_NAME}: found at {}", dir.display()),
        None => println!("  {CONFIG_FILE_NAME}: not found"),
    }
    println!();

    let compiler = &report.compiler;
    println!("--- Compiler ---");
    println!("  Program: {}", compiler.program().display());
    println!("  Source:  {:?}", compiler.source());
    println!("  Flavor:  {:?}", compiler.flavor());
    if !compiler.flags().is_empty() {
        println!("  Flags:   {}", compiler.flags().join(" "));
    }
    match &report.compiler_version {
        Some(version) => println!("  Version: {version}"),
        None => println!("  Version: not available (compiler could not be run)"),
    }
    println!();

    println!("--- Probe ---");
    match &report.probe {
        ProbeReport::Ok {
            tokens,
            os,
            abi,
            abi_name,
            consistent,
        } => {
            println!("  OS token:  {}", tokens.os);
            println!("  ABI token: {}", tokens.abi);
            match os {
                Ok(os) => println!("  OS:        {os} (since v{})", os.introduced()),
                Err(e) => println!("  OS:        {e}"),
            }
            match (abi, abi_name) {
                (Ok(abi), Some(name)) => println!("  ABI:       {abi} \"{name}\""),
                (Ok(abi), None) => println!("  ABI:       {abi}"),
                (Err(e), _) => println!("  ABI:       {e}"),
            }
            match consistent {
                Some(true) => println!("  Match:     ABI belongs to the reported OS"),
                Some(false) => println!("  Match:     warning: ABI does not belong to the reported OS"),
                None => {}
            }
        }
        ProbeReport::Failed { error } => println!("  failed: {error}"),
    }
}

fn join_versions(versions: &[ApiVersion]) -> String {
    versions
        .iter()
        .map(|v| v.module_name())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_compiler_config(dir: &Path) -> AbiprobeConfig {
        AbiprobeConfig::parse(&format!(
            "[probe]\ncompiler = \"abiprobe-no-such-compiler\"\nscratch-dir = {:?}\n",
            dir.display().to_string()
        ))
        .unwrap()
    }

    #[test]
    fn versions_listed() {
        assert_eq!(join_versions(ApiVersion::SUPPORTED), "v1, v2, v3");
    }

    #[test]
    fn doctor_runs_without_compiler() {
        let dir = tempfile::tempdir().unwrap();
        let config = missing_compiler_config(dir.path());
        run(None, Some(&config), None, None).unwrap();
        run(None, Some(&config), None, Some("json")).unwrap();
        assert!(run(None, Some(&config), None, Some("yaml")).is_err());
    }

    #[test]
    fn json_report_shape() {
        let dir = tempfile::tempdir().unwrap();
        let config = missing_compiler_config(dir.path());
        let report = collect(Some(dir.path()), Some(&config), None);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["api_versions"], serde_json::json!([1, 2, 3]));
        assert_eq!(json["compiler"]["program"], "abiprobe-no-such-compiler");
        assert_eq!(json["compiler"]["source"], "explicit");
        assert_eq!(json["compiler"]["flavor"], "gnu");
        assert!(json["compiler_version"].is_null());
        assert_eq!(json["probe"]["status"], "failed");
        assert!(json["probe"]["error"].is_string());
    }

    #[test]
    fn probe_report_classifies_tokens() {
        let report = probe_report(RawProbe {
            os: "Linux".into(),
            abi: "linux_arm64".into(),
        });
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["tokens"]["abi"], "linux_arm64");
        assert_eq!(json["os"]["Ok"], "Linux");
        assert_eq!(json["abi"]["Ok"], "Linux_arm64");
        assert_eq!(json["abi_name"], "linux_arm64");
        assert_eq!(json["consistent"], true);

        let report = probe_report(RawProbe {
            os: "Linux".into(),
            abi: "s390x_oddball".into(),
        });
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["abi"]["Err"].as_str().unwrap().contains("s390x_oddball"));
        assert!(json["consistent"].is_null());
    }

    #[test]
    fn abi_must_belong_to_os() {
        assert_eq!(os_matches_abi(Os::Linux, Abi::Linux_x86_64), Some(true));
        assert_eq!(os_matches_abi(Os::OSX, Abi::Darwin_arm64), Some(true));
        assert_eq!(os_matches_abi(Os::IOS, Abi::Darwin_arm64), Some(true));
        assert_eq!(os_matches_abi(Os::Android, Abi::Android_x86), Some(true));
        assert_eq!(os_matches_abi(Os::Windows, Abi::Linux_arm64), Some(false));
        assert_eq!(os_matches_abi(Os::IOS, Abi::Android_arm64v8a), Some(false));
        assert_eq!(os_matches_abi(Os::Linux, Abi::Unknown), None);
        assert_eq!(os_matches_abi(Os::Unknown, Abi::Linux_x86), None);
    }
}
