//! `abiprobe generate` — probe, classify, and emit the versioned modules.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::warn;

use abiprobe_core::{assemble_supported, classify_abi, classify_os, ModuleSpec};
use abiprobe_emit::WriteOutcome;
use abiprobe_probe::{probe, Compiler, ProbeConfig, RawProbe};

use crate::config::{AbiprobeConfig, DEFAULT_MODULE_NAME};

/// Command-line inputs of `abiprobe generate`; unset fields fall back to the
/// configuration file.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Destination file.
    pub out: Option<PathBuf>,
    /// Module name recorded in the output.
    pub name: Option<String>,
    /// Location for temporary probe sources.
    pub scratch_dir: Option<PathBuf>,
    /// Compiler command.
    pub compiler: Option<String>,
    /// Use these tokens instead of probing the toolchain.
    pub tokens: Option<RawProbe>,
    /// Fail when the newest API version cannot report both values.
    pub strict: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
struct Settings {
    out: PathBuf,
    name: String,
    probe: ProbeConfig,
}

impl Settings {
    fn resolve(project_dir: &Path, config: Option<&AbiprobeConfig>, opts: &GenerateOptions) -> Self {
        let default = AbiprobeConfig::default();
        let config = config.unwrap_or(&default);

        let name = opts
            .name
            .clone()
            .or_else(|| config.output.module_name.clone())
            .unwrap_or_else(|| DEFAULT_MODULE_NAME.to_string());
        let out = opts
            .out
            .clone()
            .or_else(|| config.output.path.clone())
            .unwrap_or_else(|| project_dir.join(format!("{name}.rs")));

        let compiler_cmd = opts.compiler.as_deref().or(config.probe.compiler.as_deref());
        let compiler = Compiler::detect(compiler_cmd).with_flags(config.probe.flags.iter().cloned());
        let mut probe = ProbeConfig::new(compiler);
        if let Some(dir) = opts.scratch_dir.clone().or_else(|| config.probe.scratch_dir.clone()) {
            probe = probe.with_scratch_location(dir);
        }

        Self { out, name, probe }
    }
}

/// Run the full pipeline and write the generated file.
pub fn run(project_dir: &Path, config: Option<&AbiprobeConfig>, opts: &GenerateOptions) -> Result<()> {
    let settings = Settings::resolve(project_dir, config, opts);

    let raw = match &opts.tokens {
        Some(tokens) => tokens.clone(),
        None => probe(&settings.probe).with_context(|| {
            format!(
                "probing the C toolchain ({})",
                settings.probe.compiler.program().display()
            )
        })?,
    };

    let spec = build_spec(&settings.name, &raw);
    report_failures(&spec);
    if opts.strict {
        if let Some(latest) = spec.latest().filter(|b| !b.is_complete()) {
            bail!(
                "target {}/{} cannot be classified at API version {}",
                raw.os,
                raw.abi,
                latest.version
            );
        }
    }

    let text = abiprobe_emit::render(&spec)?;
    let outcome = abiprobe_emit::write(&text, &settings.out)?;
    let verb = match outcome {
        WriteOutcome::Created => "Created",
        WriteOutcome::Updated => "Updated",
        WriteOutcome::Unchanged => "Unchanged",
    };
    println!(
        "{verb} {} (OS {}, ABI {}, {} API versions)",
        settings.out.display(),
        raw.os,
        raw.abi,
        spec.bundles.len()
    );
    Ok(())
}

fn build_spec(name: &str, raw: &RawProbe) -> ModuleSpec {
    assemble_supported(name, &classify_os(&raw.os), &classify_abi(&raw.abi))
}

fn report_failures(spec: &ModuleSpec) {
    for bundle in &spec.bundles {
        if let Err(e) = &bundle.os {
            warn!(version = %bundle.version, "{e}");
        }
        if let Err(e) = &bundle.abi {
            warn!(version = %bundle.version, "{e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(os: &str, abi: &str) -> Option<RawProbe> {
        Some(RawProbe {
            os: os.into(),
            abi: abi.into(),
        })
    }

    #[test]
    fn writes_default_path() {
        let dir = tempfile::tempdir().unwrap();
        let opts = GenerateOptions {
            tokens: tokens("Linux", "linux_x86_64"),
            ..Default::default()
        };
        run(dir.path(), None, &opts).unwrap();

        let text = std::fs::read_to_string(dir.path().join("target_abi.rs")).unwrap();
        assert!(text.contains("pub mod v1 {"));
        assert!(text.contains("pub mod v3 {"));
        assert!(text.contains("Ok(\"linux_x86_64\")"));
    }

    #[test]
    fn options_override_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = AbiprobeConfig::parse(
            "[output]\npath = \"from_config.rs\"\nmodule-name = \"cfg\"\n",
        )
        .unwrap()
        .resolve_paths(dir.path());

        let opts = GenerateOptions {
            name: Some("cli_name".into()),
            tokens: tokens("Windows", "windows_arm64"),
            ..Default::default()
        };
        run(dir.path(), Some(&config), &opts).unwrap();
        let text = std::fs::read_to_string(dir.path().join("from_config.rs")).unwrap();
        assert!(text.contains("`cli_name`"));
    }

    #[test]
    fn unrecognized_token_still_generates() {
        let dir = tempfile::tempdir().unwrap();
        let opts = GenerateOptions {
            tokens: tokens("Linux", "s390x_oddball"),
            ..Default::default()
        };
        run(dir.path(), None, &opts).unwrap();
        let text = std::fs::read_to_string(dir.path().join("target_abi.rs")).unwrap();
        assert!(text.contains("s390x_oddball"));
    }

    #[test]
    fn strict_rejects_unclassifiable_target() {
        let dir = tempfile::tempdir().unwrap();
        let opts = GenerateOptions {
            tokens: tokens("Linux", "s390x_oddball"),
            strict: true,
            ..Default::default()
        };
        let err = run(dir.path(), None, &opts).unwrap_err();
        assert!(err.to_string().contains("API version 3"));
        assert!(!dir.path().join("target_abi.rs").exists());
    }

    #[test]
    fn strict_accepts_version_gated_older_modules() {
        // linux_x86 is gated out of v1 only; the newest version is complete.
        let dir = tempfile::tempdir().unwrap();
        let opts = GenerateOptions {
            tokens: tokens("Linux", "linux_x86"),
            strict: true,
            ..Default::default()
        };
        run(dir.path(), None, &opts).unwrap();
    }

    #[test]
    fn dashed_module_name_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let opts = GenerateOptions {
            name: Some("my-target".into()),
            tokens: tokens("Linux", "linux_arm64"),
            ..Default::default()
        };
        run(dir.path(), None, &opts).unwrap();
        let text = std::fs::read_to_string(dir.path().join("my-target.rs")).unwrap();
        assert!(text.contains("`my-target`"));
    }

    #[test]
    fn missing_compiler_reports_context() {
        let dir = tempfile::tempdir().unwrap();
        let opts = GenerateOptions {
            compiler: Some("abiprobe-no-such-compiler".into()),
            scratch_dir: Some(dir.path().join("scratch")),
            ..Default::default()
        };
        let err = run(dir.path(), None, &opts).unwrap_err();
        assert!(format!("{err:#}").contains("probing the C toolchain"));
    }
}
