//! `abiprobe.toml` configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// File name searched for upward from the working directory.
pub const CONFIG_FILE_NAME: &str = "abiprobe.toml";

/// Default name of the generated module.
pub const DEFAULT_MODULE_NAME: &str = "target_abi";

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct AbiprobeConfig {
    /// How to run the toolchain probe.
    #[serde(default)]
    pub probe: ProbeSection,
    /// Where and how to write generated code.
    #[serde(default)]
    pub output: OutputSection,
}

/// `[probe]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ProbeSection {
    /// Compiler command, e.g. `"clang"` or `"ccache gcc"`.
    #[serde(default)]
    pub compiler: Option<String>,
    /// Extra flags passed to the compiler.
    #[serde(default)]
    pub flags: Vec<String>,
    /// Location for temporary probe sources.
    #[serde(default)]
    pub scratch_dir: Option<PathBuf>,
}

/// `[output]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct OutputSection {
    /// Destination file of the generated module.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Name recorded in the generated module.
    #[serde(default)]
    pub module_name: Option<String>,
}

impl AbiprobeConfig {
    /// Parse a configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("parsing abiprobe configuration")
    }

    /// Search upward from `start_dir` for `abiprobe.toml`, returning the parsed
    /// configuration and the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let config = Self::parse(&content)
                    .with_context(|| format!("in {}", candidate.display()))?;
                return Ok(Some((config, dir)));
            }
            if !dir.pop() {
                return Ok(None);
            }
        }
    }

    /// Make relative paths absolute with respect to `base`.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        self.probe.scratch_dir = self.probe.scratch_dir.map(|p| base.join(p));
        self.output.path = self.output.path.map(|p| base.join(p));
        self
    }
}
