//! Native toolchain probing for abiprobe.
//!
//! Writes a small C header that turns compiler predefined macros into two
//! string macros, runs the C preprocessor over it inside a scoped scratch
//! directory, and returns the two raw tokens. Interpreting the tokens is left
//! to `abiprobe-core`.

pub mod compiler;
pub mod error;
pub mod header;
pub mod parse;
pub mod scratch;

use std::path::PathBuf;

use tracing::info;

pub use compiler::{Compiler, CompilerFlavor, CompilerSource};
pub use error::{ProbeError, Result};
pub use header::{PROBE_HEADER, PROBE_HEADER_NAME};
pub use parse::{parse_probe_output, RawProbe};
pub use scratch::ScratchDir;

/// Inputs of a probe run.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Compiler driver to run.
    pub compiler: Compiler,
    /// Location in which a temporary scratch directory is created.
    pub scratch_location: PathBuf,
}

impl ProbeConfig {
    /// Probe with `compiler`, using the system temporary directory for scratch files.
    pub fn new(compiler: Compiler) -> Self {
        Self {
            compiler,
            scratch_location: std::env::temp_dir(),
        }
    }

    /// Use `location` for scratch files instead.
    pub fn with_scratch_location(mut self, location: impl Into<PathBuf>) -> Self {
        self.scratch_location = location.into();
        self
    }
}

/// Ask the toolchain which OS and ABI it targets.
///
/// The scratch directory is removed before this returns, whatever the outcome.
pub fn probe(config: &ProbeConfig) -> Result<RawProbe> {
    let scratch = ScratchDir::create_in(&config.scratch_location)?;
    scratch.write(PROBE_HEADER_NAME, PROBE_HEADER)?;
    let driver = scratch.write(header::DRIVER_SOURCE_NAME, &header::driver_source())?;

    let output = config.compiler.preprocess(&driver)?;
    let raw = parse_probe_output(&output)?;
    info!(os = %raw.os, abi = %raw.abi, "probed toolchain");
    Ok(raw)
}
