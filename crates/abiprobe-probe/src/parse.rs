//! Extraction of the probed tokens from preprocessor output.

use serde::Serialize;

use crate::error::{ProbeError, Result};
use crate::header::{ABI_MACRO, ABI_MARKER, OS_MACRO, OS_MARKER};

/// The two raw tokens reported by the toolchain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawProbe {
    /// Value of `ABIPROBE_OS_NAME`.
    pub os: String,
    /// Value of `ABIPROBE_ABI`.
    pub abi: String,
}

/// Parse the preprocessed driver source.
pub fn parse_probe_output(output: &str) -> Result<RawProbe> {
    Ok(RawProbe {
        os: marker_value(output, OS_MARKER, OS_MACRO)?,
        abi: marker_value(output, ABI_MARKER, ABI_MACRO)?,
    })
}

fn marker_value(output: &str, marker: &'static str, macro_name: &'static str) -> Result<String> {
    let value = output
        .lines()
        .filter_map(|line| line.trim().strip_prefix(marker))
        .find_map(|rest| rest.trim_start().strip_prefix('='))
        .map(str::trim)
        .ok_or(ProbeError::MarkerMissing { marker })?;

    if value == macro_name {
        return Err(ProbeError::MacroUndefined { macro_name });
    }

    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .filter(|v| !v.contains('"'))
        .map(str::to_string)
        .ok_or_else(|| ProbeError::MalformedValue {
            macro_name,
            value: value.to_string(),
        })
}
