//! Error types for toolchain probing.

use std::path::PathBuf;

/// Errors that can occur while probing the C toolchain.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The compiler executable could not be started.
    #[error("failed to invoke C compiler '{}': {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The compiler ran but reported failure.
    #[error("C compiler '{}' exited with {status}: {stderr}", program.display())]
    CompilerFailed {
        program: PathBuf,
        /// Exit status as reported by the OS.
        status: String,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// A marker line was absent from the preprocessor output.
    #[error("probe output has no '{marker}' line")]
    MarkerMissing {
        /// The marker that was searched for.
        marker: &'static str,
    },

    /// The macro reached the output unexpanded, so the header did not define it.
    #[error("macro {macro_name} is not defined for this target")]
    MacroUndefined {
        /// Name of the undefined macro.
        macro_name: &'static str,
    },

    /// The macro expanded to something other than a single string literal.
    #[error("macro {macro_name} expanded to '{value}', expected a string literal")]
    MalformedValue {
        macro_name: &'static str,
        /// The text found after the marker.
        value: String,
    },

    /// I/O error in the scratch location.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for probe operations.
pub type Result<T> = std::result::Result<T, ProbeError>;
