//! Emission error types.

use std::path::PathBuf;

/// Errors that can occur while rendering or writing generated modules.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// The module spec has no versioned bundles to render.
    #[error("module '{name}' has no API versions to emit")]
    NoVersions { name: String },

    /// Writing the output file failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for emission operations.
pub type Result<T> = std::result::Result<T, EmitError>;
