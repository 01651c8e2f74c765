//! Scoped scratch directory for probe sources.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;

/// A uniquely named directory inside a caller-supplied location.
///
/// The directory and everything written into it are removed when the value is
/// dropped, on success and error paths alike.
#[derive(Debug)]
pub struct ScratchDir {
    dir: tempfile::TempDir,
}

impl ScratchDir {
    /// Create a fresh scratch directory under `location`, creating `location`
    /// itself if needed.
    pub fn create_in(location: &Path) -> Result<Self> {
        fs::create_dir_all(location)?;
        let dir = tempfile::Builder::new()
            .prefix("abiprobe-")
            .tempdir_in(location)?;
        debug!(path = %dir.path().display(), "created scratch directory");
        Ok(Self { dir })
    }

    /// Path of the scratch directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` to `name` inside the scratch directory.
    pub fn write(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }
}
