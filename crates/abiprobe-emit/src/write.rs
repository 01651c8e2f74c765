//! Writing generated modules to disk.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EmitError, Result};

/// What [`write`] did with the destination file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Updated,
    /// The file already held exactly this text and was not touched.
    Unchanged,
}

/// Write `text` to `path`, creating parent directories.
///
/// An existing file with identical content is left alone so its modification
/// time does not trigger needless rebuilds.
pub fn write(text: &str, path: &Path) -> Result<WriteOutcome> {
    let io_err = |source| EmitError::Write {
        path: path.to_path_buf(),
        source,
    };

    let outcome = match fs::read_to_string(path) {
        Ok(existing) if existing == text => WriteOutcome::Unchanged,
        Ok(_) => WriteOutcome::Updated,
        Err(_) => WriteOutcome::Created,
    };

    if outcome != WriteOutcome::Unchanged {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, text).map_err(io_err)?;
    }

    info!(path = %path.display(), ?outcome, "wrote generated module");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_update_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gen").join("target_abi.rs");

        assert_eq!(write("a", &path).unwrap(), WriteOutcome::Created);
        assert_eq!(fs::read_to_string(&path).unwrap(), "a");

        assert_eq!(write("a", &path).unwrap(), WriteOutcome::Unchanged);
        assert_eq!(write("b", &path).unwrap(), WriteOutcome::Updated);
        assert_eq!(fs::read_to_string(&path).unwrap(), "b");
    }

    #[test]
    fn write_into_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();
        let err = write("a", &blocker.join("out.rs")).unwrap_err();
        assert!(matches!(err, EmitError::Write { .. }));
        assert!(err.to_string().contains("out.rs"));
    }
}
