//! C compiler discovery and preprocessor invocation.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{ProbeError, Result};

/// Command-line dialect of a C compiler driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompilerFlavor {
    /// GCC, Clang and compatible drivers (`-E -P`).
    Gnu,
    /// MSVC `cl.exe` and `clang-cl` (`/nologo /EP`).
    Msvc,
}

impl CompilerFlavor {
    /// Guess the flavor from the executable name.
    pub fn from_program(program: &Path) -> Self {
        let stem = program
            .file_stem()
            .map(|s| s.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match stem.as_str() {
            "cl" | "clang-cl" => CompilerFlavor::Msvc,
            _ => CompilerFlavor::Gnu,
        }
    }

    fn preprocess_args(self) -> &'static [&'static str] {
        match self {
            CompilerFlavor::Gnu => &["-E", "-P"],
            CompilerFlavor::Msvc => &["/nologo", "/EP"],
        }
    }
}

/// Where the compiler choice came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompilerSource {
    /// Given explicitly (command line or configuration file).
    Explicit,
    /// The `CC` environment variable.
    Environment,
    /// The platform default.
    Default,
}

/// A C compiler driver able to run the preprocessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Compiler {
    program: PathBuf,
    flavor: CompilerFlavor,
    flags: Vec<String>,
    source: CompilerSource,
}

impl Compiler {
    /// Build from a command string such as `"gcc"` or `"ccache clang -m32"`.
    ///
    /// A command naming an existing file is taken whole, so paths with spaces
    /// (`C:\Program Files\LLVM\bin\clang.exe`) work. Otherwise the first word is
    /// the program and the rest become leading flags.
    pub fn from_command(command: &str, source: CompilerSource) -> Option<Self> {
        let trimmed = command.trim();
        let (program, flags) = if !trimmed.is_empty() && Path::new(trimmed).is_file() {
            (PathBuf::from(trimmed), Vec::new())
        } else {
            let mut words = trimmed.split_whitespace();
            let program = PathBuf::from(words.next()?);
            (program, words.map(String::from).collect::<Vec<String>>())
        };

        // A wrapper like ccache runs the real driver given as its first argument.
        let flavor_program = match program.file_stem().and_then(|s| s.to_str()) {
            Some("ccache" | "sccache") if !flags.is_empty() => PathBuf::from(&flags[0]),
            _ => program.clone(),
        };

        Some(Self {
            flavor: CompilerFlavor::from_program(&flavor_program),
            program,
            flags,
            source,
        })
    }

    /// Resolve the compiler: `explicit`, then `$CC`, then the platform default.
    pub fn detect(explicit: Option<&str>) -> Self {
        let env_cc = std::env::var("CC").ok();
        Self::resolve(explicit, env_cc.as_deref())
    }

    fn resolve(explicit: Option<&str>, env_cc: Option<&str>) -> Self {
        let compiler = explicit
            .and_then(|c| Self::from_command(c, CompilerSource::Explicit))
            .or_else(|| env_cc.and_then(|c| Self::from_command(c, CompilerSource::Environment)))
            .unwrap_or_else(Self::platform_default);
        debug!(
            program = %compiler.program.display(),
            flavor = ?compiler.flavor,
            source = ?compiler.source,
            "resolved C compiler"
        );
        compiler
    }

    fn platform_default() -> Self {
        let program = if cfg!(target_env = "msvc") { "cl" } else { "cc" };
        Self {
            program: PathBuf::from(program),
            flavor: CompilerFlavor::from_program(Path::new(program)),
            flags: Vec::new(),
            source: CompilerSource::Default,
        }
    }

    /// Append extra flags (e.g. `-m32`, `--target=...`).
    pub fn with_flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flags.extend(flags.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn flavor(&self) -> CompilerFlavor {
        self.flavor
    }

    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    pub fn source(&self) -> CompilerSource {
        self.source
    }

    /// The command that preprocesses `source` with its directory on the include path.
    pub fn preprocess_command(&self, source: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.flags).args(self.flavor.preprocess_args());
        if let Some(dir) = source.parent().filter(|d| !d.as_os_str().is_empty()) {
            cmd.current_dir(dir);
        }
        cmd.arg(source);
        cmd
    }

    /// Run the preprocessor over `source` and return its standard output.
    pub fn preprocess(&self, source: &Path) -> Result<String> {
        info!(program = %self.program.display(), source = %source.display(), "running preprocessor");
        let output = self
            .preprocess_command(source)
            .output()
            .map_err(|e| ProbeError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(ProbeError::CompilerFailed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// First line of the compiler's version banner, if it can be run.
    pub fn version(&self) -> Option<String> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.flags);
        if self.flavor == CompilerFlavor::Gnu {
            cmd.arg("--version");
        }
        let output = cmd.output().ok()?;
        // cl.exe prints its banner on stderr.
        let text = match self.flavor {
            CompilerFlavor::Gnu => String::from_utf8_lossy(&output.stdout).into_owned(),
            CompilerFlavor::Msvc => String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        text.lines().next().map(|l| l.trim().to_string()).filter(|l| !l.is_empty())
    }
}
