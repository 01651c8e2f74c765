//! abiprobe CLI — probe the C toolchain and emit versioned OS/ABI modules.

mod commands;
mod config;
mod logging;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use abiprobe_probe::RawProbe;
use config::AbiprobeConfig;

#[derive(Parser)]
#[command(name = "abiprobe", version, about = "Target OS and ABI detection for Rust builds")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe the toolchain and write the versioned modules
    Generate {
        /// Output file (default: <module-name>.rs in the project directory)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Module name recorded in the generated file
        #[arg(long)]
        name: Option<String>,
        /// Directory in which temporary probe files are created
        #[arg(long)]
        scratch_dir: Option<PathBuf>,
        /// C compiler command (default: $CC, then cc)
        #[arg(long)]
        compiler: Option<String>,
        /// Use this OS token instead of probing
        #[arg(long, requires = "abi_token")]
        os_token: Option<String>,
        /// Use this ABI token instead of probing
        #[arg(long, requires = "os_token")]
        abi_token: Option<String>,
        /// Fail if the newest API version cannot report the target
        #[arg(long)]
        strict: bool,
    },
    /// Classify raw tokens without running the toolchain
    Classify {
        /// Raw OS token (e.g. Linux)
        #[arg(long)]
        os: String,
        /// Raw ABI token (e.g. linux_x86_64)
        #[arg(long)]
        abi: String,
        /// Output format (human, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// List the classification tables
    Table {
        /// Which table (os, abi); both when omitted
        #[arg(long)]
        kind: Option<String>,
    },
    /// Check compiler discovery and probing
    Doctor {
        /// C compiler command to check
        #[arg(long)]
        compiler: Option<String>,
        /// Output format (human, json)
        #[arg(long)]
        format: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::setup_logger(cli.verbose, cli.quiet);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Generate {
            out,
            name,
            scratch_dir,
            compiler,
            os_token,
            abi_token,
            strict,
        } => {
            let (config, project_dir) = load_config_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or(cwd);
            let tokens = match (os_token, abi_token) {
                (Some(os), Some(abi)) => Some(RawProbe { os, abi }),
                _ => None,
            };
            let opts = commands::generate::GenerateOptions {
                out,
                name,
                scratch_dir,
                compiler,
                tokens,
                strict,
            };
            commands::generate::run(&project_dir, config.as_ref(), &opts)
        }

        Commands::Classify { os, abi, format } => {
            commands::classify::run(&os, &abi, format.as_deref())
        }

        Commands::Table { kind } => commands::table::run(kind.as_deref()),

        Commands::Doctor { compiler, format } => {
            let (config, config_dir) = load_config_optional(&cwd)?;
            commands::doctor::run(
                config_dir.as_deref(),
                config.as_ref(),
                compiler.as_deref(),
                format.as_deref(),
            )
        }
    }
}

/// Load `abiprobe.toml` if one exists at or above `cwd`, with paths resolved
/// against its directory.
fn load_config_optional(cwd: &Path) -> anyhow::Result<(Option<AbiprobeConfig>, Option<PathBuf>)> {
    match AbiprobeConfig::find_and_load(cwd)? {
        Some((config, dir)) => Ok((Some(config.resolve_paths(&dir)), Some(dir))),
        None => Ok((None, None)),
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_generate_with_tokens() {
        let cli = Cli::try_parse_from([
            "abiprobe",
            "-vv",
            "generate",
            "--os-token",
            "Linux",
            "--abi-token",
            "linux_x86",
            "--strict",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Generate {
                os_token,
                abi_token,
                strict,
                ..
            } => {
                assert_eq!(os_token.as_deref(), Some("Linux"));
                assert_eq!(abi_token.as_deref(), Some("linux_x86"));
                assert!(strict);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn os_token_requires_abi_token() {
        assert!(Cli::try_parse_from(["abiprobe", "generate", "--os-token", "Linux"]).is_err());
    }

    #[test]
    fn parse_doctor_format() {
        let cli = Cli::try_parse_from(["abiprobe", "doctor", "--compiler", "clang", "--format", "json"])
            .unwrap();
        match cli.command {
            Commands::Doctor { compiler, format } => {
                assert_eq!(compiler.as_deref(), Some("clang"));
                assert_eq!(format.as_deref(), Some("json"));
            }
            _ => panic!("expected doctor"),
        }
    }

    /// Config discovery → generate → classify on the generated file's inputs.
    #[test]
    fn config_generate_workflow() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(config::CONFIG_FILE_NAME),
            "[output]\npath = \"gen/platform.rs\"\nmodule-name = \"platform\"\n",
        )
        .unwrap();
        let nested = dir.path().join("src");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, project_dir) = load_config_optional(&nested).unwrap();
        let project_dir = project_dir.unwrap();
        assert_eq!(project_dir, dir.path());

        let opts = commands::generate::GenerateOptions {
            tokens: Some(RawProbe {
                os: "Android".into(),
                abi: "android_arm64v8a".into(),
            }),
            ..Default::default()
        };
        commands::generate::run(&project_dir, config.as_ref(), &opts).unwrap();

        let text = std::fs::read_to_string(dir.path().join("gen/platform.rs")).unwrap();
        assert!(text.contains("`platform`"));
        assert!(text.contains("Ok(Abi::Android_arm64v8a)"));

        // A second run leaves the file untouched.
        commands::generate::run(&project_dir, config.as_ref(), &opts).unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join("gen/platform.rs")).unwrap(),
            text
        );
    }
}
