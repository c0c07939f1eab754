pub mod fs;
pub mod paths;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, CommandFactory, FromArgMatches, Parser};
use phpinfo2md::{convert, ConvertError, RenderOptions};
use phpinfo2md_config::{Config, ConfigError, LoadOptions};
use tracing::{debug, error, info, warn};

pub use paths::{resolve_input, resolve_output, InvalidInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    InvalidInput = 1,
    NoContent = 3,
    Io = 4,
    Config = 5,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "phpinfo2markdown",
    version,
    about = "Convert a saved phpinfo() page into Markdown",
    long_about = None,
    disable_version_flag = true
)]
pub struct Cli {
    /// Saved phpinfo() HTML page
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Output file or directory (defaults to INPUT with a .md extension)
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Config file taking precedence over .phpinfo2md.toml
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl Cli {
    /// The derived command plus a lowercase `-v` version flag.
    pub fn build_command() -> clap::Command {
        Self::command().arg(
            Arg::new("version")
                .short('v')
                .long("version")
                .action(ArgAction::Version)
                .help("Print version"),
        )
    }

    pub fn parse_args() -> Self {
        let matches = Self::build_command().get_matches();
        Self::from_arg_matches(&matches).unwrap_or_else(|err| err.exit())
    }
}

/// Prints usage to stdout.
pub fn print_usage() -> ExitCode {
    match Cli::build_command().print_help() {
        Ok(()) => ExitCode::Success,
        Err(_) => ExitCode::Io,
    }
}

/// Converts `input`, logging the outcome, and returns the process exit code.
pub fn run(cli: &Cli, input: &Path) -> ExitCode {
    match execute(cli, input) {
        Ok(output) => {
            info!("Markdown file written to {}", output.display());
            ExitCode::Success
        }
        Err(err) => {
            let code = exit_code_for(&err);
            if code == ExitCode::NoContent {
                warn!("no content written: {err}");
            } else {
                error!("{err:#}");
            }
            code
        }
    }
}

fn execute(cli: &Cli, input: &Path) -> Result<PathBuf> {
    let config = Config::load(LoadOptions {
        override_path: cli.config.clone(),
        working_dir: None,
    })?;
    for source in &config.sources {
        debug!("applied config {}", source.display());
    }
    let working_dir = &config.working_dir;

    let input = resolve_input(input, working_dir)?;
    let output = resolve_output(&input, cli.output.as_deref(), &config.output, working_dir);

    info!("Loading {}", input.display());
    let content =
        std::fs::read(&input).with_context(|| format!("failed to read {}", input.display()))?;

    let options = RenderOptions {
        hide_empty_cells: config.render.hide_empty_cells,
    };
    let markdown = convert(&content, &options)?;

    fs::write_atomic(&output, &markdown)
        .with_context(|| format!("failed to write {}", output.display()))?;

    Ok(output)
}

fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    if err.is::<InvalidInput>() {
        return ExitCode::InvalidInput;
    }
    if err.is::<ConfigError>() {
        return ExitCode::Config;
    }
    match err.downcast_ref::<ConvertError>() {
        Some(convert_err) if convert_err.is_no_content() => ExitCode::NoContent,
        _ => ExitCode::Io,
    }
}
